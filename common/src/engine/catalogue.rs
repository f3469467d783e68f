use log::warn;

use crate::model::template::FormTemplate;

/// Curated, read-only source of form templates.
pub trait TemplateCatalogue {
    fn list(&self) -> Vec<FormTemplate>;
}

/// User-maintained library of custom templates. Entries are free-form: the
/// category and type tag may be missing.
pub trait SavedFormLibrary {
    fn list(&self) -> Vec<FormTemplate>;
}

/// In-memory template list usable as either source.
///
/// Templates whose field identifiers collide, and templates reusing an id
/// already present, are dropped on construction so that every record key and
/// every selection id stays unambiguous.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticCatalogue {
    templates: Vec<FormTemplate>,
}

impl StaticCatalogue {
    pub fn new(templates: impl IntoIterator<Item = FormTemplate>) -> Self {
        let mut kept: Vec<FormTemplate> = Vec::new();
        for template in templates {
            let duplicates = template.duplicate_identifiers();
            if !duplicates.is_empty() {
                warn!(
                    "Skipping template `{}`: duplicate field identifiers {:?}",
                    template.id, duplicates
                );
                continue;
            }
            if kept.iter().any(|t| t.id == template.id) {
                warn!("Skipping template `{}`: id already in catalogue", template.id);
                continue;
            }
            kept.push(template);
        }
        Self { templates: kept }
    }

    pub fn templates(&self) -> &[FormTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateCatalogue for StaticCatalogue {
    fn list(&self) -> Vec<FormTemplate> {
        self.templates.clone()
    }
}

impl SavedFormLibrary for StaticCatalogue {
    fn list(&self) -> Vec<FormTemplate> {
        self.templates.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, fields: &[&str]) -> FormTemplate {
        let fields = fields
            .iter()
            .map(|f| format!(r#"{{"name":"{f}","label":"{f}"}}"#))
            .collect::<Vec<_>>()
            .join(",");
        serde_json::from_str(&format!(
            r#"{{"id":"{id}","name":"{id}","category":"Commerce","fields":[{fields}]}}"#
        ))
        .unwrap()
    }

    #[test]
    fn keeps_order_and_drops_invalid_templates() {
        let catalogue = StaticCatalogue::new(vec![
            template("b", &["x"]),
            template("dup-fields", &["x", "x"]),
            template("a", &["y"]),
            template("b", &["z"]),
        ]);

        let ids: Vec<String> = TemplateCatalogue::list(&catalogue)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(catalogue.templates()[0].fields[0].identifier, "x");
    }
}
