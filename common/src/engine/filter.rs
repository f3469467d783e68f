//! Kind filters: which templates a given dialog offers.
//!
//! The curated catalogue is partitioned by a fixed list of administrative
//! procedure categories. The saved-form library has no such discipline, so
//! legal texts are recognised there by category or by a type-tag substring.

use crate::engine::catalogue::TemplateCatalogue;
use crate::model::template::FormTemplate;

pub const PROCEDURE_CATEGORIES: [&str; 8] = [
    "État Civil",
    "Urbanisme",
    "Commerce",
    "Emploi",
    "Santé",
    "Éducation",
    "Transport",
    "Fiscalité",
];

pub const LEGAL_TEXT_CATEGORY: &str = "Textes Juridiques";

/// Lower-case marker searched in saved-form type tags (`"textes_juridiques"`,
/// `"Texte juridique"`, ...).
pub const LEGAL_TYPE_MARKER: &str = "juridique";

/// The kind of document a dialog adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Procedure,
    LegalText,
}

impl FormKind {
    pub fn dialog_title(&self) -> &'static str {
        match self {
            FormKind::Procedure => "Ajouter une nouvelle procédure administrative",
            FormKind::LegalText => "Ajouter un nouveau texte juridique",
        }
    }

    pub fn details_title(&self) -> &'static str {
        match self {
            FormKind::Procedure => "Détails de la procédure administrative",
            FormKind::LegalText => "Détails du texte juridique",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormKind::Procedure => "Ajouter la procédure",
            FormKind::LegalText => "Ajouter le texte",
        }
    }

    /// Text of the disabled picker entry shown when the filter keeps nothing.
    pub fn empty_library_message(&self) -> &'static str {
        match self {
            FormKind::Procedure => {
                "Aucun formulaire de procédure administrative disponible dans la bibliothèque"
            }
            FormKind::LegalText => {
                "Aucun formulaire de texte juridique disponible dans la bibliothèque"
            }
        }
    }

    pub fn success_title(&self) -> &'static str {
        match self {
            FormKind::Procedure => "Procédure ajoutée",
            FormKind::LegalText => "Texte juridique ajouté",
        }
    }

    pub fn success_message(&self, template_name: &str) -> String {
        match self {
            FormKind::Procedure => format!(
                "La procédure basée sur \"{}\" a été ajoutée avec succès.",
                template_name
            ),
            FormKind::LegalText => format!(
                "Le texte basé sur \"{}\" a été ajouté avec succès.",
                template_name
            ),
        }
    }
}

/// Membership rule turning a template source into the list a dialog offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateFilter {
    /// Keep templates whose category is listed.
    CategoryAllowlist(Vec<String>),
    /// Keep templates whose category is not listed.
    CategoryComplement(Vec<String>),
    /// Best-effort legal-text classification for saved forms.
    ///
    /// Category rules win over the type tag: `legal_category` always matches,
    /// any of `excluded_categories` never matches, and only then is the type
    /// tag searched (case-insensitively) for `type_marker`.
    FuzzyLegal {
        legal_category: String,
        type_marker: String,
        excluded_categories: Vec<String>,
    },
}

impl TemplateFilter {
    /// Partition rule for the curated catalogue.
    pub fn for_kind(kind: FormKind) -> Self {
        let categories = PROCEDURE_CATEGORIES.iter().map(|c| c.to_string()).collect();
        match kind {
            FormKind::Procedure => TemplateFilter::CategoryAllowlist(categories),
            FormKind::LegalText => TemplateFilter::CategoryComplement(categories),
        }
    }

    /// Legal-text rule for the saved-form library.
    pub fn saved_legal_texts() -> Self {
        TemplateFilter::FuzzyLegal {
            legal_category: LEGAL_TEXT_CATEGORY.to_string(),
            type_marker: LEGAL_TYPE_MARKER.to_string(),
            excluded_categories: PROCEDURE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn matches(&self, template: &FormTemplate) -> bool {
        match self {
            TemplateFilter::CategoryAllowlist(categories) => {
                categories.iter().any(|c| *c == template.category)
            }
            TemplateFilter::CategoryComplement(categories) => {
                !categories.iter().any(|c| *c == template.category)
            }
            TemplateFilter::FuzzyLegal {
                legal_category,
                type_marker,
                excluded_categories,
            } => {
                if template.category == *legal_category {
                    return true;
                }
                if excluded_categories.iter().any(|c| *c == template.category) {
                    return false;
                }
                template
                    .type_tag
                    .as_deref()
                    .is_some_and(|tag| tag.to_lowercase().contains(&type_marker.to_lowercase()))
            }
        }
    }

    /// Matching templates in source order.
    pub fn apply(&self, templates: &[FormTemplate]) -> Vec<FormTemplate> {
        templates
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

/// Curated catalogue restricted to `kind`.
pub fn filter_by_kind<C: TemplateCatalogue + ?Sized>(
    catalogue: &C,
    kind: FormKind,
) -> Vec<FormTemplate> {
    TemplateFilter::for_kind(kind).apply(&catalogue.list())
}
