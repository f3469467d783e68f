use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::template::{FieldType, FormTemplate};

/// Current value of one field: text for every single-line, multi-line and
/// select widget, a flag for toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(_))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Working data of one in-progress submission, keyed by field identifier.
///
/// Entries keep the template's field order, and serialize as a plain JSON
/// object in that order (`{"nom": "Acme", "urgent": true}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial record for `template`: one entry per field, holding
    /// the field's default or its empty value.
    ///
    /// - checkbox: `false`, or `true` when the default reads `"true"`
    /// - select: the default only when it is one of the options, else `""`
    /// - everything else: the default, else `""`
    pub fn seeded_from(template: &FormTemplate) -> Self {
        let entries = template.fields.iter().map(|field| {
            let value = match field.widget_family() {
                FieldType::Checkbox => FieldValue::Flag(
                    field
                        .default_value
                        .as_deref()
                        .is_some_and(|d| d.trim().eq_ignore_ascii_case("true")),
                ),
                FieldType::Select => FieldValue::Text(
                    field
                        .default_value
                        .clone()
                        .filter(|d| field.options.contains(d))
                        .unwrap_or_default(),
                ),
                FieldType::TextLike(_) | FieldType::Textarea => {
                    FieldValue::Text(field.default_value.clone().unwrap_or_default())
                }
            };
            (field.identifier.clone(), value)
        });
        Record(entries.collect())
    }

    pub fn get(&self, identifier: &str) -> Option<&FieldValue> {
        self.0.get(identifier)
    }

    /// Text value of `identifier`, `""` when absent or not a text field.
    pub fn text(&self, identifier: &str) -> &str {
        self.get(identifier).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Flag value of `identifier`, `false` when absent or not a toggle.
    pub fn flag(&self, identifier: &str) -> bool {
        self.get(identifier)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.0.contains_key(identifier)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrites an existing key. Returns the previous value, or `None` if
    /// the key is not part of the record (nothing is inserted then).
    pub(crate) fn replace(&mut self, identifier: &str, value: FieldValue) -> Option<FieldValue> {
        self.0
            .get_mut(identifier)
            .map(|slot| std::mem::replace(slot, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(json: &str) -> FormTemplate {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn seeds_defaults_by_widget_family() {
        let t = template(
            r#"{"id":"t","name":"T","category":"Commerce","fields":[
                {"name":"raison","label":"Raison sociale","defaultValue":"SARL"},
                {"name":"forme","label":"Forme","type":"select","options":["SA","SARL"],"defaultValue":"SAS"},
                {"name":"urgent","label":"Urgent","type":"checkbox","defaultValue":"TRUE"},
                {"name":"notes","label":"Notes","type":"textarea"}
            ]}"#,
        );
        let record = Record::seeded_from(&t);

        assert_eq!(record.len(), 4);
        assert_eq!(record.text("raison"), "SARL");
        assert_eq!(record.text("forme"), "");
        assert_eq!(record.get("urgent"), Some(&FieldValue::Flag(true)));
        assert_eq!(record.text("notes"), "");
    }

    #[test]
    fn replace_never_inserts_new_keys() {
        let t = template(r#"{"id":"t","name":"T","fields":[{"name":"a","label":"A"}]}"#);
        let mut record = Record::seeded_from(&t);

        assert_eq!(record.replace("b", "x".into()), None);
        assert!(!record.contains("b"));
        assert_eq!(record.replace("a", "x".into()), Some(FieldValue::from("")));
        assert_eq!(record.text("a"), "x");
    }

    #[test]
    fn serializes_as_flat_object() {
        let t = template(
            r#"{"id":"t","name":"T","fields":[
                {"name":"nom","label":"Nom"},
                {"name":"ok","label":"Ok","type":"checkbox"}
            ]}"#,
        );
        let json = serde_json::to_value(Record::seeded_from(&t)).unwrap();
        assert_eq!(json, serde_json::json!({ "nom": "", "ok": false }));
    }

    #[test]
    fn serialized_keys_follow_field_order() {
        let t = template(
            r#"{"id":"t","name":"T","fields":[
                {"name":"zone","label":"Zone"},
                {"name":"adresse","label":"Adresse"},
                {"name":"mitoyen","label":"Mitoyen","type":"checkbox"}
            ]}"#,
        );
        let record = Record::seeded_from(&t);

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["zone", "adresse", "mitoyen"]);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"zone":"","adresse":"","mitoyen":false}"#
        );
    }
}
