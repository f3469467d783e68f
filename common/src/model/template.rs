use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

/// A reusable form schema supplied by a catalogue or by the saved-form library.
///
/// Templates are read-only for the engine: it selects them and shapes records
/// after their `fields`, but never edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    /// Stable identifier, unique within a catalogue.
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Partition key used by the kind filters (e.g. "État Civil").
    /// Saved forms may omit it or store `null`; it then reads as the empty string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Free-form type tag found on saved-form library entries
    /// (e.g. `"textes_juridiques"`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    /// Ordered field list. Order drives render order. Entries that cannot
    /// be read as a field are dropped on load.
    #[serde(default, deserialize_with = "lenient_fields")]
    pub fields: Vec<FieldSpec>,
}

impl FormTemplate {
    pub fn field(&self, identifier: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }

    /// Identifiers that appear more than once in `fields`, in first-seen order.
    pub fn duplicate_identifiers(&self) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.fields.len());
        let mut duplicates = Vec::new();
        for field in &self.fields {
            if seen.contains(&field.identifier.as_str()) {
                if !duplicates.contains(&field.identifier) {
                    duplicates.push(field.identifier.clone());
                }
            } else {
                seen.push(&field.identifier);
            }
        }
        duplicates
    }

    /// Label shown in the library picker: `"<name> (<category>)"`.
    pub fn picker_label(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}

/// One entry of a template schema.
///
/// Read through [`RawFieldSpec`]: `null` counts as absent everywhere and an
/// unreadable `type` falls back to a text input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFieldSpec")]
pub struct FieldSpec {
    /// Record key.
    pub identifier: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Wire shape of a field as the different template sources write it.
///
/// Curated templates key fields by `name`, saved forms by `id`, serialized
/// specs by `identifier`. When several are present the key is taken from
/// `identifier`, then `id`, then `name`; a `name` that is not the key stands
/// in for a missing label.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldSpec {
    #[serde(default)]
    identifier: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_field_type")]
    field_type: FieldType,
    #[serde(default, deserialize_with = "null_as_default")]
    required: bool,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    options: Vec<String>,
    #[serde(default)]
    default_value: Option<String>,
}

impl TryFrom<RawFieldSpec> for FieldSpec {
    type Error = String;

    fn try_from(raw: RawFieldSpec) -> Result<Self, Self::Error> {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        let (identifier, caption) = match (non_empty(&raw.identifier), non_empty(&raw.id)) {
            (Some(identifier), _) | (None, Some(identifier)) => (identifier, non_empty(&raw.name)),
            (None, None) => match non_empty(&raw.name) {
                Some(name) => (name, None),
                None => return Err("field has no identifier, id or name".to_string()),
            },
        };
        let label = non_empty(&raw.label)
            .or(caption)
            .unwrap_or_else(|| identifier.clone());

        Ok(FieldSpec {
            identifier,
            label,
            field_type: raw.field_type,
            required: raw.required,
            placeholder: raw.placeholder,
            options: raw.options,
            default_value: raw.default_value,
        })
    }
}

/// Reads `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any declared type string goes through [`FieldType::from_declared`];
/// `null` or a non-string value means a text input.
fn lenient_field_type<'de, D>(deserializer: D) -> Result<FieldType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(declared) => FieldType::from_declared(&declared),
        _ => FieldType::default(),
    })
}

fn lenient_fields<'de, D>(deserializer: D) -> Result<Vec<FieldSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value::<FieldSpec>(entry) {
            Ok(field) => Some(field),
            Err(e) => {
                warn!("Dropping field #{}: {}", position, e);
                None
            }
        })
        .collect())
}

impl FieldSpec {
    /// The widget family this field is actually edited with.
    ///
    /// A `select` without options has nothing to choose from and degrades to a
    /// plain text input.
    pub fn widget_family(&self) -> FieldType {
        match self.field_type {
            FieldType::Select if self.options.is_empty() => FieldType::TextLike(InputKind::Text),
            other => other,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.widget_family(), FieldType::Checkbox)
    }
}

/// Declared field type, closed over the four widget families.
///
/// Deserialized from the free-form `type` string: anything that is not
/// `textarea`, `select` or `checkbox` is a single-line input, and an input
/// kind that is not recognised becomes [`InputKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    TextLike(InputKind),
    Textarea,
    Select,
    Checkbox,
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::TextLike(InputKind::Text)
    }
}

impl FieldType {
    pub fn from_declared(declared: &str) -> Self {
        match declared.trim().to_ascii_lowercase().as_str() {
            "textarea" => FieldType::Textarea,
            "select" => FieldType::Select,
            "checkbox" => FieldType::Checkbox,
            other => FieldType::TextLike(InputKind::from_declared(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::TextLike(kind) => kind.as_str(),
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
        }
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        FieldType::from_declared(&value)
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

/// Concrete kind of a single-line input, mirroring the HTML `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Number,
    Date,
    Time,
    DateTimeLocal,
    Month,
    Week,
    Tel,
    Url,
    Password,
    Search,
    Color,
}

impl InputKind {
    pub fn from_declared(declared: &str) -> Self {
        match declared {
            "email" => InputKind::Email,
            "number" => InputKind::Number,
            "date" => InputKind::Date,
            "time" => InputKind::Time,
            "datetime-local" => InputKind::DateTimeLocal,
            "month" => InputKind::Month,
            "week" => InputKind::Week,
            "tel" => InputKind::Tel,
            "url" => InputKind::Url,
            "password" => InputKind::Password,
            "search" => InputKind::Search,
            "color" => InputKind::Color,
            _ => InputKind::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Number => "number",
            InputKind::Date => "date",
            InputKind::Time => "time",
            InputKind::DateTimeLocal => "datetime-local",
            InputKind::Month => "month",
            InputKind::Week => "week",
            InputKind::Tel => "tel",
            InputKind::Url => "url",
            InputKind::Password => "password",
            InputKind::Search => "search",
            InputKind::Color => "color",
        }
    }
}
