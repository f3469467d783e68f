use log::debug;

use crate::error::EngineError;
use crate::model::record::{FieldValue, Record};
use crate::model::template::FormTemplate;

/// Owns the current selection and the record shaped after it.
///
/// Either no template is selected and the record is empty, or exactly one
/// template is selected and the record holds one entry per field of that
/// template. Every selection change rebuilds the record from scratch.
#[derive(Debug, Clone, Default)]
pub struct RecordBinder {
    available: Vec<FormTemplate>,
    selected: Option<FormTemplate>,
    record: Record,
}

impl RecordBinder {
    pub fn new(available: Vec<FormTemplate>) -> Self {
        Self {
            available,
            selected: None,
            record: Record::new(),
        }
    }

    /// Templates `select` resolves against.
    pub fn available(&self) -> &[FormTemplate] {
        &self.available
    }

    /// Swaps the selectable set, e.g. after the library was (re)loaded.
    ///
    /// A selection that is still offered is rebuilt against its new version;
    /// one that disappeared is cleared.
    pub fn replace_available(&mut self, available: Vec<FormTemplate>) {
        self.available = available;
        if let Some(id) = self.selected.as_ref().map(|t| t.id.clone()) {
            self.select(&id);
        }
    }

    /// Selects `template_id`, rebuilding the record. An id that is not offered
    /// (including `""`) deselects instead.
    ///
    /// Returns whether a template is selected afterwards.
    pub fn select(&mut self, template_id: &str) -> bool {
        self.clear();
        let Some(template) = self.available.iter().find(|t| t.id == template_id) else {
            if !template_id.is_empty() {
                debug!("Template `{}` is not offered, selection cleared", template_id);
            }
            return false;
        };
        self.record = Record::seeded_from(template);
        self.selected = Some(template.clone());
        debug!(
            "Selected template `{}` ({} fields)",
            template_id,
            self.record.len()
        );
        true
    }

    /// Stores `value` under `identifier`.
    ///
    /// With nothing selected this is a no-op returning `Ok(false)`. The value
    /// kind must agree with the field: flags for toggles, text otherwise.
    /// Returns `Ok(true)` when the stored value changed.
    pub fn set_field_value(
        &mut self,
        identifier: &str,
        value: impl Into<FieldValue>,
    ) -> Result<bool, EngineError> {
        let Some(template) = &self.selected else {
            return Ok(false);
        };
        let field = template
            .field(identifier)
            .ok_or_else(|| EngineError::UnknownField(identifier.to_string()))?;

        let value = value.into();
        match (field.is_checkbox(), value.is_flag()) {
            (true, false) => {
                return Err(EngineError::ValueKindMismatch {
                    field: identifier.to_string(),
                    expected: "boolean",
                });
            }
            (false, true) => {
                return Err(EngineError::ValueKindMismatch {
                    field: identifier.to_string(),
                    expected: "text",
                });
            }
            _ => {}
        }

        let previous = self.record.replace(identifier, value.clone());
        Ok(previous.as_ref() != Some(&value))
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.record = Record::new();
    }

    pub fn selected(&self) -> Option<&FormTemplate> {
        self.selected.as_ref()
    }

    /// Id of the selected template, `""` when none.
    pub fn selected_id(&self) -> &str {
        self.selected.as_ref().map(|t| t.id.as_str()).unwrap_or("")
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}
