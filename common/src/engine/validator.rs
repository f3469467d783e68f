use crate::engine::widget::resolve;
use crate::model::record::{FieldValue, Record};
use crate::model::template::FormTemplate;

/// The engine's own precondition: something must be selected.
pub fn can_submit(selection: Option<&FormTemplate>) -> bool {
    selection.is_some()
}

/// Identifiers of required fields whose widget would fail native validation,
/// in field order.
pub fn missing_required(template: &FormTemplate, record: &Record) -> Vec<String> {
    template
        .fields
        .iter()
        .filter(|field| {
            !resolve(field, record.get(&field.identifier), |_: FieldValue| {})
                .satisfies_native_constraint()
        })
        .map(|field| field.identifier.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_empty_required_inputs_only() {
        let template: FormTemplate = serde_json::from_str(
            r#"{"id":"t","name":"T","fields":[
                {"name":"a","label":"A","required":true},
                {"name":"b","label":"B"},
                {"name":"c","label":"C","type":"textarea","required":true},
                {"name":"d","label":"D","type":"checkbox","required":true}
            ]}"#,
        )
        .unwrap();
        let mut record = Record::seeded_from(&template);
        assert_eq!(missing_required(&template, &record), vec!["a", "c"]);

        record.replace("c", "texte".into());
        assert_eq!(missing_required(&template, &record), vec!["a"]);
    }

    #[test]
    fn nothing_selected_cannot_submit() {
        assert!(!can_submit(None));
    }
}
