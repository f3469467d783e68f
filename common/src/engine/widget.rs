//! Field → widget dispatch.
//!
//! [`resolve`] is the single place where a field's declared type decides how
//! it is edited. The result is a plain description of the widget plus the
//! change handler it reports edits to; it keeps no state of its own, the
//! record stays the single source of truth.

use log::debug;

use crate::model::record::FieldValue;
use crate::model::template::{FieldSpec, FieldType, InputKind};

pub const TEXTAREA_ROWS: u32 = 3;
pub const REQUIRED_MARKER: &str = "*";

/// Width of a widget in the two-column field grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSpan {
    Single,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Rendering shape of a resolved widget, carrying the value it displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetShape {
    MultiLine {
        rows: u32,
        placeholder: Option<String>,
        value: String,
    },
    Choice {
        options: Vec<SelectOption>,
        placeholder: String,
        value: String,
    },
    Toggle {
        caption: String,
        checked: bool,
    },
    SingleLine {
        kind: InputKind,
        placeholder: Option<String>,
        value: String,
    },
}

/// Receiver of widget edits.
pub trait OnChange {
    fn emit(&self, value: FieldValue);
}

impl<F: Fn(FieldValue)> OnChange for F {
    fn emit(&self, value: FieldValue) {
        self(value)
    }
}

#[derive(Debug, Clone)]
pub struct RenderableWidget<C> {
    pub field_id: String,
    /// Row caption shown above the widget.
    pub label: String,
    pub required: bool,
    pub span: ColumnSpan,
    pub shape: WidgetShape,
    on_change: C,
}

impl<C: OnChange> RenderableWidget<C> {
    /// Cosmetic marker appended to the row caption of required fields.
    pub fn required_marker(&self) -> Option<&'static str> {
        self.required.then_some(REQUIRED_MARKER)
    }

    /// Whether the underlying input carries the native `required` constraint.
    /// Toggles never do: a required toggle could only ever be submitted on.
    pub fn native_required(&self) -> bool {
        self.required && !matches!(self.shape, WidgetShape::Toggle { .. })
    }

    /// Mirrors the browser's `valueMissing` check: a natively required input
    /// must not be the empty string. Whitespace counts as a value.
    pub fn satisfies_native_constraint(&self) -> bool {
        if !self.native_required() {
            return true;
        }
        match &self.shape {
            WidgetShape::MultiLine { value, .. }
            | WidgetShape::Choice { value, .. }
            | WidgetShape::SingleLine { value, .. } => !value.is_empty(),
            WidgetShape::Toggle { .. } => true,
        }
    }

    /// Forwards a text edit. Toggles ignore text, and a choice only accepts
    /// one of its options (or `""` to reset).
    ///
    /// Returns whether the edit was forwarded.
    pub fn edit_text(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        match &self.shape {
            WidgetShape::Toggle { .. } => return false,
            WidgetShape::Choice { options, .. } => {
                if !text.is_empty() && !options.iter().any(|o| o.value == text) {
                    debug!("Ignoring `{}` for `{}`: not an option", text, self.field_id);
                    return false;
                }
            }
            WidgetShape::MultiLine { .. } | WidgetShape::SingleLine { .. } => {}
        }
        self.on_change.emit(FieldValue::Text(text));
        true
    }

    /// Forwards a toggle edit. Only toggles accept it.
    pub fn toggle(&self, checked: bool) -> bool {
        if !matches!(self.shape, WidgetShape::Toggle { .. }) {
            return false;
        }
        self.on_change.emit(FieldValue::Flag(checked));
        true
    }
}

/// Resolves the widget for `field` showing `current`.
///
/// Dispatch order: textarea, select with options, checkbox, then every other
/// type as a single-line input (a select without options lands there too).
pub fn resolve<C: OnChange>(
    field: &FieldSpec,
    current: Option<&FieldValue>,
    on_change: C,
) -> RenderableWidget<C> {
    let text = current
        .and_then(FieldValue::as_text)
        .unwrap_or_default()
        .to_string();

    let (span, shape) = match field.widget_family() {
        FieldType::Textarea => (
            ColumnSpan::Full,
            WidgetShape::MultiLine {
                rows: TEXTAREA_ROWS,
                placeholder: field.placeholder.clone(),
                value: text,
            },
        ),
        FieldType::Select => (
            ColumnSpan::Single,
            WidgetShape::Choice {
                options: field
                    .options
                    .iter()
                    .map(|o| SelectOption {
                        value: o.clone(),
                        label: o.clone(),
                    })
                    .collect(),
                placeholder: field
                    .placeholder
                    .clone()
                    .unwrap_or_else(|| format!("Sélectionner {}", field.label.to_lowercase())),
                value: text,
            },
        ),
        FieldType::Checkbox => (
            ColumnSpan::Single,
            WidgetShape::Toggle {
                caption: field
                    .placeholder
                    .clone()
                    .unwrap_or_else(|| field.label.clone()),
                checked: current.and_then(FieldValue::as_flag).unwrap_or(false),
            },
        ),
        FieldType::TextLike(kind) => {
            if field.field_type == FieldType::Select {
                debug!("Select field `{}` has no options, editing as text", field.identifier);
            }
            (
                ColumnSpan::Single,
                WidgetShape::SingleLine {
                    kind,
                    placeholder: field.placeholder.clone(),
                    value: text,
                },
            )
        }
    };

    RenderableWidget {
        field_id: field.identifier.clone(),
        label: field.label.clone(),
        required: field.required,
        span,
        shape,
        on_change,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn field(json: &str) -> FieldSpec {
        serde_json::from_str(json).unwrap()
    }

    fn ignore(_: FieldValue) {}

    #[test]
    fn textarea_spans_the_full_row() {
        let widget = resolve(
            &field(r#"{"name":"motif","label":"Motif","type":"textarea","placeholder":"Décrire"}"#),
            Some(&FieldValue::from("déjà saisi")),
            ignore,
        );
        assert_eq!(widget.span, ColumnSpan::Full);
        assert_eq!(
            widget.shape,
            WidgetShape::MultiLine {
                rows: 3,
                placeholder: Some("Décrire".into()),
                value: "déjà saisi".into(),
            }
        );
    }

    #[test]
    fn select_uses_value_as_label_and_derives_placeholder() {
        let widget = resolve(
            &field(r#"{"name":"region","label":"Région","type":"select","options":["Alger","Oran"]}"#),
            None,
            ignore,
        );
        let WidgetShape::Choice { options, placeholder, value } = widget.shape else {
            panic!("expected a choice widget");
        };
        assert_eq!(placeholder, "Sélectionner région");
        assert_eq!(value, "");
        assert_eq!(
            options,
            vec![
                SelectOption { value: "Alger".into(), label: "Alger".into() },
                SelectOption { value: "Oran".into(), label: "Oran".into() },
            ]
        );
    }

    #[test]
    fn select_without_options_renders_as_text_input() {
        let widget = resolve(
            &field(r#"{"name":"region","label":"Région","type":"select","options":[]}"#),
            None,
            ignore,
        );
        assert!(matches!(
            widget.shape,
            WidgetShape::SingleLine { kind: InputKind::Text, .. }
        ));
    }

    #[test]
    fn toggle_caption_prefers_placeholder() {
        let with_placeholder = resolve(
            &field(r#"{"name":"ok","label":"Accord","type":"checkbox","placeholder":"J'accepte"}"#),
            Some(&FieldValue::Flag(true)),
            ignore,
        );
        let without = resolve(
            &field(r#"{"name":"ok","label":"Accord","type":"checkbox"}"#),
            None,
            ignore,
        );
        assert_eq!(
            with_placeholder.shape,
            WidgetShape::Toggle { caption: "J'accepte".into(), checked: true }
        );
        assert_eq!(with_placeholder.label, "Accord");
        assert_eq!(
            without.shape,
            WidgetShape::Toggle { caption: "Accord".into(), checked: false }
        );
    }

    #[test]
    fn single_line_keeps_declared_input_kind() {
        let date = resolve(&field(r#"{"name":"d","label":"D","type":"date"}"#), None, ignore);
        let odd = resolve(&field(r#"{"name":"s","label":"S","type":"signature"}"#), None, ignore);
        assert!(matches!(date.shape, WidgetShape::SingleLine { kind: InputKind::Date, .. }));
        assert!(matches!(odd.shape, WidgetShape::SingleLine { kind: InputKind::Text, .. }));
    }

    #[test]
    fn edits_are_forwarded_synchronously() {
        let seen = RefCell::new(Vec::new());
        let on_change = |v: FieldValue| seen.borrow_mut().push(v);

        let text = resolve(&field(r#"{"name":"n","label":"N"}"#), None, &on_change);
        assert!(text.edit_text("Acme"));
        assert!(!text.toggle(true));

        let choice = resolve(
            &field(r#"{"name":"c","label":"C","type":"select","options":["A"]}"#),
            None,
            &on_change,
        );
        assert!(!choice.edit_text("Z"));
        assert!(choice.edit_text("A"));

        let toggle = resolve(&field(r#"{"name":"t","label":"T","type":"checkbox"}"#), None, &on_change);
        assert!(!toggle.edit_text("oui"));
        assert!(toggle.toggle(true));

        assert_eq!(
            seen.into_inner(),
            vec![FieldValue::from("Acme"), FieldValue::from("A"), FieldValue::Flag(true)]
        );
    }

    #[test]
    fn native_constraint_only_binds_required_inputs() {
        let required = field(r#"{"name":"n","label":"N","required":true}"#);
        let toggle = field(r#"{"name":"t","label":"T","type":"checkbox","required":true}"#);

        let empty = resolve(&required, Some(&FieldValue::from("")), ignore);
        let blank = resolve(&required, Some(&FieldValue::from("  ")), ignore);
        let filled = resolve(&required, Some(&FieldValue::from("x")), ignore);
        let unchecked = resolve(&toggle, Some(&FieldValue::Flag(false)), ignore);

        assert_eq!(empty.required_marker(), Some("*"));
        assert!(!empty.satisfies_native_constraint());
        assert!(blank.satisfies_native_constraint());
        assert!(filled.satisfies_native_constraint());
        assert!(!unchecked.native_required());
        assert!(unchecked.satisfies_native_constraint());
    }
}
