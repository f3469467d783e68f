//! End-to-end runs of a form session against in-memory collaborators.

use common::engine::catalogue::StaticCatalogue;
use common::engine::filter::FormKind;
use common::engine::pipeline::NO_TEMPLATE_MESSAGE;
use common::engine::session::SessionState;
use common::engine::widget::WidgetShape;
use common::model::notification::{Notification, NotificationLevel};
use common::model::record::FieldValue;
use common::model::submission::SubmissionPackage;
use common::model::template::{FormTemplate, InputKind};
use common::{EngineError, FormSession};

fn commerce_catalogue() -> StaticCatalogue {
    let templates: Vec<FormTemplate> = serde_json::from_str(
        r#"[{"id":"T1","name":"Registre du commerce","category":"Commerce","fields":[
            {"identifier":"name","label":"Raison sociale","type":"text","required":true}
        ]}]"#,
    )
    .unwrap();
    StaticCatalogue::new(templates)
}

struct Harness {
    sink: Vec<SubmissionPackage>,
    notes: Vec<Notification>,
    closed: usize,
}

impl Harness {
    fn new() -> Self {
        Self {
            sink: Vec::new(),
            notes: Vec::new(),
            closed: 0,
        }
    }

    fn submit(&mut self, session: &mut FormSession) -> Result<SubmissionPackage, EngineError> {
        let closed = &mut self.closed;
        session.submit(&mut self.sink, &mut self.notes, &mut || *closed += 1)
    }
}

#[test]
fn scenario_a_required_field_blocks_submission() {
    let mut session = FormSession::for_kind(FormKind::Procedure);
    session.load_catalogue(&commerce_catalogue());
    session.select("T1");
    assert_eq!(session.record().get("name"), Some(&FieldValue::from("")));

    let mut harness = Harness::new();
    let result = harness.submit(&mut session);

    assert_eq!(result, Err(EngineError::MissingRequired(vec!["name".into()])));
    assert!(harness.sink.is_empty());
    assert_eq!(harness.closed, 0);
    assert_eq!(session.state(), SessionState::TemplateSelected);
}

#[test]
fn scenario_b_filled_form_is_emitted_and_session_reset() {
    let mut session = FormSession::for_kind(FormKind::Procedure);
    session.load_catalogue(&commerce_catalogue());
    session.select("T1");
    session.set_field_value("name", "Acme").unwrap();

    let mut harness = Harness::new();
    let package = harness.submit(&mut session).unwrap();

    assert_eq!(package.template_id, "T1");
    assert_eq!(
        serde_json::to_value(&package.data).unwrap(),
        serde_json::json!({ "name": "Acme" })
    );
    assert_eq!(harness.sink, vec![package]);
    assert_eq!(harness.notes.len(), 1);
    assert_eq!(harness.notes[0].level, NotificationLevel::Info);
    assert!(harness.notes[0].message.contains("Registre du commerce"));
    assert_eq!(harness.closed, 1);
    assert_eq!(session.state(), SessionState::NoSelection);
    assert!(session.record().is_empty());
}

#[test]
fn scenario_c_unknown_template_id_deselects_silently() {
    let mut session = FormSession::for_kind(FormKind::Procedure);
    session.load_catalogue(&commerce_catalogue());
    session.select("T1");

    assert!(!session.select("does-not-exist"));
    assert!(session.selected().is_none());
    assert!(session.record().is_empty());
}

#[test]
fn scenario_d_select_without_options_renders_as_text_input() {
    let templates: Vec<FormTemplate> = serde_json::from_str(
        r#"[{"id":"T2","name":"Permis","category":"Urbanisme","fields":[
            {"name":"zone","label":"Zone","type":"select","options":[]}
        ]}]"#,
    )
    .unwrap();
    let mut session = FormSession::for_kind(FormKind::Procedure);
    session.load_templates(&templates);
    session.select("T2");

    let widgets = session.widgets(|_| |_: FieldValue| {});
    assert_eq!(widgets.len(), 1);
    assert!(matches!(
        widgets[0].shape,
        WidgetShape::SingleLine { kind: InputKind::Text, .. }
    ));
}

#[test]
fn scenario_e_submit_without_selection_reports_an_error() {
    let mut session = FormSession::for_kind(FormKind::Procedure);
    session.load_catalogue(&commerce_catalogue());

    let mut harness = Harness::new();
    let result = harness.submit(&mut session);

    assert_eq!(result, Err(EngineError::NoTemplateSelected));
    assert!(harness.sink.is_empty());
    assert_eq!(harness.closed, 0);
    assert_eq!(
        harness.notes,
        vec![Notification::error("Erreur", NO_TEMPLATE_MESSAGE)]
    );
    assert_eq!(session.state(), SessionState::NoSelection);
}

#[test]
fn widget_edits_flow_back_into_the_record() {
    let mut session = FormSession::for_kind(FormKind::Procedure);
    session.load_catalogue(&commerce_catalogue());
    session.select("T1");

    let edits = std::cell::RefCell::new(Vec::new());
    let widgets = session.widgets(|field| {
        let id = field.identifier.clone();
        let edits = &edits;
        move |value: FieldValue| edits.borrow_mut().push((id.clone(), value))
    });
    widgets[0].edit_text("Acme");
    drop(widgets);

    for (id, value) in edits.into_inner() {
        session.set_field_value(&id, value).unwrap();
    }
    assert_eq!(session.record().text("name"), "Acme");
}
