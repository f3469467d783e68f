use common::model::record::FieldValue;
use common::model::template::FormTemplate;

pub enum Msg {
    LibraryLoaded(Vec<FormTemplate>),
    LibraryFailed(String),
    SelectTemplate(String),
    FieldChanged { field_id: String, value: FieldValue },
    Submit,
    Cancel,
    SubmissionDelivered(String),
    SubmissionFailed(String),
}
