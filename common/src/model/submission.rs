use serde::{Deserialize, Serialize};

use crate::model::record::Record;
use crate::model::template::FormTemplate;

/// What a successful submission hands to the workflow collaborator.
///
/// Sent as the JSON body of `POST /api/submissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPackage {
    pub template_id: String,
    pub template_name: String,
    /// Full template the record was filled against.
    pub template: FormTemplate,
    pub data: Record,
}

impl SubmissionPackage {
    pub fn new(template: &FormTemplate, data: Record) -> Self {
        Self {
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            template: template.clone(),
            data,
        }
    }
}

/// Backend acknowledgement for an accepted package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub receipt_id: String,
}
