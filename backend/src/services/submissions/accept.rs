use actix_web::{web, HttpResponse, Responder};
use common::model::submission::{SubmissionPackage, SubmissionReceipt};
use log::{error, info};
use uuid::Uuid;

use crate::inbox::state::{InboxEntry, InboxState};

/// Actix web handler for `POST /api/submissions`.
///
/// # Returns
/// - `200 OK` with a `SubmissionReceipt` once the package is queued.
/// - `400 Bad Request` when the package does not name a template.
/// - `503 Service Unavailable` when the inbox recorder is gone.
pub(crate) async fn process(
    package: web::Json<SubmissionPackage>,
    state: web::Data<InboxState>,
) -> impl Responder {
    let package = package.into_inner();
    if package.template_id.trim().is_empty() {
        return HttpResponse::BadRequest().body("Submission does not name a template");
    }

    let receipt_id = Uuid::new_v4().to_string();
    info!(
        "Accepted submission {} for `{}` ({})",
        receipt_id, package.template_id, package.template_name
    );

    let entry = InboxEntry {
        receipt_id: receipt_id.clone(),
        package,
    };
    if let Err(e) = state.tx.send(entry).await {
        error!("Inbox recorder unavailable: {}", e);
        return HttpResponse::ServiceUnavailable().body("Submission inbox unavailable");
    }

    HttpResponse::Ok().json(SubmissionReceipt { receipt_id })
}
