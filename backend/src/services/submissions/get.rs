use actix_web::{web, HttpResponse, Responder};

use crate::inbox::state::InboxState;

/// Actix web handler for `GET /api/submissions/{receipt_id}`.
pub(crate) async fn process(receipt_id: web::Path<String>, state: web::Data<InboxState>) -> impl Responder {
    match state.get(&receipt_id.into_inner()).await {
        Some(package) => HttpResponse::Ok().json(package),
        None => HttpResponse::NotFound().body("Receipt not found"),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use common::model::submission::{SubmissionPackage, SubmissionReceipt};
    use std::time::Duration;

    use crate::inbox::state::{start_inbox_recorder, InboxState};

    fn package(template_id: &str) -> serde_json::Value {
        serde_json::json!({
            "templateId": template_id,
            "templateName": "Registre du commerce",
            "template": {
                "id": template_id,
                "name": "Registre du commerce",
                "category": "Commerce",
                "fields": [{"identifier": "name", "label": "Raison sociale", "type": "text", "required": true}]
            },
            "data": {"name": "Acme"}
        })
    }

    async fn recorded(state: &InboxState, receipt_id: &str) -> Option<SubmissionPackage> {
        for _ in 0..50 {
            if let Some(package) = state.get(receipt_id).await {
                return Some(package);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        None
    }

    #[actix_web::test]
    async fn accepted_packages_can_be_read_back() {
        let (state, rx) = InboxState::new();
        actix_web::rt::spawn(start_inbox_recorder(state.clone(), rx));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(crate::services::submissions::configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/submissions")
            .set_json(package("T1"))
            .to_request();
        let receipt: SubmissionReceipt = test::call_and_read_body_json(&app, req).await;
        assert!(!receipt.receipt_id.is_empty());

        let stored = recorded(&state, &receipt.receipt_id).await.unwrap();
        assert_eq!(stored.data.text("name"), "Acme");

        let req = test::TestRequest::get()
            .uri(&format!("/api/submissions/{}", receipt.receipt_id))
            .to_request();
        let body: SubmissionPackage = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, stored);
    }

    #[actix_web::test]
    async fn empty_template_id_is_a_bad_request() {
        let (state, _rx) = InboxState::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(crate::services::submissions::configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/submissions")
            .set_json(package("  "))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_receipt_is_not_found() {
        let (state, _rx) = InboxState::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(crate::services::submissions::configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/submissions/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn closed_inbox_answers_503() {
        let (state, rx) = InboxState::new();
        drop(rx);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(crate::services::submissions::configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/submissions")
            .set_json(package("T1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
