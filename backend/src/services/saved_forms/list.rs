use actix_web::{web, HttpResponse, Responder};

use super::library::SqliteLibrary;

/// Actix web handler for `GET /api/saved_forms`.
///
/// # Returns
/// - `200 OK` with the readable templates as a JSON array.
/// - `503 Service Unavailable` if the database cannot be opened or queried.
pub(crate) async fn process(library: web::Data<SqliteLibrary>) -> impl Responder {
    match library.load() {
        Ok(templates) => HttpResponse::Ok().json(templates),
        Err(e) => HttpResponse::ServiceUnavailable()
            .body(format!("Error reading saved forms: {}", e)),
    }
}
