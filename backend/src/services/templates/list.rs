use actix_web::{web, HttpResponse, Responder};
use common::engine::catalogue::{StaticCatalogue, TemplateCatalogue};

/// Actix web handler for `GET /api/templates`.
pub(crate) async fn process(catalogue: web::Data<StaticCatalogue>) -> impl Responder {
    HttpResponse::Ok().json(TemplateCatalogue::list(catalogue.get_ref()))
}
