mod config;
mod inbox;
mod services;

use crate::config::ServerConfig;
use crate::inbox::state::InboxState;
use crate::services::saved_forms::library::SqliteLibrary;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env();
    let url = config.url();

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    let catalogue = web::Data::new(services::templates::catalogue::embedded_catalogue());

    let library = SqliteLibrary::new(config.db_path.clone());
    if let Err(e) = library.seed_with_starters() {
        warn!("Could not seed saved-form library {}: {}", library.path().display(), e);
    }
    let library = web::Data::new(library);

    // Submission inbox and its recorder task
    let (inbox_state, rx) = InboxState::new();
    let recorder_state = inbox_state.clone();
    tokio::spawn(async move {
        inbox::state::start_inbox_recorder(recorder_state, rx).await;
    });

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(catalogue.clone())
            .app_data(library.clone())
            .app_data(web::Data::new(inbox_state.clone()))
            .service(services::templates::configure_routes())
            .service(services::saved_forms::configure_routes())
            .service(services::submissions::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
