use actix_web::{error, web, HttpResponse, Responder};
use log::{info, warn};

use crate::models::{ErrorMessage, MoveLogAck, MoveLogRequest};

/// HTTP handler for the index page
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Chess move log")
}

/// Log a move reported by a client and acknowledge it. Nothing is stored.
pub async fn log_move(request: web::Json<MoveLogRequest>) -> impl Responder {
    let request = request.into_inner();
    match &request.game_id {
        Some(game_id) => info!("Move received from client: {:?} (game {})", request.mv, game_id),
        None => info!("Move received from client: {:?}", request.mv),
    }
    HttpResponse::Ok().json(MoveLogAck::ok(request.mv))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Error parsing move log request: {}", err);
        let body = ErrorMessage {
            error: format!("Invalid message format: {}", err),
        };
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/move")
            .app_data(json_config())
            .route(web::post().to(log_move)),
    )
    .service(web::resource("/").route(web::get().to(index)));
}
