//! # rt-api
//!
//! The web routing layer for Rusty-Trips.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::{error::JsonPayloadError, error::PathError, web, HttpRequest};
use error::ApiError;
use rt_core::error::AppError;

/// Configures the trip and activity routes.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed (e.g., /api/v1/).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/trips")
                .route("", web::get().to(handlers::list_trips))
                .route("", web::post().to(handlers::create_trip))
                .route("/{id}", web::get().to(handlers::show_trip))
                .route("/{id}", web::patch().to(handlers::update_trip))
                .route("/{id}", web::delete().to(handlers::delete_trip))
                .route("/{id}/activities", web::get().to(handlers::list_activities))
                .route("/{id}/activities", web::post().to(handlers::create_activity))
                .route("/{id}/activities/{aid}", web::get().to(handlers::show_activity))
                .route("/{id}/activities/{aid}", web::patch().to(handlers::update_activity))
                .route("/{id}/activities/{aid}", web::delete().to(handlers::delete_activity)),
        );
}

// Unreadable bodies are client validation errors.
fn json_error(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError(AppError::ValidationError(err.to_string())).into()
}

// An id that is not a UUID can't name any resource.
fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("unparsable path {}: {err}", req.path());
    ApiError(AppError::NotFound("Resource".to_string(), req.path().to_string())).into()
}
