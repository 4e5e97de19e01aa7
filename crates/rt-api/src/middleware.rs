//! rusty-trips/crates/rt-api/src/middleware.rs Middleware
//!
//! Request logging and cross-origin policy.

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;

// Returns a standard request logger for the Rusty-Trips API.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent"
    Logger::default()
}

// Configures CORS (Cross-Origin Resource Sharing)
// The browser client sends bearer tokens, so Authorization must be allowed.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600)
}
