use actix_cors::Cors;
use actix_web::http::header;

use super::request_trace::TRACE_HEADER;

const LOCALHOST_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// CORS for the browser client: explicit origins only, falling back to
/// localhost dev servers when none are configured.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static(TRACE_HEADER)])
        .max_age(3600);

    if allowed_origins.is_empty() {
        for origin in LOCALHOST_ORIGINS {
            cors = cors.allowed_origin(origin);
        }
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
