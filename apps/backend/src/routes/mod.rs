use actix_web::web;

pub mod games;
pub mod health;
pub mod realtime;

/// Registers every route. `main.rs` and the test app builder share this so
/// tests exercise the same paths the server exposes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Games: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // WebSocket upgrade: /ws
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
