use actix_web::{web, App, HttpServer};
use tilegame::middleware::cors::cors_middleware;
use tilegame::middleware::request_trace::RequestTrace;
use tilegame::middleware::structured_logger::StructuredLogger;
use tilegame::{routes, telemetry, AppState, ServerConfig};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let host = config.host.clone();
    let port = config.port;
    let origins = config.cors_allowed_origins.clone();
    info!(
        host = %host,
        port,
        deck_tiles = config.default_deck.values().sum::<u32>(),
        "starting tile game server"
    );

    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
