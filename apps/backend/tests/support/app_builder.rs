use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use tilegame::middleware::request_trace::RequestTrace;
use tilegame::middleware::structured_logger::StructuredLogger;
use tilegame::routes;
use tilegame::state::app_state::AppState;

/// Builds an in-process service with the production routes and the same
/// tracing middleware `main.rs` installs. CORS is left out.
pub async fn create_test_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(state)
            .configure(routes::configure),
    )
    .await
}

/// Fresh state with the default configuration.
pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::default())
}
