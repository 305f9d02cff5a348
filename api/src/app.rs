//! Application factory
//!
//! Builds the Actix-web application around a shared passcode service.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use otp_core::services::OtpStore;

use crate::handlers::{json_config, method_not_allowed, not_found, GENERATE_USAGE, VALIDATE_USAGE};
use crate::routes::otp::{generate, validate, AppState};

/// Create and configure the application
pub fn create_app<C>(
    app_state: web::Data<AppState<C>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    C: OtpStore + 'static,
{
    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        // Liveness probe
        .route("/healthz", web::get().to(health_check))
        .route("/", web::get().to(api_documentation))
        .service(
            web::resource("/generate")
                .app_data(json_config(GENERATE_USAGE))
                .route(web::post().to(generate::<C>))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/validate")
                .app_data(json_config(VALIDATE_USAGE))
                .route(web::post().to(validate::<C>))
                .default_service(web::to(method_not_allowed)),
        )
        .default_service(web::to(not_found))
}

/// Health check endpoint handler
///
/// Reports process liveness only; the store is not consulted.
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body("ok")
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "OtpGate API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": {
                "path": "/healthz",
                "method": "GET",
                "description": "Liveness probe, answers \"ok\""
            },
            "generate": {
                "path": "/generate",
                "method": "POST",
                "description": "Issue a one-time passcode for an identifier",
                "request_body": {
                    "userId": "string (non-empty)"
                },
                "responses": {
                    "200": "Code issued, returns userId, otp and expiresInSeconds",
                    "400": "Missing or malformed body",
                    "500": "Code could not be stored"
                }
            },
            "validate": {
                "path": "/validate",
                "method": "POST",
                "description": "Check and consume a one-time passcode",
                "request_body": {
                    "userId": "string (non-empty)",
                    "otp": "string (non-empty)"
                },
                "responses": {
                    "200": "Outcome in valid and message",
                    "400": "Missing or malformed body",
                    "500": "Store could not be read"
                }
            }
        }
    }))
}
