use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::services::{mask_identifier, OtpStore};

use crate::dto::{GenerateRequest, GenerateResponse};
use crate::handlers::{handle_domain_error, invalid_fields, GENERATE_USAGE};

use super::AppState;

/// Handler for POST /generate
///
/// # Request Body
///
/// ```json
/// { "userId": "alice" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "userId": "alice", "otp": "042917", "expiresInSeconds": 300 }
/// ```
///
/// ## Errors
/// - 400 Bad Request: body missing, malformed, or `userId` empty
/// - 500 Internal Server Error: the code could not be stored
pub async fn generate<C>(
    state: web::Data<AppState<C>>,
    request: web::Json<GenerateRequest>,
) -> HttpResponse
where
    C: OtpStore + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::debug!(errors = %errors, "Generate request failed validation");
        return invalid_fields(GENERATE_USAGE, &errors);
    }

    tracing::debug!(user = %mask_identifier(&request.user_id), "Processing generate request");

    match state.otp_service.generate(&request.user_id).await {
        Ok(result) => HttpResponse::Ok().json(GenerateResponse::from(result)),
        Err(error) => handle_domain_error(error, GENERATE_USAGE),
    }
}
