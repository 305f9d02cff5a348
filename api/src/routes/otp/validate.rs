use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::services::{mask_identifier, OtpStore};

use crate::dto::{ValidateRequest, ValidateResponse};
use crate::handlers::{handle_domain_error, invalid_fields, VALIDATE_USAGE};

use super::AppState;

/// Handler for POST /validate
///
/// Answers 200 for every decided outcome; `valid` tells the caller whether
/// the code was accepted.
///
/// # Request Body
///
/// ```json
/// { "userId": "alice", "otp": "042917" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "valid": true, "message": "otp valid" }
/// ```
/// ```json
/// { "valid": false, "message": "invalid otp" }
/// ```
/// ```json
/// { "valid": false, "message": "otp not found or expired" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: body missing, malformed, or a field empty
/// - 500 Internal Server Error: the store could not be read
pub async fn validate<C>(
    state: web::Data<AppState<C>>,
    request: web::Json<ValidateRequest>,
) -> HttpResponse
where
    C: OtpStore + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::debug!(errors = %errors, "Validate request failed validation");
        return invalid_fields(VALIDATE_USAGE, &errors);
    }

    tracing::debug!(user = %mask_identifier(&request.user_id), "Processing validate request");

    match state
        .otp_service
        .validate(&request.user_id, &request.otp)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ValidateResponse::from(result)),
        Err(error) => handle_domain_error(error, VALIDATE_USAGE),
    }
}
