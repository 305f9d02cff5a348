use actix_web::{error::InternalError, web, HttpResponse};
use otp_core::errors::DomainError;
use otp_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Message returned when a generate request body is unusable
pub const GENERATE_USAGE: &str = "userId is required (provide JSON body)";

/// Message returned when a validate request body is unusable
pub const VALIDATE_USAGE: &str = "userId and otp are required (provide JSON body)";

/// 400 for a body that could not be decoded
pub fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
}

/// 400 for a decoded body with missing or empty fields
fn validation_error(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
}

/// 400 naming the request fields that failed validation
pub fn invalid_fields(message: &str, errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<&'static str> = errors
        .field_errors()
        .keys()
        .map(|field| json_field_name(*field))
        .collect();
    fields.sort_unstable();

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, message).add_detail("fields", fields),
    )
}

fn json_field_name(field: &'static str) -> &'static str {
    match field {
        "user_id" => "userId",
        other => other,
    }
}

/// Map a service error to an HTTP response
///
/// Validation failures reuse the endpoint's usage message. Everything else is
/// a 500 with an opaque body; the cause is logged here and never sent to the
/// caller.
pub fn handle_domain_error(error: DomainError, usage: &str) -> HttpResponse {
    if error.is_client_error() {
        tracing::debug!(error = %error, "Rejected request");
        return validation_error(usage);
    }

    tracing::error!(error = %error, event = "request_failed", "Passcode operation failed");
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "internal server error",
    ))
}

/// JSON extractor settings for an endpoint
///
/// Any body that fails to decode (empty, malformed, wrong types, unknown
/// fields) becomes a 400 carrying `usage`. The content type is not checked.
pub fn json_config(usage: &'static str) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(4096)
        .content_type_required(false)
        .error_handler(move |err, _req| {
            tracing::debug!(error = %err, "Malformed request body");
            InternalError::from_response(err, bad_request(usage)).into()
        })
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::new(
        error_codes::METHOD_NOT_ALLOWED,
        "method not allowed",
    ))
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
