//! Shared response helpers for route handlers

pub mod error;

pub use error::{
    bad_request, handle_domain_error, invalid_fields, json_config, method_not_allowed, not_found,
    GENERATE_USAGE, VALIDATE_USAGE,
};
