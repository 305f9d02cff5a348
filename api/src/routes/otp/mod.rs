//! Passcode route handlers
//!
//! - `POST /generate` issues a code for an identifier
//! - `POST /validate` checks and consumes a code

pub mod generate;
pub mod validate;

use std::sync::Arc;

use otp_core::services::{OtpService, OtpStore};

pub use generate::generate;
pub use validate::validate;

/// Application state shared by every worker
pub struct AppState<C: OtpStore> {
    pub otp_service: Arc<OtpService<C>>,
}

impl<C: OtpStore> AppState<C> {
    pub fn new(otp_service: Arc<OtpService<C>>) -> Self {
        Self { otp_service }
    }
}
