//! Unit tests for the passcode service

use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::time::Duration;

use crate::domain::entities::otp_code::{ValidationOutcome, MAX_TTL_SECONDS};
use crate::errors::{DomainError, StoreError, ValidationError};
use crate::services::otp::{OtpService, OtpServiceConfig};

use super::mocks::MockOtpStore;

fn service_with(store: Arc<MockOtpStore>) -> OtpService<MockOtpStore> {
    OtpService::new(store, OtpServiceConfig::default()).unwrap()
}

/// A six-digit code guaranteed to differ from `code`
fn other_code(code: &str) -> String {
    if code == "000000" {
        "000001".to_string()
    } else {
        "000000".to_string()
    }
}

#[tokio::test]
async fn test_generate_success() {
    let store = Arc::new(MockOtpStore::new());
    let service = service_with(store.clone());

    let result = service.generate("u1").await.unwrap();
    assert_eq!(result.otp_code.user_id, "u1");
    assert_eq!(result.otp_code.code.len(), 6);
    assert!(result.otp_code.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(result.expires_in_seconds, 300);

    // Stored under prefix + identifier
    assert_eq!(store.raw_value("otp:u1"), Some(result.otp_code.code.clone()));
}

#[tokio::test]
async fn test_generate_uses_configured_length_ttl_and_prefix() {
    let store = Arc::new(MockOtpStore::new());
    let config = OtpServiceConfig::new(8, 60, "login:");
    let service = OtpService::new(store.clone(), config).unwrap();

    let result = service.generate("alice").await.unwrap();
    assert_eq!(result.otp_code.code.len(), 8);
    assert_eq!(result.expires_in_seconds, 60);
    assert!(store.contains("login:alice"));
}

#[tokio::test]
async fn test_round_trip_validates() {
    let store = Arc::new(MockOtpStore::new());
    let service = service_with(store.clone());

    let code = service.generate("u1").await.unwrap().otp_code.code;
    let result = service.validate("u1", &code).await.unwrap();

    assert!(result.valid);
    assert_eq!(result.outcome, ValidationOutcome::Valid);
    assert_eq!(result.message, "otp valid");
    assert!(!store.contains("otp:u1"));
}

#[tokio::test]
async fn test_code_is_single_use() {
    let store = Arc::new(MockOtpStore::new());
    let service = service_with(store);

    let code = service.generate("u1").await.unwrap().otp_code.code;
    assert!(service.validate("u1", &code).await.unwrap().valid);

    let replay = service.validate("u1", &code).await.unwrap();
    assert!(!replay.valid);
    assert_eq!(replay.message, "otp not found or expired");
}

#[tokio::test]
async fn test_wrong_code_keeps_record_for_retry() {
    let store = Arc::new(MockOtpStore::new());
    let service = service_with(store.clone());

    let code = service.generate("u1").await.unwrap().otp_code.code;
    let wrong = service.validate("u1", &other_code(&code)).await.unwrap();
    assert!(!wrong.valid);
    assert_eq!(wrong.outcome, ValidationOutcome::Mismatch);
    assert_eq!(wrong.message, "invalid otp");
    assert!(store.contains("otp:u1"));

    // Correct attempt within the TTL still succeeds
    assert!(service.validate("u1", &code).await.unwrap().valid);
}

#[tokio::test]
async fn test_regenerate_invalidates_previous_code() {
    let store = Arc::new(MockOtpStore::new());
    let service = service_with(store);

    let first = service.generate("u1").await.unwrap().otp_code.code;
    let mut second = service.generate("u1").await.unwrap().otp_code.code;
    // Codes can collide by chance; draw until they differ
    while second == first {
        second = service.generate("u1").await.unwrap().otp_code.code;
    }

    let stale = service.validate("u1", &first).await.unwrap();
    assert!(!stale.valid);
    assert_eq!(stale.message, "invalid otp");

    assert!(service.validate("u1", &second).await.unwrap().valid);
}

#[tokio::test]
async fn test_unknown_identifier_not_found() {
    let service = service_with(Arc::new(MockOtpStore::new()));

    let result = service.validate("never-generated", "123456").await.unwrap();
    assert!(!result.valid);
    assert_eq!(result.outcome, ValidationOutcome::NotFound);
    assert_eq!(result.message, "otp not found or expired");
}

#[tokio::test]
async fn test_codes_are_scoped_per_identifier() {
    let service = service_with(Arc::new(MockOtpStore::new()));

    let code = service.generate("u1").await.unwrap().otp_code.code;
    let result = service.validate("u2", &code).await.unwrap();
    assert_eq!(result.outcome, ValidationOutcome::NotFound);
}

#[tokio::test(start_paused = true)]
async fn test_expired_code_looks_like_consumed_code() {
    let service = service_with(Arc::new(MockOtpStore::new()));

    let expired = service.generate("u1").await.unwrap().otp_code.code;
    tokio::time::advance(Duration::from_secs(301)).await;
    let after_expiry = service.validate("u1", &expired).await.unwrap();

    let consumed = service.generate("u2").await.unwrap().otp_code.code;
    service.validate("u2", &consumed).await.unwrap();
    let after_consume = service.validate("u2", &consumed).await.unwrap();

    assert!(!after_expiry.valid);
    assert_eq!(after_expiry, after_consume);
}

#[tokio::test]
async fn test_missing_fields_rejected_before_store_access() {
    let store = Arc::new(MockOtpStore::new());
    let service = service_with(store.clone());

    let err = service.validate("", "123456").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredField { ref field }) if field == "user_id"
    ));

    let err = service.validate("u1", "").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredField { ref field }) if field == "otp"
    ));

    let err = service.generate("").await.unwrap_err();
    assert!(err.is_client_error());

    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_generate_store_failure_is_internal() {
    let service = service_with(Arc::new(MockOtpStore::failing_all()));

    let err = service.generate("u1").await.unwrap_err();
    assert!(err.is_internal());
    assert!(matches!(err, DomainError::Store(StoreError::Unavailable { .. })));
}

#[tokio::test]
async fn test_validate_read_failure_is_internal() {
    let store = Arc::new(MockOtpStore::new());
    let service = service_with(store.clone());
    service.generate("u1").await.unwrap();

    store.fail_get.store(true, Ordering::SeqCst);
    let err = service.validate("u1", "123456").await.unwrap_err();
    assert!(matches!(err, DomainError::Store(_)));
}

#[tokio::test]
async fn test_delete_failure_does_not_downgrade_match() {
    let store = Arc::new(MockOtpStore::new());
    let service = service_with(store.clone());
    let code = service.generate("u1").await.unwrap().otp_code.code;

    store.fail_delete.store(true, Ordering::SeqCst);
    let result = service.validate("u1", &code).await.unwrap();
    assert!(result.valid);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let store = Arc::new(MockOtpStore::new());

    let zero_length = OtpServiceConfig::new(0, 300, "otp:");
    assert!(matches!(
        OtpService::new(store.clone(), zero_length),
        Err(DomainError::Config { .. })
    ));

    let zero_ttl = OtpServiceConfig::new(6, 0, "otp:");
    assert!(matches!(
        OtpService::new(store.clone(), zero_ttl),
        Err(DomainError::Config { .. })
    ));

    let too_long = OtpServiceConfig::new(19, 300, "otp:");
    assert!(matches!(
        OtpService::new(store.clone(), too_long),
        Err(DomainError::Config { .. })
    ));
}

#[tokio::test]
async fn test_ttl_above_one_year_rejected() {
    let store = Arc::new(MockOtpStore::new());

    let huge_ttl = OtpServiceConfig::new(6, 10_000_000_000_000, "otp:");
    assert!(matches!(
        OtpService::new(store.clone(), huge_ttl),
        Err(DomainError::Config { .. })
    ));

    let one_year = OtpServiceConfig::new(6, MAX_TTL_SECONDS, "otp:");
    let service = OtpService::new(store, one_year).unwrap();
    let result = service.generate("u1").await.unwrap();
    assert_eq!(result.expires_in_seconds, MAX_TTL_SECONDS);
}

#[test]
fn test_constant_time_compare() {
    assert!(OtpService::<MockOtpStore>::constant_time_compare("123456", "123456"));
    assert!(!OtpService::<MockOtpStore>::constant_time_compare("123456", "123457"));
    assert!(!OtpService::<MockOtpStore>::constant_time_compare("123456", "023456"));
    assert!(!OtpService::<MockOtpStore>::constant_time_compare("123456", "12345"));
    assert!(!OtpService::<MockOtpStore>::constant_time_compare("123456", ""));
}
