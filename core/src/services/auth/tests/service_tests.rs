//! Unit tests for login and password reset

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError, ErrorKind};
use crate::repositories::{
    AccountRepository, InMemoryAccountRepository, InMemoryVerificationTokenRepository,
};
use crate::services::auth::{hash_reset_token, AuthService, AuthServiceConfig};
use crate::services::password::hash_password;
use crate::services::session::{SessionTokenConfig, SessionTokenService};
use crate::services::testing::{new_account, RecordingNotifier};

struct Fixture {
    service: AuthService<InMemoryAccountRepository, RecordingNotifier>,
    accounts: Arc<InMemoryAccountRepository>,
    notifier: Arc<RecordingNotifier>,
    sessions: Arc<SessionTokenService>,
    account: Account,
}

async fn fixture_with(notifier: RecordingNotifier) -> Fixture {
    let accounts = Arc::new(InMemoryAccountRepository::new(Arc::new(
        InMemoryVerificationTokenRepository::new(),
    )));
    let hash = hash_password("secret1", 4).await.unwrap();
    let account = accounts
        .insert(Account::company(&new_account("owner@acme.com"), hash))
        .await
        .unwrap();

    let notifier = Arc::new(notifier);
    let sessions = Arc::new(SessionTokenService::new(SessionTokenConfig::default()));
    let config = AuthServiceConfig {
        bcrypt_cost: 4,
        public_base_url: "https://surveys.example.com".to_string(),
        ..Default::default()
    };
    let service = AuthService::new(accounts.clone(), notifier.clone(), sessions.clone(), config);

    Fixture {
        service,
        accounts,
        notifier,
        sessions,
        account,
    }
}

async fn fixture() -> Fixture {
    fixture_with(RecordingNotifier::new()).await
}

/// Pull the raw reset token out of the last email sent
fn raw_token_from_email(notifier: &RecordingNotifier) -> String {
    let body = notifier.last().expect("reset email sent").body;
    let marker = "/api/v1/auth/reset-password/";
    let start = body.find(marker).expect("reset url in body") + marker.len();
    body[start..start + 40].to_string()
}

fn assert_auth_error(err: DomainError, expected: AuthError) {
    match err {
        DomainError::Auth(actual) => assert_eq!(actual, expected),
        other => panic!("Expected {:?}, got {:?}", expected, other),
    }
}

#[tokio::test]
async fn test_login_success_token_decodes_to_account() {
    let f = fixture().await;

    let grant = f.service.login("OWNER@acme.com ", "secret1").await.unwrap();

    assert!(!grant.token.is_empty());
    assert_eq!(grant.account.id, f.account.id);
    assert_eq!(f.sessions.account_id(&grant.token).unwrap(), f.account.id);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let f = fixture().await;
    let err = f.service.login("owner@acme.com", "secret2").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_auth_error(err, AuthError::IncorrectPassword);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let f = fixture().await;
    let err = f.service.login("nobody@acme.com", "secret1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_auth_error(err, AuthError::AccountNotFound);
}

#[tokio::test]
async fn test_forgot_password_stores_hash_only() {
    let f = fixture().await;

    f.service.forgot_password("owner@acme.com").await.unwrap();

    let raw = raw_token_from_email(&f.notifier);
    assert_eq!(raw.len(), 40);
    let message = f.notifier.last().unwrap();
    assert_eq!(message.to, "owner@acme.com");
    assert!(message
        .body
        .contains(&format!("https://surveys.example.com/api/v1/auth/reset-password/{}", raw)));

    let stored = f.accounts.find_by_id(f.account.id).await.unwrap().unwrap();
    assert_eq!(stored.reset_token_hash.as_deref(), Some(hash_reset_token(&raw).as_str()));
    assert_ne!(stored.reset_token_hash.as_deref(), Some(raw.as_str()));
    assert!(stored.reset_token_issued_at.is_some());
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let f = fixture().await;
    let err = f.service.forgot_password("nobody@acme.com").await.unwrap_err();
    assert_auth_error(err, AuthError::AccountNotFound);
    assert!(f.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_forgot_password_notification_failure_clears_token() {
    let f = fixture_with(RecordingNotifier::failing()).await;

    let err = f.service.forgot_password("owner@acme.com").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Internal);
    let stored = f.accounts.find_by_id(f.account.id).await.unwrap().unwrap();
    assert!(stored.reset_token_hash.is_none());
}

#[tokio::test]
async fn test_reset_password_succeeds_once() {
    let f = fixture().await;
    f.service.forgot_password("owner@acme.com").await.unwrap();
    let raw = raw_token_from_email(&f.notifier);

    let grant = f
        .service
        .reset_password(&raw, "newsecret", "newsecret")
        .await
        .unwrap();
    assert_eq!(f.sessions.account_id(&grant.token).unwrap(), f.account.id);

    let stored = f.accounts.find_by_id(f.account.id).await.unwrap().unwrap();
    assert!(stored.reset_token_hash.is_none());
    assert!(stored.reset_token_issued_at.is_none());
    assert!(f.service.login("owner@acme.com", "newsecret").await.is_ok());
    assert!(f.service.login("owner@acme.com", "secret1").await.is_err());

    let replay = f
        .service
        .reset_password(&raw, "another1", "another1")
        .await
        .unwrap_err();
    assert_auth_error(replay, AuthError::InvalidResetToken);
}

#[tokio::test]
async fn test_reset_password_unknown_token() {
    let f = fixture().await;
    let err = f
        .service
        .reset_password("deadbeef", "newsecret", "newsecret")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_auth_error(err, AuthError::InvalidResetToken);
}

#[tokio::test]
async fn test_reset_password_expired_clears_token() {
    let f = fixture().await;
    f.service.forgot_password("owner@acme.com").await.unwrap();
    let raw = raw_token_from_email(&f.notifier);

    let mut stored = f.accounts.find_by_id(f.account.id).await.unwrap().unwrap();
    stored.reset_token_issued_at = Some(Utc::now() - Duration::minutes(31));
    f.accounts.update(stored).await.unwrap();

    let err = f
        .service
        .reset_password(&raw, "newsecret", "newsecret")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Expired);
    assert_auth_error(err, AuthError::ResetTokenExpired);

    let stored = f.accounts.find_by_id(f.account.id).await.unwrap().unwrap();
    assert!(stored.reset_token_hash.is_none());

    let retry = f
        .service
        .reset_password(&raw, "newsecret", "newsecret")
        .await
        .unwrap_err();
    assert_auth_error(retry, AuthError::InvalidResetToken);
}

#[tokio::test]
async fn test_reset_password_mismatch_keeps_token() {
    let f = fixture().await;
    f.service.forgot_password("owner@acme.com").await.unwrap();
    let raw = raw_token_from_email(&f.notifier);

    let err = f
        .service
        .reset_password(&raw, "newsecret", "different")
        .await
        .unwrap_err();
    assert_auth_error(err, AuthError::PasswordMismatch);

    assert!(f
        .service
        .reset_password(&raw, "newsecret", "newsecret")
        .await
        .is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resets_with_one_token_succeed_once() {
    let f = fixture().await;
    f.service.forgot_password("owner@acme.com").await.unwrap();
    let raw = raw_token_from_email(&f.notifier);

    let (first, second) = tokio::join!(
        f.service.reset_password(&raw, "newsecret", "newsecret"),
        f.service.reset_password(&raw, "another1", "another1"),
    );

    let (winner_password, loser) = match (first, second) {
        (Ok(_), Err(err)) => ("newsecret", err),
        (Err(err), Ok(_)) => ("another1", err),
        (first, second) => panic!("expected exactly one success: {:?} / {:?}", first.is_ok(), second.is_ok()),
    };
    assert_auth_error(loser, AuthError::InvalidResetToken);
    assert!(f.service.login("owner@acme.com", winner_password).await.is_ok());
}
