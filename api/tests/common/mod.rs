//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use serde_json::{json, Value};

use survey_api::{AppState, MemoryBundle, Stores};
use survey_core::repositories::VerificationTokenRepository;
use survey_core::services::{EmailMessage, Notifier};
use survey_shared::config::AppConfig;

pub const EMAIL: &str = "owner@acme.com";
pub const PASSWORD: &str = "secret1";

/// Keeps every email instead of sending it
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<EmailMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), String> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub type Bundle = MemoryBundle<RecordingNotifier>;

pub struct TestContext {
    pub state: web::Data<AppState<Bundle>>,
    pub stores: Stores<Bundle>,
    pub notifier: RecordingNotifier,
    pub config: AppConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.bcrypt_cost = 4;
        config.auth.jwt.secret = "integration-test-secret".to_string();
        config.server.public_base_url = "http://surveys.test".to_string();

        let stores = Stores::<Bundle>::in_memory();
        let notifier = RecordingNotifier::default();
        let state = AppState::new(stores.clone(), Arc::new(notifier.clone()), &config);

        Self {
            state: web::Data::new(state),
            stores,
            notifier,
            config,
        }
    }

    /// Code of the most recent verification token for `email`
    pub async fn code_for(&self, email: &str) -> String {
        self.stores
            .tokens
            .find_by_email(email)
            .await
            .unwrap()
            .pop()
            .expect("a verification token")
            .code
    }
}

pub fn sign_up_body(email: &str, code: &str) -> Value {
    json!({
        "name": "Acme Research Ltd",
        "address": "1 Market Street",
        "state": "Lagos",
        "city": "Ikeja",
        "verCode": code,
        "email": email,
        "password": PASSWORD
    })
}

/// Build the app for a context and bind it to `$app`

macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(survey_api::create_app(
            $ctx.state.clone(),
            &$ctx.config.cors,
        ))
        .await
    };
}

/// Verify, sign up and log in; returns the session token

macro_rules! signed_up_token {
    ($app:expr, $ctx:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/verification")
            .set_json(serde_json::json!({ "email": $email }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let code = $ctx.code_for($email).await;
        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json($crate::common::sign_up_body($email, &code))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({ "email": $email, "password": $crate::common::PASSWORD }))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(&$app, req).await;
        body["body"]["token"].as_str().expect("session token").to_string()
    }};
}
