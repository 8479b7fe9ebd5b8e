use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use survey_core::domain::entities::account::{AccountView, NewAccount};
use survey_shared::validation::{is_valid_email, normalize_email};

use super::{field_error, RequestRules};

const EMAIL_INVALID: &str = "\"email\" must be a valid email";

fn check_email(email: Option<&str>, errors: &mut ValidationErrors) {
    if let Some(email) = email {
        if !is_valid_email(&normalize_email(email)) {
            errors.add("email", field_error("email", EMAIL_INVALID.to_string()));
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(
        required(message = "\"name\" is required"),
        length(min = 10, max = 100, message = "\"name\" length must be between 10 and 100 characters long")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "\"address\" is required"),
        length(max = 100, message = "\"address\" length must be less than or equal to 100 characters long")
    )]
    pub address: Option<String>,

    #[validate(
        required(message = "\"state\" is required"),
        length(max = 50, message = "\"state\" length must be less than or equal to 50 characters long")
    )]
    pub state: Option<String>,

    #[validate(
        required(message = "\"city\" is required"),
        length(max = 50, message = "\"city\" length must be less than or equal to 50 characters long")
    )]
    pub city: Option<String>,

    #[validate(
        required(message = "\"verCode\" is required"),
        length(max = 6, message = "\"verCode\" length must be less than or equal to 6 characters long")
    )]
    pub ver_code: Option<String>,

    #[validate(required(message = "\"email\" is required"))]
    pub email: Option<String>,

    #[validate(
        required(message = "\"password\" is required"),
        length(min = 6, message = "\"password\" length must be at least 6 characters long")
    )]
    pub password: Option<String>,
}

impl RequestRules for SignUpRequest {
    const FIELDS: &'static [&'static str] =
        &["name", "address", "state", "city", "ver_code", "email", "password"];

    fn extra_checks(&self, errors: &mut ValidationErrors) {
        check_email(self.email.as_deref(), errors);
    }
}

impl SignUpRequest {
    /// Split into account fields and the verification code. Call after `check`.
    pub fn into_parts(self) -> (NewAccount, String) {
        let account = NewAccount {
            name: self.name.unwrap_or_default(),
            email: normalize_email(&self.email.unwrap_or_default()),
            address: self.address.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        };
        (account, self.ver_code.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "\"email\" is required"))]
    pub email: Option<String>,

    #[validate(
        required(message = "\"password\" is required"),
        length(min = 6, message = "\"password\" length must be at least 6 characters long")
    )]
    pub password: Option<String>,
}

impl RequestRules for LoginRequest {
    const FIELDS: &'static [&'static str] = &["email", "password"];

    fn extra_checks(&self, errors: &mut ValidationErrors) {
        check_email(self.email.as_deref(), errors);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(required(message = "\"email\" is required"))]
    pub email: Option<String>,
}

impl RequestRules for ForgotPasswordRequest {
    const FIELDS: &'static [&'static str] = &["email"];
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(
        required(message = "\"password\" is required"),
        length(min = 6, message = "\"password\" length must be at least 6 characters long")
    )]
    pub password: Option<String>,

    #[validate(required(message = "\"confirmPassword\" is required"))]
    pub confirm_password: Option<String>,
}

impl RequestRules for ResetPasswordRequest {
    const FIELDS: &'static [&'static str] = &["password", "confirm_password"];
}

/// Body of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_data: AccountView,
}

/// Body of a successful password reset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    pub token: String,
    pub company_data: AccountView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiError;
    use serde_json::json;

    fn sign_up(value: serde_json::Value) -> SignUpRequest {
        serde_json::from_value(value).unwrap()
    }

    fn valid_sign_up() -> serde_json::Value {
        json!({
            "name": "Acme Research Ltd",
            "address": "1 Market Street",
            "state": "Lagos",
            "city": "Ikeja",
            "verCode": "A1B2C3",
            "email": "Owner@Acme.com",
            "password": "secret1"
        })
    }

    fn message(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::Validation(message)) => message,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_sign_up_passes_and_normalizes_email() {
        let request = sign_up(valid_sign_up());
        assert!(request.check().is_ok());

        let (account, code) = request.into_parts();
        assert_eq!(account.email, "owner@acme.com");
        assert_eq!(code, "A1B2C3");
    }

    #[test]
    fn test_missing_field_is_reported_by_name() {
        let mut body = valid_sign_up();
        body.as_object_mut().unwrap().remove("city");
        assert_eq!(message(sign_up(body).check()), "\"city\" is required");
    }

    #[test]
    fn test_first_failing_field_wins() {
        let mut body = valid_sign_up();
        body["name"] = json!("Acme");
        body["password"] = json!("123");
        assert_eq!(
            message(sign_up(body).check()),
            "\"name\" length must be between 10 and 100 characters long"
        );
    }

    #[test]
    fn test_email_top_level_domain_is_restricted() {
        let mut body = valid_sign_up();
        body["email"] = json!("owner@acme.org");
        body["password"] = json!("1");
        assert_eq!(message(sign_up(body).check()), EMAIL_INVALID);
    }

    #[test]
    fn test_login_rules() {
        let request: LoginRequest =
            serde_json::from_value(json!({"email": "owner@acme.net"})).unwrap();
        assert_eq!(message(request.check()), "\"password\" is required");

        let request: LoginRequest =
            serde_json::from_value(json!({"email": "owner@acme.net", "password": "secret1"}))
                .unwrap();
        assert!(request.check().is_ok());
    }

    #[test]
    fn test_reset_password_field_names() {
        let request: ResetPasswordRequest =
            serde_json::from_value(json!({"password": "secret1"})).unwrap();
        assert_eq!(message(request.check()), "\"confirmPassword\" is required");
    }
}
