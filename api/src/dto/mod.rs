//! Request and response payloads
//!
//! Request fields are optional at the serde level so that a missing field is
//! reported as `"<field>" is required` instead of a generic JSON error. Only
//! the first failing field, in declared order, is reported.

pub mod auth;
pub mod survey;

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::handlers::ApiError;

/// Ordered validation for a request payload
pub trait RequestRules: Validate {
    /// Field names in declared order
    const FIELDS: &'static [&'static str];

    /// Rules the derive cannot express
    fn extra_checks(&self, _errors: &mut ValidationErrors) {}

    fn check(&self) -> Result<(), ApiError> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        self.extra_checks(&mut errors);

        match first_error(&errors, Self::FIELDS) {
            Some(message) => Err(ApiError::Validation(message)),
            None => Ok(()),
        }
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("\"{}\" is invalid", field),
    }
}

/// Message of the first failing field in `order`, or of any failing field
/// when none of the listed names matched
pub fn first_error(errors: &ValidationErrors, order: &[&'static str]) -> Option<String> {
    let fields = errors.field_errors();
    order
        .iter()
        .find_map(|field| {
            fields
                .get(*field)
                .and_then(|errors| errors.first())
                .map(|error| describe(field, error))
        })
        .or_else(|| {
            fields
                .iter()
                .find_map(|(field, errors)| errors.first().map(|error| describe(field, error)))
        })
}

pub(crate) fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}
