//! JSON response envelope shared by every endpoint

use serde::{Deserialize, Serialize};

/// Response status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// `{status, message, body?}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying `body`
    pub fn success(message: impl Into<String>, body: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            body: Some(body),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Extract the body, consuming the response
    pub fn into_body(self) -> Option<T> {
        self.body
    }

    /// Map the body to a different type
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            status: self.status,
            message: self.message,
            body: self.body.map(f),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without a body
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            body: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            body: None,
        }
    }
}
