//! Claims carried by a session token.

use serde::{Deserialize, Serialize};

use super::account::{Account, AccountRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub role: AccountRole,
    pub iat: i64,
    pub iss: String,
    /// Only present when a session lifetime is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl SessionClaims {
    pub fn for_account(account: &Account, issued_at: i64, issuer: &str, expires_at: Option<i64>) -> Self {
        Self {
            sub: account.id.to_string(),
            email: account.email.clone(),
            role: account.role,
            iat: issued_at,
            iss: issuer.to_string(),
            exp: expires_at,
        }
    }
}
