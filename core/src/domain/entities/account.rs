//! Company account entity and its sanitized view.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role carried by an account and its session tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Company,
    Member,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Company => "company",
            AccountRole::Member => "member",
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(AccountRole::Company),
            "member" => Ok(AccountRole::Member),
            other => Err(format!("Unknown account role: {}", other)),
        }
    }
}

/// Profile fields supplied at sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub role: AccountRole,
    pub password_hash: String,

    /// SHA-256 hex of the outstanding reset token
    pub reset_token_hash: Option<String>,
    pub reset_token_issued_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build a company account from sign-up fields and an already computed hash
    pub fn company(fields: &NewAccount, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: fields.email.clone(),
            name: fields.name.clone(),
            address: fields.address.clone(),
            city: fields.city.clone(),
            state: fields.state.clone(),
            role: AccountRole::Company,
            password_hash,
            reset_token_hash: None,
            reset_token_issued_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn issue_reset_token(&mut self, token_hash: String, issued_at: DateTime<Utc>) {
        self.reset_token_hash = Some(token_hash);
        self.reset_token_issued_at = Some(issued_at);
        self.updated_at = issued_at;
    }

    pub fn clear_reset_token(&mut self) {
        self.reset_token_hash = None;
        self.reset_token_issued_at = None;
        self.updated_at = Utc::now();
    }

    /// A reset token with no issuance time counts as expired
    pub fn reset_token_expired_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match self.reset_token_issued_at {
            Some(issued_at) => now.signed_duration_since(issued_at) > window,
            None => true,
        }
    }

    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    pub fn view(&self) -> AccountView {
        AccountView::from(self)
    }
}

/// Account as returned to clients: no password or reset fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            address: account.address.clone(),
            city: account.city.clone(),
            state: account.state.clone(),
            role: account.role,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> NewAccount {
        NewAccount {
            name: "Acme Research Ltd".to_string(),
            email: "owner@acme.com".to_string(),
            address: "1 Main Street".to_string(),
            city: "Lagos".to_string(),
            state: "Lagos".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_company_account() {
        let account = Account::company(&fields(), "hash".to_string());
        assert_eq!(account.role, AccountRole::Company);
        assert_eq!(account.email, "owner@acme.com");
        assert!(account.reset_token_hash.is_none());
    }

    #[test]
    fn test_view_has_no_secrets() {
        let mut account = Account::company(&fields(), "hash".to_string());
        account.issue_reset_token("abc".to_string(), Utc::now());
        let value = serde_json::to_value(account.view()).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("resetTokenHash").is_none());
        assert_eq!(value["role"], "company");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_reset_token_lifecycle() {
        let mut account = Account::company(&fields(), "hash".to_string());
        let window = Duration::minutes(30);
        let issued = Utc::now();
        assert!(account.reset_token_expired_at(issued, window));

        account.issue_reset_token("abc".to_string(), issued);
        assert!(!account.reset_token_expired_at(issued + window, window));
        assert!(account.reset_token_expired_at(issued + window + Duration::seconds(1), window));

        account.clear_reset_token();
        assert!(account.reset_token_hash.is_none());
        assert!(account.reset_token_issued_at.is_none());
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("member".parse::<AccountRole>(), Ok(AccountRole::Member));
        assert_eq!(AccountRole::Company.to_string(), "company");
        assert!("admin".parse::<AccountRole>().is_err());
    }
}
