//! Session token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::session::SessionClaims;
use crate::errors::TokenError;

use super::config::SessionTokenConfig;

/// Issues and verifies the signed tokens presented on authenticated routes
pub struct SessionTokenService {
    config: SessionTokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokenService {
    pub fn new(config: SessionTokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is only present when a session lifetime is configured
        validation.required_spec_claims.clear();
        validation.validate_exp = config.ttl_minutes.is_some();
        if validation.validate_exp {
            validation.set_required_spec_claims(&["exp"]);
        }
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Sign a token for `account`
    pub fn issue(&self, account: &Account) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = self
            .config
            .ttl_minutes
            .map(|minutes| (now + Duration::minutes(minutes)).timestamp());
        let claims = SessionClaims::for_account(account, now.timestamp(), &self.config.issuer, expires_at);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "session_token_encode_failed", "Failed to sign session token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Decode and validate a token, returning its claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        use jsonwebtoken::errors::ErrorKind;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
                ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
                    claim: claim.clone(),
                },
                ErrorKind::Json(_) => TokenError::InvalidClaims,
                _ => TokenError::InvalidTokenFormat,
            },
        )?;

        Ok(data.claims)
    }

    /// Verify a token and extract the account id from `sub`
    pub fn account_id(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.verify(token)?;
        if claims.sub.is_empty() {
            return Err(TokenError::MissingClaim {
                claim: "sub".to_string(),
            });
        }
        Uuid::parse_str(&claims.sub).map_err(|_| TokenError::InvalidClaims)
    }
}
