//! MySQL implementation of the VerificationTokenRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use survey_core::domain::entities::verification_token::VerificationToken;
use survey_core::errors::DomainError;
use survey_core::repositories::VerificationTokenRepository;

use super::{column_error, db_error, parse_uuid};

pub struct MySqlVerificationTokenRepository {
    pool: MySqlPool,
}

impl MySqlVerificationTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &MySqlRow) -> Result<VerificationToken, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        Ok(VerificationToken {
            id: parse_uuid(&id, "verification_tokens.id")?,
            email: row.try_get("email").map_err(column_error("email"))?,
            code: row.try_get("code").map_err(column_error("code"))?,
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
        })
    }
}

#[async_trait]
impl VerificationTokenRepository for MySqlVerificationTokenRepository {
    async fn create(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        sqlx::query(
            "INSERT INTO verification_tokens (id, email, code, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(token.id.to_string())
        .bind(&token.email)
        .bind(&token.code)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to save verification token"))?;

        Ok(token)
    }

    async fn find_by_email_and_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, code, created_at
            FROM verification_tokens
            WHERE email = ? AND code = BINARY ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find verification token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<VerificationToken>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, email, code, created_at FROM verification_tokens WHERE email = ? ORDER BY created_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list verification tokens"))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete verification token"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete verification tokens"))?;

        Ok(result.rows_affected())
    }
}
