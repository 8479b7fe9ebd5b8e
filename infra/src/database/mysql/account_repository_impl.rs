//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use survey_core::domain::entities::account::{Account, AccountRole};
use survey_core::errors::DomainError;
use survey_core::repositories::AccountRepository;

use super::{column_error, db_error, is_unique_violation, parse_uuid};

const ACCOUNT_COLUMNS: &str = "id, email, name, address, city, state, role, password_hash, \
     reset_token_hash, reset_token_issued_at, created_at, updated_at";

pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let role: String = row.try_get("role").map_err(column_error("role"))?;

        Ok(Account {
            id: parse_uuid(&id, "accounts.id")?,
            email: row.try_get("email").map_err(column_error("email"))?,
            name: row.try_get("name").map_err(column_error("name"))?,
            address: row.try_get("address").map_err(column_error("address"))?,
            city: row.try_get("city").map_err(column_error("city"))?,
            state: row.try_get("state").map_err(column_error("state"))?,
            role: role
                .parse::<AccountRole>()
                .map_err(|message| DomainError::Internal { message })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            reset_token_hash: row
                .try_get("reset_token_hash")
                .map_err(column_error("reset_token_hash"))?,
            reset_token_issued_at: row
                .try_get::<Option<DateTime<Utc>>, _>("reset_token_issued_at")
                .map_err(column_error("reset_token_issued_at"))?,
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
            updated_at: row.try_get("updated_at").map_err(column_error("updated_at"))?,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE {} = ? LIMIT 1", ACCOUNT_COLUMNS, filter);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find account"))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        self.find_one("reset_token_hash", token_hash.to_string()).await
    }

    async fn create_and_consume_token(
        &self,
        account: Account,
        token_id: Uuid,
    ) -> Result<Account, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO accounts (
                id, email, name, address, city, state, role, password_hash,
                reset_token_hash, reset_token_issued_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(account.id.to_string())
        .bind(&account.email)
        .bind(&account.name)
        .bind(&account.address)
        .bind(&account.city)
        .bind(&account.state)
        .bind(account.role.as_str())
        .bind(&account.password_hash)
        .bind(&account.reset_token_hash)
        .bind(account.reset_token_issued_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            // Dropping `tx` rolls back
            if is_unique_violation(&e) {
                return Err(DomainError::Conflict {
                    message: "Account email already registered".to_string(),
                });
            }
            return Err(db_error("Failed to insert account")(e));
        }

        sqlx::query("DELETE FROM verification_tokens WHERE id = ?")
            .bind(token_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete verification token"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit sign-up"))?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                email = ?, name = ?, address = ?, city = ?, state = ?, role = ?,
                password_hash = ?, reset_token_hash = ?, reset_token_issued_at = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.email)
        .bind(&account.name)
        .bind(&account.address)
        .bind(&account.city)
        .bind(&account.state)
        .bind(account.role.as_str())
        .bind(&account.password_hash)
        .bind(&account.reset_token_hash)
        .bind(account.reset_token_issued_at)
        .bind(account.updated_at)
        .bind(account.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict {
                    message: "Account email already registered".to_string(),
                }
            } else {
                db_error("Failed to update account")(e)
            }
        })?;

        // MySQL reports matched-but-unchanged rows as 0 affected, so confirm existence
        if result.rows_affected() == 0 && self.find_by_id(account.id).await?.is_none() {
            return Err(DomainError::NotFound {
                message: "Account not found".to_string(),
            });
        }

        Ok(account)
    }

    async fn consume_reset_token(
        &self,
        account: Account,
        token_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        // The hash condition makes concurrent resets with one token race to a single winner
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                password_hash = ?, reset_token_hash = NULL, reset_token_issued_at = NULL,
                updated_at = ?
            WHERE id = ? AND reset_token_hash = ?
            "#,
        )
        .bind(&account.password_hash)
        .bind(account.updated_at)
        .bind(account.id.to_string())
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to consume reset token"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Account {
            reset_token_hash: None,
            reset_token_issued_at: None,
            ..account
        }))
    }
}
