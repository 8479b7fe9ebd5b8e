//! MySQL implementation of the AnswerRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use survey_core::domain::entities::question::Answer;
use survey_core::errors::DomainError;
use survey_core::repositories::AnswerRepository;

use super::{column_error, db_error, parse_uuid};

pub struct MySqlAnswerRepository {
    pool: MySqlPool,
}

impl MySqlAnswerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_answer(row: &MySqlRow) -> Result<Answer, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let question_id: String = row
            .try_get("question_id")
            .map_err(column_error("question_id"))?;

        Ok(Answer {
            id: parse_uuid(&id, "answers.id")?,
            question_id: parse_uuid(&question_id, "answers.question_id")?,
            text: row.try_get("text").map_err(column_error("text"))?,
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
        })
    }
}

#[async_trait]
impl AnswerRepository for MySqlAnswerRepository {
    async fn create_batch(&self, answers: Vec<Answer>) -> Result<Vec<Answer>, DomainError> {
        if answers.is_empty() {
            return Ok(answers);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        for answer in &answers {
            sqlx::query("INSERT INTO answers (id, question_id, text, created_at) VALUES (?, ?, ?, ?)")
                .bind(answer.id.to_string())
                .bind(answer.question_id.to_string())
                .bind(&answer.text)
                .bind(answer.created_at)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to insert answer"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit answers"))?;

        tracing::debug!(count = answers.len(), event = "answers_stored", "Stored answer batch");
        Ok(answers)
    }

    async fn find_by_question_ids(&self, question_ids: &[Uuid]) -> Result<Vec<Answer>, DomainError> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT id, question_id, text, created_at FROM answers WHERE question_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in question_ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");
        builder.push(" ORDER BY created_at, id");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load answers"))?;

        rows.iter().map(Self::row_to_answer).collect()
    }
}
