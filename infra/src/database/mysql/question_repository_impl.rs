//! MySQL implementation of the QuestionRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use survey_core::domain::entities::question::Question;
use survey_core::errors::DomainError;
use survey_core::repositories::QuestionRepository;

use super::{column_error, db_error, parse_uuid};

pub struct MySqlQuestionRepository {
    pool: MySqlPool,
}

impl MySqlQuestionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_question(row: &MySqlRow) -> Result<Question, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let survey_id: String = row.try_get("survey_id").map_err(column_error("survey_id"))?;

        Ok(Question {
            id: parse_uuid(&id, "questions.id")?,
            survey_id: parse_uuid(&survey_id, "questions.survey_id")?,
            text: row.try_get("text").map_err(column_error("text"))?,
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
        })
    }
}

#[async_trait]
impl QuestionRepository for MySqlQuestionRepository {
    async fn create(&self, question: Question) -> Result<Question, DomainError> {
        sqlx::query("INSERT INTO questions (id, survey_id, text, created_at) VALUES (?, ?, ?, ?)")
            .bind(question.id.to_string())
            .bind(question.survey_id.to_string())
            .bind(&question.text)
            .bind(question.created_at)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to insert question"))?;

        Ok(question)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Question>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT id, survey_id, text, created_at FROM questions WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load questions"))?;

        rows.iter().map(Self::row_to_question).collect()
    }
}
