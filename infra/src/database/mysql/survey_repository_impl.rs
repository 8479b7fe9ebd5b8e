//! MySQL implementation of the SurveyRepository trait.
//!
//! Question references live in `survey_questions`, ordered by `position`.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use survey_core::domain::entities::survey::Survey;
use survey_core::errors::DomainError;
use survey_core::repositories::SurveyRepository;

use super::{column_error, db_error, is_unique_violation, parse_uuid};

pub struct MySqlSurveyRepository {
    pool: MySqlPool,
}

impl MySqlSurveyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_survey(row: &MySqlRow) -> Result<Survey, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let owner: String = row
            .try_get("owner_account_id")
            .map_err(column_error("owner_account_id"))?;

        Ok(Survey {
            id: parse_uuid(&id, "surveys.id")?,
            title: row.try_get("title").map_err(column_error("title"))?,
            slug: row.try_get("slug").map_err(column_error("slug"))?,
            owner_account_id: parse_uuid(&owner, "surveys.owner_account_id")?,
            question_ids: Vec::new(),
            created_at: row.try_get("created_at").map_err(column_error("created_at"))?,
        })
    }

    async fn load_question_ids(&self, survey: &mut Survey) -> Result<(), DomainError> {
        let rows = sqlx::query(
            "SELECT question_id FROM survey_questions WHERE survey_id = ? ORDER BY position",
        )
        .bind(survey.id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load survey questions"))?;

        survey.question_ids = rows
            .iter()
            .map(|row| {
                let id: String = row.try_get("question_id").map_err(column_error("question_id"))?;
                parse_uuid(&id, "survey_questions.question_id")
            })
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    async fn fetch_one(&self, query: &str, value: String) -> Result<Option<Survey>, DomainError> {
        let row = sqlx::query(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find survey"))?;

        match row {
            Some(row) => {
                let mut survey = Self::row_to_survey(&row)?;
                self.load_question_ids(&mut survey).await?;
                Ok(Some(survey))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SurveyRepository for MySqlSurveyRepository {
    async fn create(&self, survey: Survey) -> Result<Survey, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        sqlx::query(
            "INSERT INTO surveys (id, title, slug, owner_account_id, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(survey.id.to_string())
        .bind(&survey.title)
        .bind(&survey.slug)
        .bind(survey.owner_account_id.to_string())
        .bind(survey.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict {
                    message: format!("Survey slug '{}' is already taken", survey.slug),
                }
            } else {
                db_error("Failed to insert survey")(e)
            }
        })?;

        for (position, question_id) in survey.question_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO survey_questions (survey_id, question_id, position) VALUES (?, ?, ?)",
            )
            .bind(survey.id.to_string())
            .bind(question_id.to_string())
            .bind(position as i64)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to insert survey question"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit survey"))?;

        Ok(survey)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM surveys WHERE slug = ?")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check survey slug"))?;

        let total: i64 = row.try_get("total").map_err(column_error("total"))?;
        Ok(total > 0)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Survey>, DomainError> {
        self.fetch_one(
            "SELECT id, title, slug, owner_account_id, created_at FROM surveys WHERE slug = ? LIMIT 1",
            slug.to_string(),
        )
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Survey>, DomainError> {
        self.fetch_one(
            "SELECT id, title, slug, owner_account_id, created_at FROM surveys WHERE id = ? LIMIT 1",
            id.to_string(),
        )
        .await
    }

    async fn find_latest_by_owner(
        &self,
        owner_account_id: Uuid,
    ) -> Result<Option<Survey>, DomainError> {
        self.fetch_one(
            r#"
            SELECT id, title, slug, owner_account_id, created_at
            FROM surveys
            WHERE owner_account_id = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            owner_account_id.to_string(),
        )
        .await
    }

    async fn append_question(&self, survey_id: Uuid, question_id: Uuid) -> Result<bool, DomainError> {
        let exists = sqlx::query("SELECT 1 FROM surveys WHERE id = ?")
            .bind(survey_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find survey"))?;

        if exists.is_none() {
            return Err(DomainError::NotFound {
                message: "Survey not found".to_string(),
            });
        }

        let result = sqlx::query(
            r#"
            INSERT IGNORE INTO survey_questions (survey_id, question_id, position)
            SELECT ?, ?, COALESCE(MAX(position) + 1, 0)
            FROM survey_questions
            WHERE survey_id = ?
            "#,
        )
        .bind(survey_id.to_string())
        .bind(question_id.to_string())
        .bind(survey_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to append survey question"))?;

        Ok(result.rows_affected() > 0)
    }
}
