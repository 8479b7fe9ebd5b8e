//! Survey entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: Uuid,
    pub title: String,
    /// Unique, URL-safe name derived from the title
    pub slug: String,
    pub owner_account_id: Uuid,
    /// Question references in the order they were added
    pub question_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Survey {
    pub fn new(title: impl Into<String>, slug: impl Into<String>, owner_account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            owner_account_id,
            question_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a question reference; returns `false` if it was already present
    pub fn add_question(&mut self, question_id: Uuid) -> bool {
        if self.question_ids.contains(&question_id) {
            return false;
        }
        self.question_ids.push(question_id);
        true
    }

    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.owner_account_id == account_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_question_has_set_semantics() {
        let mut survey = Survey::new("Team pulse", "team-pulse", Uuid::new_v4());
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert!(survey.add_question(first));
        assert!(survey.add_question(second));
        assert!(!survey.add_question(first));
        assert_eq!(survey.question_ids, vec![first, second]);
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let survey = Survey::new("Team pulse", "team-pulse", owner);
        assert!(survey.is_owned_by(owner));
        assert!(!survey.is_owned_by(Uuid::new_v4()));
    }
}
