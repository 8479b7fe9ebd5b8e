//! Configuration for the survey service

#[derive(Debug, Clone)]
pub struct SurveyServiceConfig {
    /// Base URL public survey links are built from
    pub public_base_url: String,
    /// Suffixes tried before giving up on a unique slug
    pub max_slug_attempts: usize,
}

impl Default for SurveyServiceConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8080".to_string(),
            max_slug_attempts: 1000,
        }
    }
}

impl SurveyServiceConfig {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            ..Default::default()
        }
    }

    pub fn survey_url(&self, slug: &str) -> String {
        format!(
            "{}/api/v1/survey/get-survey/{}",
            self.public_base_url.trim_end_matches('/'),
            slug
        )
    }
}
