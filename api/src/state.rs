//! Service wiring shared by every handler
//!
//! A [`ServiceBundle`] names the concrete repository and notifier types for
//! one storage backend so handlers stay generic over a single parameter.

use std::marker::PhantomData;
use std::sync::Arc;

use survey_core::repositories::{
    AccountRepository, AnswerRepository, InMemoryAccountRepository, InMemoryAnswerRepository,
    InMemoryQuestionRepository, InMemorySurveyRepository, InMemoryVerificationTokenRepository,
    QuestionRepository, SurveyRepository, VerificationTokenRepository,
};
use survey_core::services::{
    AuthService, AuthServiceConfig, Notifier, SessionTokenConfig, SessionTokenService,
    SurveyService, SurveyServiceConfig, VerificationService, VerificationServiceConfig,
};
use survey_infra::EmailNotifier;
use survey_shared::config::AppConfig;

pub trait ServiceBundle: 'static {
    type Accounts: AccountRepository + 'static;
    type Tokens: VerificationTokenRepository + 'static;
    type Surveys: SurveyRepository + 'static;
    type Questions: QuestionRepository + 'static;
    type Answers: AnswerRepository + 'static;
    type Notifier: Notifier + 'static;
}

/// In-memory stores, any notifier
pub struct MemoryBundle<N = EmailNotifier>(PhantomData<N>);

impl<N: Notifier + 'static> ServiceBundle for MemoryBundle<N> {
    type Accounts = InMemoryAccountRepository;
    type Tokens = InMemoryVerificationTokenRepository;
    type Surveys = InMemorySurveyRepository;
    type Questions = InMemoryQuestionRepository;
    type Answers = InMemoryAnswerRepository;
    type Notifier = N;
}

#[cfg(feature = "mysql")]
pub use mysql::MySqlBundle;

#[cfg(feature = "mysql")]
mod mysql {
    use super::*;
    use survey_infra::database::{
        DatabasePool, MySqlAccountRepository, MySqlAnswerRepository, MySqlQuestionRepository,
        MySqlSurveyRepository, MySqlVerificationTokenRepository,
    };

    /// MySQL stores with the configured email notifier
    pub struct MySqlBundle;

    impl ServiceBundle for MySqlBundle {
        type Accounts = MySqlAccountRepository;
        type Tokens = MySqlVerificationTokenRepository;
        type Surveys = MySqlSurveyRepository;
        type Questions = MySqlQuestionRepository;
        type Answers = MySqlAnswerRepository;
        type Notifier = EmailNotifier;
    }

    impl Stores<MySqlBundle> {
        pub fn mysql(database: &DatabasePool) -> Self {
            let pool = database.get_pool().clone();
            Self {
                accounts: Arc::new(MySqlAccountRepository::new(pool.clone())),
                tokens: Arc::new(MySqlVerificationTokenRepository::new(pool.clone())),
                surveys: Arc::new(MySqlSurveyRepository::new(pool.clone())),
                questions: Arc::new(MySqlQuestionRepository::new(pool.clone())),
                answers: Arc::new(MySqlAnswerRepository::new(pool)),
            }
        }
    }
}

/// Repository handles for one backend
pub struct Stores<B: ServiceBundle> {
    pub accounts: Arc<B::Accounts>,
    pub tokens: Arc<B::Tokens>,
    pub surveys: Arc<B::Surveys>,
    pub questions: Arc<B::Questions>,
    pub answers: Arc<B::Answers>,
}

impl<B: ServiceBundle> Clone for Stores<B> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            tokens: Arc::clone(&self.tokens),
            surveys: Arc::clone(&self.surveys),
            questions: Arc::clone(&self.questions),
            answers: Arc::clone(&self.answers),
        }
    }
}

impl<N: Notifier + 'static> Stores<MemoryBundle<N>> {
    pub fn in_memory() -> Self {
        let tokens = Arc::new(InMemoryVerificationTokenRepository::new());
        Self {
            // Sign-up consumes the token in the same critical section as the insert
            accounts: Arc::new(InMemoryAccountRepository::new(Arc::clone(&tokens))),
            tokens,
            surveys: Arc::new(InMemorySurveyRepository::new()),
            questions: Arc::new(InMemoryQuestionRepository::new()),
            answers: Arc::new(InMemoryAnswerRepository::new()),
        }
    }
}

/// Application state that holds shared services
pub struct AppState<B: ServiceBundle> {
    pub verification: Arc<VerificationService<B::Accounts, B::Tokens, B::Notifier>>,
    pub auth: Arc<AuthService<B::Accounts, B::Notifier>>,
    pub surveys: Arc<SurveyService<B::Accounts, B::Surveys, B::Questions, B::Answers>>,
    pub sessions: Arc<SessionTokenService>,
}

impl<B: ServiceBundle> AppState<B> {
    pub fn new(stores: Stores<B>, notifier: Arc<B::Notifier>, config: &AppConfig) -> Self {
        let sessions = Arc::new(SessionTokenService::new(SessionTokenConfig::from(
            &config.auth.jwt,
        )));

        let verification = VerificationService::new(
            Arc::clone(&stores.accounts),
            Arc::clone(&stores.tokens),
            Arc::clone(&notifier),
            VerificationServiceConfig::from(&config.auth),
        );
        let auth = AuthService::new(
            Arc::clone(&stores.accounts),
            notifier,
            Arc::clone(&sessions),
            AuthServiceConfig::from_config(&config.auth, &config.server),
        );
        let surveys = SurveyService::new(
            stores.accounts,
            stores.surveys,
            stores.questions,
            stores.answers,
            SurveyServiceConfig::new(config.server.public_base_url.clone()),
        );

        Self {
            verification: Arc::new(verification),
            auth: Arc::new(auth),
            surveys: Arc::new(surveys),
            sessions,
        }
    }
}
