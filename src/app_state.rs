use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoResultRepository, ResultRepository},
    services::{HttpQuestionService, QuestionService, QuizSessionService, ResultsService},
};

/// The wired-up collaborators a UI shell needs. Built once at startup and
/// cloned freely.
#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<dyn QuestionService>,
    pub results_service: Arc<ResultsService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Production wiring: HTTP question API and MongoDB result store.
    pub async fn new(config: Config) -> AppResult<Self> {
        config.validate()?;
        let db = Database::connect(&config).await?;

        let result_repository = Arc::new(MongoResultRepository::new(&db, &config));
        result_repository.ensure_indexes().await?;

        let question_service = Arc::new(HttpQuestionService::new(&config)?);
        Ok(Self::from_parts(config, question_service, result_repository))
    }

    pub fn from_parts(
        config: Config,
        question_service: Arc<dyn QuestionService>,
        result_repository: Arc<dyn ResultRepository>,
    ) -> Self {
        let results_service = Arc::new(ResultsService::new(result_repository));
        Self {
            question_service,
            results_service,
            config: Arc::new(config),
        }
    }

    /// A fresh session controller sharing this state's collaborators.
    pub fn new_session(&self) -> QuizSessionService {
        QuizSessionService::new(
            self.question_service.clone(),
            self.results_service.clone(),
            self.config.total_questions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryResultRepository;
    use crate::services::question_service::MockQuestionService;
    use crate::services::SessionPhase;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn new_session_uses_configured_question_count() {
        let config = Config {
            total_questions: 5,
            ..Config::test_config()
        };
        let state = AppState::from_parts(
            config,
            Arc::new(MockQuestionService::new()),
            Arc::new(InMemoryResultRepository::new()),
        );

        let session = state.new_session();
        assert_eq!(session.total_questions(), 5);
        assert_eq!(session.snapshot().phase, SessionPhase::NotStarted);
    }
}
