pub mod question_service;
pub mod quiz_session_service;
pub mod results_service;
pub mod score_service;

pub use question_service::{HttpQuestionService, QuestionService};
pub use quiz_session_service::{QuizSessionService, SessionPhase, SessionSnapshot};
pub use results_service::{ResultsService, ResultsStatistics};
pub use score_service::{PerformanceTier, ScoreService};
