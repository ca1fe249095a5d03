pub mod question;
pub mod quiz_result;
pub use question::{AnswerSubmission, Question};
pub use quiz_result::QuizResult;
