#[cfg(test)]
pub mod fixtures {
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use crate::errors::{AppError, AppResult};
    use crate::models::domain::{Question, QuizResult};
    use crate::repositories::ResultRepository;

    /// A question whose options are "Option A" through "Option D".
    pub fn test_question(id: &str) -> Question {
        Question::new(
            id,
            &format!("Question {}?", id),
            vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
        )
        .expect("fixture question is well formed")
    }

    /// A 10-question result dated `hours_ago` hours in the past.
    pub fn result_at(user_name: &str, score: i32, hours_ago: i64) -> QuizResult {
        let mut result = QuizResult::new(user_name, score, score / 10, 10);
        result.date = Utc::now() - Duration::hours(hours_ago);
        result
    }

    /// Store whose reads and writes always fail.
    pub struct FailingResultRepository;

    #[async_trait]
    impl ResultRepository for FailingResultRepository {
        async fn add(&self, _result: QuizResult) -> AppResult<QuizResult> {
            Err(AppError::StorageError("write failed".into()))
        }

        async fn get_all(&self) -> AppResult<Vec<QuizResult>> {
            Err(AppError::StorageError("read failed".into()))
        }

        async fn get(&self, _id: &str) -> AppResult<Option<QuizResult>> {
            Err(AppError::StorageError("read failed".into()))
        }

        async fn count(&self) -> AppResult<usize> {
            Err(AppError::StorageError("read failed".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_question() {
        let question = test_question("q-7");
        assert_eq!(question.id, "q-7");
        assert_eq!(question.options.len(), 4);
        assert!(question.has_option("Option D"));
    }

    #[test]
    fn test_fixtures_result_ordering() {
        let newer = result_at("a", 80, 1);
        let older = result_at("b", 80, 2);
        assert!(newer.date > older.date);
        assert_eq!(newer.correct_answers, 8);
    }
}
