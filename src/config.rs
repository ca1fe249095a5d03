use std::env;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_TOTAL_QUESTIONS: i32 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub total_questions: i32,
    pub request_timeout_secs: u64,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub results_collection: String,
}

impl Config {
    /// Reads configuration from the process environment, loading a `.env`
    /// file first when one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("QUIZ_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            total_questions: env::var("QUIZ_TOTAL_QUESTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_TOTAL_QUESTIONS),
            request_timeout_secs: env::var("QUIZ_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quizline-local".to_string()),
            results_collection: env::var("RESULTS_COLLECTION")
                .unwrap_or_else(|_| "quiz_results".to_string()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rejects values the session and client cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if self.total_questions <= 0 {
            return Err(AppError::InvalidQuizData);
        }
        if reqwest::Url::parse(&self.api_base_url).is_err() {
            return Err(AppError::InvalidUrl(self.api_base_url.clone()));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3000".to_string(),
            total_questions: DEFAULT_TOTAL_QUESTIONS,
            request_timeout_secs: 5,
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizline-test".to_string(),
            results_collection: "quiz_results".to_string(),
        }
    }
}
