use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};

/// Body of `POST /answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Name entered on the welcome step, trimmed before validation.
#[derive(Debug, Clone, Validate)]
pub struct StartQuizRequest {
    #[validate(length(min = 2, max = 50))]
    pub user_name: String,
}

impl StartQuizRequest {
    pub fn new(user_name: &str) -> Self {
        Self {
            user_name: user_name.trim().to_string(),
        }
    }
}

/// Checks a welcome-step name and returns it trimmed.
pub fn validate_user_name(user_name: &str) -> AppResult<String> {
    let request = StartQuizRequest::new(user_name);
    request.validate().map_err(|_| AppError::InvalidUserName)?;
    Ok(request.user_name)
}
