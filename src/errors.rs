use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("User name cannot be empty")]
    InvalidUserName,

    #[error("Answer cannot be empty")]
    InvalidAnswer,

    #[error("Invalid question ID")]
    InvalidQuestionId,

    #[error("Invalid quiz data provided")]
    InvalidQuizData,

    #[error("Option is not one of the current question's answers: {0}")]
    UnknownOption(String),

    #[error("Quiz has not been started")]
    QuizNotStarted,

    #[error("Network connection is unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Server error with status code: {0}")]
    ServiceError(u16),

    #[error("Failed to decode response: {0}")]
    DecodingError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to save quiz data: {0}")]
    StorageError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidUserName => "INVALID_USER_NAME",
            AppError::InvalidAnswer => "INVALID_ANSWER",
            AppError::InvalidQuestionId => "INVALID_QUESTION_ID",
            AppError::InvalidQuizData => "INVALID_QUIZ_DATA",
            AppError::UnknownOption(_) => "UNKNOWN_OPTION",
            AppError::QuizNotStarted => "QUIZ_NOT_STARTED",
            AppError::NetworkUnavailable(_) => "NETWORK_UNAVAILABLE",
            AppError::ServiceError(_) => "SERVICE_ERROR",
            AppError::DecodingError(_) => "DECODING_ERROR",
            AppError::InvalidUrl(_) => "INVALID_URL",
            AppError::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Whether re-invoking the failed operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkUnavailable(_) | AppError::ServiceError(_) | AppError::StorageError(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::DecodingError(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::ServiceError(status.as_u16())
        } else if err.is_builder() {
            AppError::InvalidUrl(err.to_string())
        } else {
            AppError::NetworkUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DecodingError(err.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::StorageError(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::DecodingError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidUserName.error_code(), "INVALID_USER_NAME");
        assert_eq!(AppError::ServiceError(503).error_code(), "SERVICE_ERROR");
        assert_eq!(
            AppError::StorageError("disk".into()).error_code(),
            "STORAGE_ERROR"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AppError::InvalidUserName.to_string(),
            "User name cannot be empty"
        );
        assert_eq!(
            AppError::ServiceError(404).to_string(),
            "Server error with status code: 404"
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(AppError::NetworkUnavailable("down".into()).is_retryable());
        assert!(AppError::ServiceError(500).is_retryable());
        assert!(!AppError::InvalidAnswer.is_retryable());
        assert!(!AppError::DecodingError("bad".into()).is_retryable());
    }

    #[test]
    fn test_json_error_maps_to_decoding_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = err.into();
        assert_eq!(app_err.error_code(), "DECODING_ERROR");
    }
}
