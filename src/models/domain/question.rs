use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

pub const OPTIONS_PER_QUESTION: usize = 4;

/// A multiple-choice question as served by the question API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: &str, prompt: &str, options: Vec<String>) -> AppResult<Self> {
        let question = Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            options,
        };
        question.check_shape()?;
        Ok(question)
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    fn check_shape(&self) -> AppResult<()> {
        if self.id.is_empty() {
            return Err(AppError::DecodingError("question id is empty".to_string()));
        }
        if self.prompt.trim().is_empty() {
            return Err(AppError::DecodingError(format!(
                "question '{}' has an empty statement",
                self.id
            )));
        }
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(AppError::DecodingError(format!(
                "question '{}' has {} options, expected {}",
                self.id,
                self.options.len(),
                OPTIONS_PER_QUESTION
            )));
        }
        if self.options.iter().any(|o| o.is_empty()) {
            return Err(AppError::DecodingError(format!(
                "question '{}' has an empty option",
                self.id
            )));
        }
        Ok(())
    }
}

/// An answer the user is about to send. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub selected_option: String,
}

impl AnswerSubmission {
    pub fn new(question_id: &str, selected_option: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            selected_option: selected_option.to_string(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.question_id.is_empty() {
            return Err(AppError::InvalidQuestionId);
        }
        if self.selected_option.is_empty() {
            return Err(AppError::InvalidAnswer);
        }
        Ok(())
    }

    /// Checks the submission still refers to `question` and one of its options.
    pub fn matches(&self, question: &Question) -> bool {
        self.question_id == question.id && question.has_option(&self.selected_option)
    }
}
