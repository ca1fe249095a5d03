use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::Question;

/// Summary of one completed quiz session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub user_name: String,
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<Question>,
}

impl QuizResult {
    pub fn new(user_name: &str, score: i32, correct_answers: i32, total_questions: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_name: user_name.to_string(),
            score,
            correct_answers,
            total_questions,
            date: Utc::now(),
            questions: Vec::new(),
        }
    }

    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }
}
