use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;
use crate::models::domain::Question;

/// Payload of `GET /question`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionDto {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub statement: String,

    #[validate(length(equal = 4))]
    pub options: Vec<String>,
}

impl TryFrom<QuestionDto> for Question {
    type Error = AppError;

    fn try_from(dto: QuestionDto) -> Result<Self, Self::Error> {
        dto.validate()?;
        Question::new(&dto.id, &dto.statement, dto.options)
    }
}

/// Payload of `POST /answer`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub result: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_dto_converts_statement_to_prompt() {
        let dto: QuestionDto = serde_json::from_str(
            r#"{"id":"q1","statement":"2 + 2?","options":["1","2","3","4"]}"#,
        )
        .unwrap();

        let question = Question::try_from(dto).unwrap();
        assert_eq!(question.prompt, "2 + 2?");
        assert_eq!(question.options[3], "4");
    }

    #[test]
    fn question_dto_with_three_options_is_a_decoding_error() {
        let dto = QuestionDto {
            id: "q1".into(),
            statement: "2 + 2?".into(),
            options: vec!["1".into(), "2".into(), "3".into()],
        };

        let err = Question::try_from(dto).unwrap_err();
        assert_eq!(err.error_code(), "DECODING_ERROR");
    }

    #[test]
    fn answer_response_parses() {
        let response: AnswerResponse = serde_json::from_str(r#"{"result":true}"#).unwrap();
        assert!(response.result);
    }
}
