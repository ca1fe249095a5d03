use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerSubmission, Question},
        dto::{
            request::AnswerRequest,
            response::{AnswerResponse, QuestionDto},
        },
    },
};

/// Remote source of questions and judge of answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionService: Send + Sync {
    async fn fetch_random_question(&self) -> AppResult<Question>;
    async fn submit_answer(&self, submission: &AnswerSubmission) -> AppResult<bool>;
}

/// `QuestionService` backed by the quiz HTTP API.
pub struct HttpQuestionService {
    client: Client,
    base_url: Url,
}

impl HttpQuestionService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::NetworkUnavailable(format!("Failed to build HTTP client: {}", e)))?;
        Self::with_client(client, &config.api_base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> AppResult<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| AppError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        // Url::join drops the last path segment unless it ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            log::warn!("Question API responded with status {}", status);
            return Err(AppError::ServiceError(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            log::warn!("Question API returned an undecodable body: {}", e);
            AppError::DecodingError(e.to_string())
        })
    }
}

#[async_trait]
impl QuestionService for HttpQuestionService {
    async fn fetch_random_question(&self) -> AppResult<Question> {
        let url = self.endpoint("question")?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let dto: QuestionDto = Self::decode(response).await?;
        Question::try_from(dto)
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> AppResult<bool> {
        submission.validate()?;

        let mut url = self.endpoint("answer")?;
        url.query_pairs_mut()
            .append_pair("questionId", &submission.question_id);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&AnswerRequest {
                answer: submission.selected_option.clone(),
            })
            .send()
            .await?;

        let answer: AnswerResponse = Self::decode(response).await?;
        Ok(answer.result)
    }
}
