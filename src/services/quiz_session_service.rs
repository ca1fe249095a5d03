use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AnswerSubmission, Question, QuizResult},
    services::{
        question_service::QuestionService, results_service::ResultsService,
        score_service::ScoreService,
    },
};

/// Where a session currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    NotStarted,
    Loading,
    /// Started, but the last fetch failed; `load_next_question` retries.
    QuestionUnavailable,
    Ready,
    AnswerSelected,
    AnswerSubmitted,
    Completed,
}

#[derive(Clone, Debug, Default)]
struct QuizSession {
    user_name: String,
    current_question_index: i32,
    correct_answer_count: i32,
    current_question: Option<Question>,
    selected_answer: Option<String>,
    answer_submitted: bool,
    last_answer_correct: bool,
    completed: bool,
    is_loading: bool,
    last_error: Option<AppError>,
    last_result: Option<QuizResult>,
    asked_questions: Vec<Question>,
}

impl QuizSession {
    fn started(user_name: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            ..Self::default()
        }
    }

    fn clear_selection(&mut self) {
        self.selected_answer = None;
        self.answer_submitted = false;
        self.last_answer_correct = false;
    }

    fn phase(&self) -> SessionPhase {
        if self.completed {
            SessionPhase::Completed
        } else if self.is_loading {
            SessionPhase::Loading
        } else if self.user_name.is_empty() {
            SessionPhase::NotStarted
        } else if self.current_question.is_none() {
            SessionPhase::QuestionUnavailable
        } else if self.answer_submitted {
            SessionPhase::AnswerSubmitted
        } else if self.selected_answer.is_some() {
            SessionPhase::AnswerSelected
        } else {
            SessionPhase::Ready
        }
    }
}

/// Point-in-time copy of a session, handed to the UI after every operation.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub user_name: String,
    pub current_question_index: i32,
    pub total_questions: i32,
    pub correct_answer_count: i32,
    pub current_question: Option<Question>,
    pub selected_answer: Option<String>,
    pub answer_submitted: bool,
    pub last_answer_correct: bool,
    pub completed: bool,
    pub last_error: Option<AppError>,
    pub last_result: Option<QuizResult>,
}

impl SessionSnapshot {
    pub fn score_text(&self) -> String {
        format!("{}/{}", self.correct_answer_count, self.total_questions)
    }

    pub fn percentage_score(&self) -> f64 {
        if self.total_questions <= 0 {
            return 0.0;
        }
        f64::from(self.correct_answer_count) / f64::from(self.total_questions) * 100.0
    }

    pub fn score_message(&self) -> &'static str {
        let score = self.percentage_score().floor() as i32;
        ScoreService::evaluate_performance(score).message()
    }

    /// 1-based number of the question on screen.
    pub fn question_number(&self) -> i32 {
        (self.current_question_index + 1).min(self.total_questions)
    }

    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(|e| e.to_string())
    }
}

/// Drives one user's quiz: fetching questions, recording answers and saving
/// the result on completion.
///
/// Operations take `&mut self`, so only one fetch or submission can be in
/// flight per session. Callers that share a controller between tasks put it
/// behind a `tokio::sync::Mutex`, which queues them in arrival order.
/// Failures never escape an operation; they land in `last_error` and leave
/// the session resumable.
pub struct QuizSessionService {
    question_service: Arc<dyn QuestionService>,
    results_service: Arc<ResultsService>,
    total_questions: i32,
    session: QuizSession,
    state_tx: watch::Sender<SessionSnapshot>,
}

impl QuizSessionService {
    pub fn new(
        question_service: Arc<dyn QuestionService>,
        results_service: Arc<ResultsService>,
        total_questions: i32,
    ) -> Self {
        let session = QuizSession::default();
        let (state_tx, _) = watch::channel(Self::snapshot_of(&session, total_questions));
        Self {
            question_service,
            results_service,
            total_questions,
            session,
            state_tx,
        }
    }

    /// Receiver that always holds the latest snapshot, including the
    /// transient `Loading` phase while a request is outstanding.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        Self::snapshot_of(&self.session, self.total_questions)
    }

    pub fn total_questions(&self) -> i32 {
        self.total_questions
    }

    pub async fn start_quiz(&mut self, user_name: &str) -> SessionSnapshot {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            self.session = QuizSession::default();
            self.record_error(AppError::InvalidUserName);
            return self.publish();
        }

        log::info!("Starting quiz for '{}'", user_name);
        self.session = QuizSession::started(user_name);
        self.fetch_question().await
    }

    /// Fetches the next question, or marks the quiz completed when every
    /// question has been asked. Also the manual retry after a failed fetch.
    pub async fn load_next_question(&mut self) -> SessionSnapshot {
        if self.session.user_name.is_empty() {
            self.record_error(AppError::QuizNotStarted);
            return self.publish();
        }
        if self.session.current_question_index >= self.total_questions {
            self.session.completed = true;
            self.session.current_question = None;
            return self.publish();
        }
        self.fetch_question().await
    }

    /// Selects `option` for the current question. Options that are not part
    /// of the question are rejected and the previous selection is kept.
    pub fn select_answer(&mut self, option: &str) -> SessionSnapshot {
        let Some(question) = &self.session.current_question else {
            return self.snapshot();
        };
        if self.session.answer_submitted {
            return self.snapshot();
        }
        if !question.has_option(option) {
            self.record_error(AppError::UnknownOption(option.to_string()));
            return self.publish();
        }

        self.session.selected_answer = Some(option.to_string());
        self.session.last_error = None;
        self.publish()
    }

    pub async fn submit_answer(&mut self) -> SessionSnapshot {
        let (Some(question), Some(selected)) = (
            &self.session.current_question,
            &self.session.selected_answer,
        ) else {
            return self.snapshot();
        };
        if selected.is_empty() || self.session.answer_submitted {
            return self.snapshot();
        }

        let submission = AnswerSubmission::new(&question.id, selected);
        if let Err(err) = submission.validate() {
            self.record_error(err);
            return self.publish();
        }
        if !submission.matches(question) {
            self.record_error(AppError::UnknownOption(submission.selected_option));
            return self.publish();
        }

        self.session.is_loading = true;
        self.session.last_error = None;
        self.publish();

        let outcome = self.question_service.submit_answer(&submission).await;
        self.session.is_loading = false;

        match outcome {
            Ok(correct) => {
                log::debug!(
                    "Answer to question {} was {}",
                    submission.question_id,
                    if correct { "correct" } else { "incorrect" }
                );
                self.session.last_answer_correct = correct;
                self.session.answer_submitted = true;
                if correct {
                    self.session.correct_answer_count += 1;
                }
            }
            Err(err) => {
                self.session.answer_submitted = false;
                self.record_error(err);
            }
        }
        self.publish()
    }

    /// Moves past the current question. Reaching the last one completes the
    /// quiz and saves exactly one result; further calls do nothing.
    pub async fn advance_to_next_question(&mut self) -> SessionSnapshot {
        if self.session.user_name.is_empty() {
            self.record_error(AppError::QuizNotStarted);
            return self.publish();
        }
        if self.session.completed {
            return self.snapshot();
        }

        self.session.current_question_index += 1;
        if self.session.current_question_index >= self.total_questions {
            self.complete_quiz().await
        } else {
            self.load_next_question().await
        }
    }

    pub async fn restart_quiz(&mut self) -> SessionSnapshot {
        if self.session.user_name.is_empty() {
            self.record_error(AppError::QuizNotStarted);
            return self.publish();
        }

        log::info!("Restarting quiz for '{}'", self.session.user_name);
        self.session = QuizSession::started(&self.session.user_name);
        self.fetch_question().await
    }

    async fn fetch_question(&mut self) -> SessionSnapshot {
        self.session.is_loading = true;
        self.session.current_question = None;
        self.session.clear_selection();
        self.session.last_error = None;
        self.publish();

        let outcome = self.question_service.fetch_random_question().await;
        self.session.is_loading = false;

        match outcome {
            Ok(question) => {
                log::debug!(
                    "Loaded question {} ({}/{})",
                    question.id,
                    self.session.current_question_index + 1,
                    self.total_questions
                );
                self.session.asked_questions.push(question.clone());
                self.session.current_question = Some(question);
            }
            Err(err) => self.record_error(err),
        }
        self.publish()
    }

    async fn complete_quiz(&mut self) -> SessionSnapshot {
        self.session.current_question_index = self.total_questions;
        self.session.completed = true;
        self.session.current_question = None;
        self.session.clear_selection();
        self.session.last_error = None;

        let result = match self.build_result() {
            Ok(result) => result,
            Err(err) => {
                self.record_error(err);
                return self.publish();
            }
        };
        log::info!(
            "Quiz completed by '{}': {}/{} ({}%, {})",
            result.user_name,
            result.correct_answers,
            result.total_questions,
            result.score,
            ScoreService::evaluate_performance(result.score).as_str()
        );

        self.session.last_result = Some(result.clone());
        if self.results_service.save_result(result).await.is_none() {
            let err = self
                .results_service
                .last_error()
                .await
                .unwrap_or_else(|| AppError::StorageError("result was not saved".to_string()));
            self.record_error(err);
        }
        self.publish()
    }

    fn build_result(&self) -> AppResult<QuizResult> {
        let user_name = self.session.user_name.trim();
        if user_name.is_empty() {
            return Err(AppError::InvalidUserName);
        }
        let correct = self.session.correct_answer_count;
        if self.total_questions <= 0 || correct < 0 {
            return Err(AppError::InvalidQuizData);
        }

        let score = ScoreService::calculate_score(correct, self.total_questions);
        Ok(QuizResult::new(user_name, score, correct, self.total_questions)
            .with_questions(self.session.asked_questions.clone()))
    }

    fn record_error(&mut self, err: AppError) {
        log::warn!("Quiz session error [{}]: {}", err.error_code(), err);
        self.session.last_error = Some(err);
    }

    fn publish(&self) -> SessionSnapshot {
        let snapshot = self.snapshot();
        self.state_tx.send_replace(snapshot.clone());
        snapshot
    }

    fn snapshot_of(session: &QuizSession, total_questions: i32) -> SessionSnapshot {
        SessionSnapshot {
            phase: session.phase(),
            user_name: session.user_name.clone(),
            current_question_index: session.current_question_index,
            total_questions,
            correct_answer_count: session.correct_answer_count,
            current_question: session.current_question.clone(),
            selected_answer: session.selected_answer.clone(),
            answer_submitted: session.answer_submitted,
            last_answer_correct: session.last_answer_correct,
            completed: session.completed,
            last_error: session.last_error.clone(),
            last_result: session.last_result.clone(),
        }
    }
}
