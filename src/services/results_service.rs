use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuizResult,
    repositories::ResultRepository,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResultsStatistics {
    pub total_quizzes: usize,
    pub average_score: i32,
}

impl ResultsStatistics {
    fn from_results(results: &[QuizResult]) -> Self {
        Self {
            total_quizzes: results.len(),
            average_score: average_score_of(results),
        }
    }
}

/// Floor of the mean score; 0 for no results.
pub fn average_score_of(results: &[QuizResult]) -> i32 {
    if results.is_empty() {
        return 0;
    }
    let total: i64 = results.iter().map(|r| i64::from(r.score)).sum();
    total.div_euclid(results.len() as i64) as i32
}

#[derive(Default)]
struct ResultsCache {
    results: Vec<QuizResult>,
    statistics: ResultsStatistics,
    last_error: Option<AppError>,
}

impl ResultsCache {
    fn replace(&mut self, results: Vec<QuizResult>) {
        self.statistics = ResultsStatistics::from_results(&results);
        self.results = results;
    }

    fn push_front(&mut self, result: QuizResult) {
        self.results.retain(|r| r.id != result.id);
        self.results.insert(0, result);
        self.statistics = ResultsStatistics::from_results(&self.results);
    }
}

/// Quiz history over a result store, with a most-recent-first cache for
/// display.
///
/// Store failures never reach the caller. They are logged, kept in
/// `last_error` until the next successful store call, and the cached view
/// is served instead.
pub struct ResultsService {
    repository: Arc<dyn ResultRepository>,
    cache: RwLock<ResultsCache>,
}

impl ResultsService {
    pub fn new(repository: Arc<dyn ResultRepository>) -> Self {
        Self {
            repository,
            cache: RwLock::new(ResultsCache::default()),
        }
    }

    /// All stored results, most recent first, also refreshing the cache.
    /// On failure returns the cached results unchanged.
    ///
    /// The cache is overwritten with what the store returned, so a
    /// `save_result` racing between the read and the overwrite drops out of
    /// the cache until the next load. Callers are expected to be a single
    /// producer and consumer.
    pub async fn load_results(&self) -> Vec<QuizResult> {
        match self.fetch_sorted().await {
            Ok(results) => {
                log::debug!("Loaded {} quiz results", results.len());
                let mut cache = self.cache.write().await;
                cache.replace(results.clone());
                cache.last_error = None;
                results
            }
            Err(err) => {
                self.record_error(err).await;
                self.recent_results().await
            }
        }
    }

    /// Persists `result` and puts it at the head of the cache. Returns once
    /// the store has accepted the write, or `None` if it refused it.
    pub async fn save_result(&self, result: QuizResult) -> Option<QuizResult> {
        match self.repository.add(result).await {
            Ok(saved) => {
                log::info!(
                    "Saved quiz result {} for '{}' ({}%)",
                    saved.id,
                    saved.user_name,
                    saved.score
                );
                let mut cache = self.cache.write().await;
                cache.push_front(saved.clone());
                cache.last_error = None;
                Some(saved)
            }
            Err(err) => {
                self.record_error(err).await;
                None
            }
        }
    }

    pub async fn get_result(&self, id: &str) -> Option<QuizResult> {
        match self.repository.get(id).await {
            Ok(result) => result,
            Err(err) => {
                self.record_error(err).await;
                None
            }
        }
    }

    /// Count of stored results; the cached count if the store fails.
    pub async fn total_quizzes(&self) -> usize {
        match self.repository.count().await {
            Ok(count) => count,
            Err(err) => {
                self.record_error(err).await;
                self.statistics().await.total_quizzes
            }
        }
    }

    /// Average over every stored result, not just the cached ones. Falls
    /// back to the cached average if the store fails.
    pub async fn average_score(&self) -> i32 {
        match self.repository.get_all().await {
            Ok(results) => average_score_of(&results),
            Err(err) => {
                self.record_error(err).await;
                self.statistics().await.average_score
            }
        }
    }

    pub async fn statistics(&self) -> ResultsStatistics {
        self.cache.read().await.statistics
    }

    pub async fn recent_results(&self) -> Vec<QuizResult> {
        self.cache.read().await.results.clone()
    }

    pub async fn has_results(&self) -> bool {
        !self.cache.read().await.results.is_empty()
    }

    pub async fn last_error(&self) -> Option<AppError> {
        self.cache.read().await.last_error.clone()
    }

    pub async fn error_message(&self) -> Option<String> {
        self.last_error().await.map(|e| e.to_string())
    }

    async fn fetch_sorted(&self) -> AppResult<Vec<QuizResult>> {
        let mut results = self.repository.get_all().await?;
        results.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(results)
    }

    async fn record_error(&self, err: AppError) {
        log::warn!("Quiz results error [{}]: {}", err.error_code(), err);
        self.cache.write().await.last_error = Some(err);
    }
}
