use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{errors::AppResult, models::domain::QuizResult, repositories::ResultRepository};

/// Process-local result store. Writes are serialized by the lock.
#[derive(Clone, Default)]
pub struct InMemoryResultRepository {
    results: Arc<RwLock<HashMap<String, QuizResult>>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: Vec<QuizResult>) -> Self {
        let map = results.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            results: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn add(&self, result: QuizResult) -> AppResult<QuizResult> {
        let mut results = self.results.write().await;
        results.insert(result.id.clone(), result.clone());
        Ok(result)
    }

    async fn get_all(&self) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut items: Vec<_> = results.values().cloned().collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(items)
    }

    async fn get(&self, id: &str) -> AppResult<Option<QuizResult>> {
        let results = self.results.read().await;
        Ok(results.get(id).cloned())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.results.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_upserts_by_id() {
        let repo = InMemoryResultRepository::new();
        let mut result = QuizResult::new("Ana", 50, 5, 10);
        repo.add(result.clone()).await.unwrap();

        result.score = 60;
        repo.add(result.clone()).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get(&result.id).await.unwrap().unwrap().score, 60);
    }

    #[tokio::test]
    async fn missing_id_returns_none() {
        let repo = InMemoryResultRepository::new();
        assert!(repo.get("nope").await.unwrap().is_none());
        assert!(repo.get_all().await.unwrap().is_empty());
    }
}
