use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::QuizResult};

/// Storage for completed quiz results, keyed by `QuizResult::id`.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Inserts the result, replacing any stored result with the same id.
    async fn add(&self, result: QuizResult) -> AppResult<QuizResult>;
    async fn get_all(&self) -> AppResult<Vec<QuizResult>>;
    async fn get(&self, id: &str) -> AppResult<Option<QuizResult>>;
    async fn count(&self) -> AppResult<usize>;
}

pub struct MongoResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoResultRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.collection(&config.results_collection);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let date_index = IndexModel::builder()
            .keys(doc! { "date": -1 })
            .options(IndexOptions::builder().name("date_desc".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(date_index).await?;

        log::info!("Successfully created indexes for quiz results collection");
        Ok(())
    }
}

#[async_trait]
impl ResultRepository for MongoResultRepository {
    async fn add(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.collection
            .replace_one(doc! { "id": &result.id }, &result)
            .upsert(true)
            .await?;
        Ok(result)
    }

    async fn get_all(&self) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn get(&self, id: &str) -> AppResult<Option<QuizResult>> {
        let result = self.collection.find_one(doc! { "id": id }).await?;
        Ok(result)
    }

    async fn count(&self) -> AppResult<usize> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count as usize)
    }
}
