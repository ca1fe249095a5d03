use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

const APP_NAME: &str = "quizline";
const MAX_POOL_SIZE: u32 = 4;

/// Connection settings for the result store. A single UI process writes at
/// most one result per finished quiz, so the pool stays small.
pub async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = Some(APP_NAME.to_string());
    options.max_pool_size = Some(MAX_POOL_SIZE);
    options.min_pool_size = Some(0);
    options.connect_timeout = Some(config.request_timeout());
    options.server_selection_timeout = Some(config.request_timeout());
    Ok(options)
}

/// The database holding saved quiz results.
#[derive(Clone)]
pub struct Database {
    inner: mongodb::Database,
}

impl Database {
    /// Opens the configured database and pings it, so a bad connection
    /// string fails at startup instead of on the first saved result.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;
        let inner = client.database(&config.mongo_db_name);
        inner.run_command(doc! { "ping": 1 }).await?;

        log::info!("Result store ready in database '{}'", config.mongo_db_name);
        Ok(Self { inner })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.inner.collection(name)
    }
}
