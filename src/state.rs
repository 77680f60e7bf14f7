use std::sync::Arc;

use mongodb::Database;
use tracing::warn;

use super::{config::Config, database::init_mongo};

pub struct AppState {
    pub config: Config,
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let db = match (&config.database_url, &config.database_name) {
            (Some(url), Some(name)) => match init_mongo(url, name).await {
                Ok(db) => Some(db),
                Err(e) => {
                    warn!("Failed to initialize database client: {e}");
                    None
                }
            },
            _ => {
                warn!("DATABASE_URL or DATABASE_NAME not set, running without a database");
                None
            }
        };

        Arc::new(Self { config, db })
    }
}
