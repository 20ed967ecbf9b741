use std::{sync::Arc, time::Instant};

use frit_db::storage::Storage;

use crate::config::FritApiConfig;

#[derive(Debug, Clone)]
pub struct ApiContext {
    pub config: Arc<FritApiConfig>,
    pub db: Arc<dyn Storage>,
    pub started_at: Instant,
}

impl ApiContext {
    pub fn new(config: FritApiConfig, db: Arc<dyn Storage>) -> Self {
        Self {
            config: Arc::new(config),
            db,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the context was built, i.e. since the server started.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
