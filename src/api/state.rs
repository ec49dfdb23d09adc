use crate::config::MonitorConfig;
use crate::metrics::MetricsEngine;
use crate::records::RecordQueryService;
use crate::storage::Pool;

#[derive(Clone)]
pub struct AppState {
    pub records: RecordQueryService,
    pub metrics: MetricsEngine,
    pub config: MonitorConfig,
}

impl AppState {
    pub fn new(pool: Pool, config: MonitorConfig) -> Self {
        Self {
            records: RecordQueryService::new(pool.clone()),
            metrics: MetricsEngine::new(pool),
            config,
        }
    }
}
