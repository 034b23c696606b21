use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use backend_application::{AppState, Metrics};
use backend_infrastructure::{AppConfig, FileRosterProvider, JsonStore, WebhookNotifier};

/// Fully wired application state: config, store, roster, notifier, metrics.
pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store = match runtime_config.data_dir.clone() {
            Some(dir) => {
                info!("event store at {}", dir);
                Arc::new(JsonStore::open(dir).await?)
            }
            None => {
                warn!("no data_dir configured, events are kept in memory only");
                Arc::new(JsonStore::in_memory())
            }
        };
        info!("roster file: {}", runtime_config.roster_path);
        let roster = Arc::new(FileRosterProvider::new(runtime_config.roster_path.clone()));

        let state = AppState {
            config: runtime_config,
            event_repo: store.clone(),
            response_repo: store.clone(),
            outcome_repo: store,
            roster,
            notifier: Arc::new(WebhookNotifier::new()),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
