use std::sync::Arc;

use backend_domain::ports::{
    EventRepository, NotificationDispatcher, OutcomeRepository, ResponseRepository, RosterProvider,
};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_repo: Arc<dyn EventRepository>,
    pub response_repo: Arc<dyn ResponseRepository>,
    pub outcome_repo: Arc<dyn OutcomeRepository>,
    pub roster: Arc<dyn RosterProvider>,
    pub notifier: Arc<dyn NotificationDispatcher>,
    pub metrics: Arc<Metrics>,
}
