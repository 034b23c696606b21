use async_trait::async_trait;

use crate::entities::{Event, RuntimeConfig};

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Fire-and-forget announcement of newly scheduled events.
    /// Delivery happens on a background task; failures are logged only.
    fn notify_events_created(&self, config: RuntimeConfig, events: Vec<Event>);
    /// Probes the configured webhook target without sending a notice.
    async fn check_target(&self, config: &RuntimeConfig) -> anyhow::Result<()>;
}
