use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::entities::{Event, EventResponse, MatchOutcome, MemberRef, NewEvent};
use crate::value_objects::{EventId, TeamId};

/// Constraint failures a store reports besides plain I/O errors.
/// Carried inside `anyhow::Error`; callers downcast to recover it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Mints an id and persists the event.
    async fn create_event(&self, event: NewEvent) -> anyhow::Result<Event>;
    async fn fetch_event(&self, id: &EventId) -> anyhow::Result<Option<Event>>;
    async fn list_team_events(
        &self,
        team: &TeamId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Event>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Inserts or replaces the (event, member) row.
    async fn upsert_response(&self, response: EventResponse) -> anyhow::Result<EventResponse>;
    async fn list_event_responses(&self, event: &EventId) -> anyhow::Result<Vec<EventResponse>>;
}

#[async_trait]
pub trait OutcomeRepository: Send + Sync {
    /// Persists the outcome. Fails with `StoreError::UniqueViolation`
    /// if the event already has one.
    async fn create_outcome(&self, outcome: MatchOutcome) -> anyhow::Result<MatchOutcome>;
    async fn fetch_outcome(&self, event: &EventId) -> anyhow::Result<Option<MatchOutcome>>;
}

#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Current members of the team; empty when the team is unknown.
    async fn team_members(&self, team: &TeamId) -> anyhow::Result<Vec<MemberRef>>;
}
