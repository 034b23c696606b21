// State fixture for the handler tests: real wiring over empty port
// stubs, enough to drive the guard and lookup paths.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue};
use chrono::NaiveDate;

use backend_application::{AppState, Metrics};
use backend_domain::ports::{
    EventRepository, NotificationDispatcher, OutcomeRepository, ResponseRepository, RosterProvider,
};
use backend_domain::value_objects::{EventId, TeamId};
use backend_domain::{Event, EventResponse, MatchOutcome, MemberRef, NewEvent, RuntimeConfig};

use crate::middleware::MEMBER_ID_HEADER;

struct EmptyEvents;

#[async_trait]
impl EventRepository for EmptyEvents {
    async fn create_event(&self, event: NewEvent) -> anyhow::Result<Event> {
        Ok(event.into_event(EventId("e1".to_string())))
    }

    async fn fetch_event(&self, _id: &EventId) -> anyhow::Result<Option<Event>> {
        Ok(None)
    }

    async fn list_team_events(
        &self,
        _team: &TeamId,
        _from: Option<NaiveDate>,
        _to: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Event>> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

struct EmptyResponses;

#[async_trait]
impl ResponseRepository for EmptyResponses {
    async fn upsert_response(&self, response: EventResponse) -> anyhow::Result<EventResponse> {
        Ok(response)
    }

    async fn list_event_responses(&self, _event: &EventId) -> anyhow::Result<Vec<EventResponse>> {
        Ok(Vec::new())
    }
}

struct EmptyOutcomes;

#[async_trait]
impl OutcomeRepository for EmptyOutcomes {
    async fn create_outcome(&self, outcome: MatchOutcome) -> anyhow::Result<MatchOutcome> {
        Ok(outcome)
    }

    async fn fetch_outcome(&self, _event: &EventId) -> anyhow::Result<Option<MatchOutcome>> {
        Ok(None)
    }
}

struct EmptyRoster;

#[async_trait]
impl RosterProvider for EmptyRoster {
    async fn team_members(&self, _team: &TeamId) -> anyhow::Result<Vec<MemberRef>> {
        Ok(Vec::new())
    }
}

struct NullNotifier;

#[async_trait]
impl NotificationDispatcher for NullNotifier {
    fn notify_events_created(&self, _config: RuntimeConfig, _events: Vec<Event>) {}

    async fn check_target(&self, _config: &RuntimeConfig) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn empty_state() -> AppState {
    AppState {
        config: runtime_config(),
        event_repo: Arc::new(EmptyEvents),
        response_repo: Arc::new(EmptyResponses),
        outcome_repo: Arc::new(EmptyOutcomes),
        roster: Arc::new(EmptyRoster),
        notifier: Arc::new(NullNotifier),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: None,
        public_base_url: "http://localhost:8080".to_string(),
        data_dir: None,
        roster_path: "rosters.yaml".to_string(),
        default_match_duration_minutes: 105,
        notify_webhook_url: None,
        notify_webhook_template: None,
        notify_webhook_token: None,
        notify_group_id: None,
        max_body_bytes: 1_048_576,
        request_timeout_seconds: 15,
    }
}

pub fn member_headers(id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        MEMBER_ID_HEADER,
        HeaderValue::from_str(id).expect("header value"),
    );
    headers
}
