// In-memory port fakes shared by the command and query tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;

use backend_domain::ports::{
    EventRepository, NotificationDispatcher, OutcomeRepository, ResponseRepository, RosterProvider,
    StoreError,
};
use backend_domain::value_objects::{EventId, MemberId, TeamId};
use backend_domain::{
    Event, EventResponse, MatchOutcome, MemberRef, NewEvent, RuntimeConfig,
};

use crate::{AppState, Metrics};

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

pub fn member(id: &str, name: &str) -> MemberRef {
    MemberRef {
        id: MemberId(id.to_string()),
        name: name.to_string(),
        position: None,
    }
}

#[derive(Default)]
pub struct InMemoryEvents {
    pub events: Mutex<HashMap<String, Event>>,
    next_id: AtomicUsize,
    /// When set, every insert past this many fails. Exercises the
    /// partial-series path.
    pub fail_after: Option<usize>,
}

impl InMemoryEvents {
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }

    pub fn seeded(events: Vec<Event>) -> Self {
        let store = Self::default();
        {
            let mut map = store.events.lock().expect("events lock");
            for event in events {
                map.insert(event.id.0.clone(), event);
            }
        }
        store
    }
}

#[async_trait]
impl EventRepository for InMemoryEvents {
    async fn create_event(&self, event: NewEvent) -> anyhow::Result<Event> {
        let inserted = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after {
            if inserted >= limit {
                return Err(anyhow!("store unavailable"));
            }
        }
        let id = EventId(format!("e{}", inserted + 1));
        let event = event.into_event(id.clone());
        self.events
            .lock()
            .expect("events lock")
            .insert(id.0, event.clone());
        Ok(event)
    }

    async fn fetch_event(&self, id: &EventId) -> anyhow::Result<Option<Event>> {
        Ok(self.events.lock().expect("events lock").get(&id.0).cloned())
    }

    async fn list_team_events(
        &self,
        team: &TeamId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .lock()
            .expect("events lock")
            .values()
            .filter(|e| &e.team_id == team)
            .filter(|e| from.map_or(true, |from| e.date >= from))
            .filter(|e| to.map_or(true, |to| e.date <= to))
            .cloned()
            .collect();
        events.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        Ok(events)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryResponses {
    pub responses: Mutex<HashMap<(String, String), EventResponse>>,
}

#[async_trait]
impl ResponseRepository for InMemoryResponses {
    async fn upsert_response(&self, response: EventResponse) -> anyhow::Result<EventResponse> {
        let key = (response.event_id.0.clone(), response.member_id.0.clone());
        self.responses
            .lock()
            .expect("responses lock")
            .insert(key, response.clone());
        Ok(response)
    }

    async fn list_event_responses(&self, event: &EventId) -> anyhow::Result<Vec<EventResponse>> {
        let mut responses: Vec<EventResponse> = self
            .responses
            .lock()
            .expect("responses lock")
            .values()
            .filter(|r| &r.event_id == event)
            .cloned()
            .collect();
        responses.sort_by(|a, b| a.member_id.0.cmp(&b.member_id.0));
        Ok(responses)
    }
}

#[derive(Default)]
pub struct InMemoryOutcomes {
    pub outcomes: Mutex<HashMap<String, MatchOutcome>>,
    /// Pretend another submission slipped in between the advisory
    /// pre-check and the insert.
    pub always_conflict: bool,
}

impl InMemoryOutcomes {
    pub fn always_conflicting() -> Self {
        Self {
            always_conflict: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl OutcomeRepository for InMemoryOutcomes {
    async fn create_outcome(&self, outcome: MatchOutcome) -> anyhow::Result<MatchOutcome> {
        let mut outcomes = self.outcomes.lock().expect("outcomes lock");
        if self.always_conflict || outcomes.contains_key(&outcome.event_id.0) {
            return Err(StoreError::UniqueViolation(format!(
                "match_results.event_id = '{}'",
                outcome.event_id
            ))
            .into());
        }
        outcomes.insert(outcome.event_id.0.clone(), outcome.clone());
        Ok(outcome)
    }

    async fn fetch_outcome(&self, event: &EventId) -> anyhow::Result<Option<MatchOutcome>> {
        if self.always_conflict {
            return Ok(None);
        }
        Ok(self
            .outcomes
            .lock()
            .expect("outcomes lock")
            .get(&event.0)
            .cloned())
    }
}

pub struct FixedRoster(pub Vec<MemberRef>);

#[async_trait]
impl RosterProvider for FixedRoster {
    async fn team_members(&self, _team: &TeamId) -> anyhow::Result<Vec<MemberRef>> {
        Ok(self.0.clone())
    }
}

pub struct NullNotifier;

#[async_trait]
impl NotificationDispatcher for NullNotifier {
    fn notify_events_created(&self, _config: RuntimeConfig, _events: Vec<Event>) {}

    async fn check_target(&self, _config: &RuntimeConfig) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn state_with(
    events: Arc<InMemoryEvents>,
    responses: Arc<InMemoryResponses>,
    outcomes: Arc<InMemoryOutcomes>,
    roster: Vec<MemberRef>,
) -> AppState {
    AppState {
        config: runtime_config(),
        event_repo: events,
        response_repo: responses,
        outcome_repo: outcomes,
        roster: Arc::new(FixedRoster(roster)),
        notifier: Arc::new(NullNotifier),
        metrics: Arc::new(Metrics::default()),
    }
}
