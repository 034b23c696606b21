// JSON-file backed store
// One adapter implements the event, response and outcome repositories.
// Tables live in memory behind a single RwLock; with a data dir
// configured every mutation writes the affected table back to disk
// before the lock is released.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

use backend_domain::ports::{
    EventRepository, OutcomeRepository, ResponseRepository, StoreError,
};
use backend_domain::value_objects::{EventId, TeamId};
use backend_domain::{Event, EventResponse, MatchOutcome, NewEvent};

const EVENTS_FILE: &str = "events.json";
const RESPONSES_FILE: &str = "responses.json";
const RESULTS_FILE: &str = "match_results.json";

#[derive(Debug, Default)]
struct Tables {
    events: HashMap<String, Event>,
    /// event id -> member id -> stored answer
    responses: HashMap<String, HashMap<String, EventResponse>>,
    match_results: HashMap<String, MatchOutcome>,
}

pub struct JsonStore {
    data_dir: Option<PathBuf>,
    tables: RwLock<Tables>,
}

impl JsonStore {
    pub fn in_memory() -> Self {
        Self {
            data_dir: None,
            tables: RwLock::new(Tables::default()),
        }
    }

    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = data_dir.into();
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create data dir {}", dir.display()))?;
        let tables = Tables {
            events: load_table(&dir.join(EVENTS_FILE)).await?,
            responses: load_table(&dir.join(RESPONSES_FILE)).await?,
            match_results: load_table(&dir.join(RESULTS_FILE)).await?,
        };
        Ok(Self {
            data_dir: Some(dir),
            tables: RwLock::new(tables),
        })
    }

    async fn persist_events(&self, tables: &Tables) -> Result<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        save_table(&dir.join(EVENTS_FILE), &tables.events).await
    }

    async fn persist_responses(&self, tables: &Tables) -> Result<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        save_table(&dir.join(RESPONSES_FILE), &tables.responses).await
    }

    async fn persist_results(&self, tables: &Tables) -> Result<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        save_table(&dir.join(RESULTS_FILE), &tables.match_results).await
    }
}

async fn load_table<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

async fn save_table<T>(path: &Path, table: &T) -> Result<()>
where
    T: Serialize,
{
    let content = serde_json::to_string_pretty(table)?;
    fs::write(path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl EventRepository for JsonStore {
    async fn create_event(&self, event: NewEvent) -> Result<Event> {
        let id = EventId(Uuid::new_v4().simple().to_string());
        let event = event.into_event(id);
        let mut tables = self.tables.write().await;
        tables.events.insert(event.id.0.clone(), event.clone());
        // A failed write must not leave the row in the table, or a
        // later flush would persist an event the caller saw fail.
        if let Err(err) = self.persist_events(&tables).await {
            tables.events.remove(&event.id.0);
            return Err(err);
        }
        Ok(event)
    }

    async fn fetch_event(&self, id: &EventId) -> Result<Option<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.events.get(&id.0).cloned())
    }

    async fn list_team_events(
        &self,
        team: &TeamId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Event>> {
        let tables = self.tables.read().await;
        let mut events: Vec<Event> = tables
            .events
            .values()
            .filter(|e| &e.team_id == team)
            .filter(|e| from.map_or(true, |from| e.date >= from))
            .filter(|e| to.map_or(true, |to| e.date <= to))
            .cloned()
            .collect();
        events.sort_by(|a, b| {
            (a.date, a.start_time, &a.id.0).cmp(&(b.date, b.start_time, &b.id.0))
        });
        Ok(events)
    }

    async fn ping(&self) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            fs::metadata(dir)
                .await
                .with_context(|| format!("data dir {} is not accessible", dir.display()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ResponseRepository for JsonStore {
    async fn upsert_response(&self, response: EventResponse) -> Result<EventResponse> {
        let mut tables = self.tables.write().await;
        let previous = tables
            .responses
            .entry(response.event_id.0.clone())
            .or_default()
            .insert(response.member_id.0.clone(), response.clone());
        if let Err(err) = self.persist_responses(&tables).await {
            // Put the table back the way it was, including dropping a
            // by-member map this call introduced.
            let by_member = tables
                .responses
                .entry(response.event_id.0.clone())
                .or_default();
            match previous {
                Some(old) => by_member.insert(response.member_id.0.clone(), old),
                None => by_member.remove(&response.member_id.0),
            };
            if by_member.is_empty() {
                tables.responses.remove(&response.event_id.0);
            }
            return Err(err);
        }
        Ok(response)
    }

    async fn list_event_responses(&self, event: &EventId) -> Result<Vec<EventResponse>> {
        let tables = self.tables.read().await;
        let mut responses: Vec<EventResponse> = tables
            .responses
            .get(&event.0)
            .map(|by_member| by_member.values().cloned().collect())
            .unwrap_or_default();
        responses.sort_by(|a, b| a.member_id.0.cmp(&b.member_id.0));
        Ok(responses)
    }
}

#[async_trait]
impl OutcomeRepository for JsonStore {
    async fn create_outcome(&self, outcome: MatchOutcome) -> Result<MatchOutcome> {
        // Check and insert under one write lock; this is what makes
        // the one-result-per-event rule hold under concurrency.
        let mut tables = self.tables.write().await;
        if tables.match_results.contains_key(&outcome.event_id.0) {
            return Err(StoreError::UniqueViolation(format!(
                "match_results.event_id = '{}'",
                outcome.event_id
            ))
            .into());
        }
        tables
            .match_results
            .insert(outcome.event_id.0.clone(), outcome.clone());
        // An unpersisted result must not occupy the uniqueness slot.
        if let Err(err) = self.persist_results(&tables).await {
            tables.match_results.remove(&outcome.event_id.0);
            return Err(err);
        }
        Ok(outcome)
    }

    async fn fetch_outcome(&self, event: &EventId) -> Result<Option<MatchOutcome>> {
        let tables = self.tables.read().await;
        Ok(tables.match_results.get(&event.0).cloned())
    }
}
