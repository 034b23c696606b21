use chrono::Utc;
use tracing::warn;

use backend_domain::services::recurrence;
use backend_domain::value_objects::MemberId;
use backend_domain::{Event, EventDraft, RepeatDraft};

use crate::{AppError, AppState};

pub async fn create_event(
    state: &AppState,
    created_by: MemberId,
    draft: EventDraft,
) -> Result<Event, AppError> {
    let new_event = draft.into_new_event(
        created_by,
        state.config.default_match_duration_minutes,
        Utc::now(),
    )?;
    let event = state.event_repo.create_event(new_event).await?;
    state.metrics.record_events_created(1);
    state
        .notifier
        .notify_events_created(state.config.clone(), vec![event.clone()]);
    Ok(event)
}

/// Expands the repeat pattern and persists one event per date, in
/// order. Inserts are sequential and not atomic: on a mid-series
/// failure the already persisted prefix stays, and the error reports
/// it so the caller can reconcile.
pub async fn create_recurring_events(
    state: &AppState,
    created_by: MemberId,
    draft: EventDraft,
    repeat: RepeatDraft,
) -> Result<Vec<Event>, AppError> {
    let pattern = repeat.validate(draft.date)?;
    let template = draft
        .into_new_event(
            created_by,
            state.config.default_match_duration_minutes,
            Utc::now(),
        )?
        .repeating(pattern.clone());

    let dates = recurrence::expand_dates(template.date, &pattern);
    let requested = dates.len();

    let mut created = Vec::with_capacity(requested);
    for date in dates {
        match state.event_repo.create_event(template.on_date(date)).await {
            Ok(event) => created.push(event),
            Err(err) => {
                warn!(
                    "series insert failed after {} of {} events: {}",
                    created.len(),
                    requested,
                    err
                );
                state.metrics.record_events_created(created.len());
                state.metrics.record_series_instances(created.len());
                // The prefix is persisted and real; announce it.
                if !created.is_empty() {
                    state
                        .notifier
                        .notify_events_created(state.config.clone(), created.clone());
                }
                return Err(AppError::PartialSeries {
                    created,
                    requested,
                    source: err,
                });
            }
        }
    }

    state.metrics.record_events_created(created.len());
    state.metrics.record_series_instances(created.len());
    if !created.is_empty() {
        state
            .notifier
            .notify_events_created(state.config.clone(), created.clone());
    }
    Ok(created)
}
