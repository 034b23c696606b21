use backend_domain::value_objects::EventId;
use backend_domain::{ResponseStats, ResponsesSnapshot};

use crate::{AppError, AppState};

/// All stored answers for an event plus the accepted/declined/pending
/// counts. Pending is measured against the roster as it is now, not as
/// it was when members answered.
pub async fn get_event_responses(
    state: &AppState,
    event_id: &EventId,
) -> Result<ResponsesSnapshot, AppError> {
    let event = state
        .event_repo
        .fetch_event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event '{event_id}' does not exist")))?;

    let responses = state.response_repo.list_event_responses(&event.id).await?;
    let roster = state.roster.team_members(&event.team_id).await?;
    let stats = ResponseStats::tally(&responses, roster.len());

    Ok(ResponsesSnapshot {
        event_id: event.id,
        responses,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveTime, Utc};

    use backend_domain::value_objects::{MemberId, TeamId};
    use backend_domain::{Event, EventKind, EventResponse, ResponseChoice};

    use super::*;
    use crate::test_support::{
        member, state_with, InMemoryEvents, InMemoryOutcomes, InMemoryResponses,
    };

    fn event(id: &str) -> Event {
        Event {
            id: EventId(id.to_string()),
            team_id: TeamId("first-team".to_string()),
            kind: EventKind::Training,
            title: "Session".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 15).expect("valid date"),
            meeting_time: None,
            start_time: NaiveTime::from_hms_opt(18, 30, 0).expect("valid time"),
            end_time: None,
            location: None,
            opponent: None,
            notes: None,
            requires_response: true,
            is_repeating: false,
            repeat_pattern: None,
            created_by: MemberId("trainer-1".to_string()),
            created_at: Utc::now(),
        }
    }

    fn answer(event: &str, member: &str, choice: ResponseChoice) -> EventResponse {
        EventResponse {
            event_id: EventId(event.to_string()),
            member_id: MemberId(member.to_string()),
            choice,
            responded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn snapshot_carries_answers_and_counts() {
        let responses = Arc::new(InMemoryResponses::default());
        {
            let mut map = responses.responses.lock().expect("responses lock");
            for r in [
                answer("e1", "m1", ResponseChoice::Accepted),
                answer("e1", "m2", ResponseChoice::Declined),
                answer("other", "m3", ResponseChoice::Accepted),
            ] {
                map.insert((r.event_id.0.clone(), r.member_id.0.clone()), r);
            }
        }
        let state = state_with(
            Arc::new(InMemoryEvents::seeded(vec![event("e1")])),
            responses,
            Arc::new(InMemoryOutcomes::default()),
            vec![
                member("m1", "Alex"),
                member("m2", "Kim"),
                member("m3", "Sam"),
                member("m4", "Robin"),
            ],
        );

        let snapshot = get_event_responses(&state, &EventId("e1".to_string()))
            .await
            .expect("snapshot should build");

        assert_eq!(snapshot.responses.len(), 2);
        assert_eq!(
            snapshot.stats,
            ResponseStats {
                accepted: 1,
                declined: 1,
                pending: 2,
            }
        );
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let state = state_with(
            Arc::new(InMemoryEvents::default()),
            Arc::new(InMemoryResponses::default()),
            Arc::new(InMemoryOutcomes::default()),
            vec![],
        );

        let err = get_event_responses(&state, &EventId("missing".to_string()))
            .await
            .expect_err("missing event");
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
