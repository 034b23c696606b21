// Event response entity
// One member's answer to an event invitation, plus aggregate counts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EventId, MemberId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseChoice {
    Accepted,
    Declined,
}

impl ResponseChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseChoice::Accepted => "accepted",
            ResponseChoice::Declined => "declined",
        }
    }
}

/// The stored answer. One row per (event, member); a later answer
/// replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub event_id: EventId,
    pub member_id: MemberId,
    pub choice: ResponseChoice,
    pub responded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStats {
    pub accepted: u32,
    pub declined: u32,
    pub pending: u32,
}

impl ResponseStats {
    /// Pending counts roster members without an answer. Responders who
    /// have left the roster push the responded total past the roster
    /// size; pending floors at zero instead of going negative.
    pub fn tally(responses: &[EventResponse], roster_size: usize) -> Self {
        let accepted = responses
            .iter()
            .filter(|r| r.choice == ResponseChoice::Accepted)
            .count() as u32;
        let declined = responses
            .iter()
            .filter(|r| r.choice == ResponseChoice::Declined)
            .count() as u32;
        let pending = (roster_size as u32).saturating_sub(accepted + declined);
        Self {
            accepted,
            declined,
            pending,
        }
    }
}

/// Responses for one event together with the derived counts.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesSnapshot {
    pub event_id: EventId,
    pub responses: Vec<EventResponse>,
    pub stats: ResponseStats,
}
