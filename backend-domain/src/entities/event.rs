// Event entity
// A single calendar entry for a team: a training session or a match

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::repeat::RepeatPattern;
use crate::errors::ValidationError;
use crate::value_objects::{EventId, MemberId, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Training,
    Match,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Training => "training",
            EventKind::Match => "match",
        }
    }
}

/// A persisted event. Times are local wall-clock values on `date`;
/// only the response cutoff is interpreted in UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub team_id: TeamId,
    pub kind: EventKind,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<NaiveTime>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub requires_response: bool,
    pub is_repeating: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_pattern: Option<RepeatPattern>,
    pub created_by: MemberId,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Responses close at the start of the event's calendar day (UTC).
    pub fn response_deadline(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn response_window_open(&self, now: DateTime<Utc>) -> bool {
        now < self.response_deadline()
    }
}

/// A validated event that has not been assigned an id yet.
/// The store mints the id on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub team_id: TeamId,
    pub kind: EventKind,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<NaiveTime>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub requires_response: bool,
    pub is_repeating: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_pattern: Option<RepeatPattern>,
    pub created_by: MemberId,
    pub created_at: DateTime<Utc>,
}

impl NewEvent {
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            team_id: self.team_id,
            kind: self.kind,
            title: self.title,
            date: self.date,
            meeting_time: self.meeting_time,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            opponent: self.opponent,
            notes: self.notes,
            requires_response: self.requires_response,
            is_repeating: self.is_repeating,
            repeat_pattern: self.repeat_pattern,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }

    /// Marks the event as one occurrence of a repeating series.
    pub fn repeating(mut self, pattern: RepeatPattern) -> Self {
        self.is_repeating = true;
        self.repeat_pattern = Some(pattern);
        self
    }

    /// Same event template on another date. Used when expanding a series.
    pub fn on_date(&self, date: NaiveDate) -> Self {
        let mut event = self.clone();
        event.date = date;
        event
    }
}

/// Unvalidated creation payload as it arrives over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub team_id: TeamId,
    pub kind: EventKind,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm::option")]
    pub meeting_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_requires_response")]
    pub requires_response: bool,
}

fn default_requires_response() -> bool {
    true
}

impl EventDraft {
    /// Applies the scheduling rules and produces a storable event.
    ///
    /// Trainings need a start time and must not carry a meeting time.
    /// Matches need meeting and start times with meeting strictly first;
    /// a missing end time is derived from the configured match duration.
    pub fn into_new_event(
        self,
        created_by: MemberId,
        default_match_duration_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<NewEvent, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::new("title must not be empty"));
        }
        if self.team_id.0.trim().is_empty() {
            return Err(ValidationError::new("team_id must not be empty"));
        }

        let start_time = match self.kind {
            EventKind::Training => {
                if self.meeting_time.is_some() {
                    return Err(ValidationError::new(
                        "meeting_time is only used for matches",
                    ));
                }
                self.start_time
                    .ok_or_else(|| ValidationError::new("trainings require a start_time"))?
            }
            EventKind::Match => {
                let meeting = self
                    .meeting_time
                    .ok_or_else(|| ValidationError::new("matches require a meeting_time"))?;
                let start = self
                    .start_time
                    .ok_or_else(|| ValidationError::new("matches require a start_time"))?;
                if meeting >= start {
                    return Err(ValidationError::new(
                        "meeting_time must be before start_time",
                    ));
                }
                start
            }
        };

        let end_time = match (self.kind, self.end_time) {
            (_, Some(end)) => {
                if end <= start_time {
                    return Err(ValidationError::new("end_time must be after start_time"));
                }
                Some(end)
            }
            (EventKind::Match, None) => {
                let derived = start_time
                    + Duration::minutes(i64::from(default_match_duration_minutes));
                // NaiveTime addition wraps at midnight instead of overflowing
                if derived <= start_time {
                    return Err(ValidationError::new(
                        "start_time is too late: the derived end_time would cross midnight",
                    ));
                }
                Some(derived)
            }
            (EventKind::Training, None) => None,
        };

        Ok(NewEvent {
            team_id: self.team_id,
            kind: self.kind,
            title,
            date: self.date,
            meeting_time: self.meeting_time,
            start_time,
            end_time,
            location: self.location,
            opponent: self.opponent,
            notes: self.notes,
            requires_response: self.requires_response,
            is_repeating: false,
            repeat_pattern: None,
            created_by,
            created_at: now,
        })
    }
}

/// Serde helpers for `HH:MM` wall-clock times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| format!("invalid time '{raw}', expected HH:MM"))
    }

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
