// Repeat pattern entity
// Describes how a repeating series unfolds from its first date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub const MIN_REPEAT_INTERVAL: u32 = 1;
pub const MAX_REPEAT_INTERVAL: u32 = 30;

/// Validated cadence of a repeating series.
///
/// Weekly series walk day by day and emit on the listed weekdays
/// (0 = Sunday .. 6 = Saturday), so their interval only records what
/// the caller asked for. Daily and monthly series step by `interval`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum Cadence {
    Daily { interval: u32 },
    Weekly { interval: u32, days_of_week: Vec<u8> },
    Monthly { interval: u32 },
}

/// When a repeating series stops producing occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatEnd {
    Until(NaiveDate),
    Count(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatPattern {
    #[serde(flatten)]
    pub cadence: Cadence,
    pub end: RepeatEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

/// Unvalidated repeat payload as it arrives over the wire. The two end
/// conditions are separate optional fields there; exactly one must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct RepeatDraft {
    pub frequency: Frequency,
    pub interval: u32,
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub occurrence_count: Option<u32>,
}

impl RepeatDraft {
    pub fn validate(self, base_date: NaiveDate) -> Result<RepeatPattern, ValidationError> {
        if !(MIN_REPEAT_INTERVAL..=MAX_REPEAT_INTERVAL).contains(&self.interval) {
            return Err(ValidationError::new(format!(
                "interval must be between {MIN_REPEAT_INTERVAL} and {MAX_REPEAT_INTERVAL}"
            )));
        }

        let cadence = match self.frequency {
            Frequency::Weekly => {
                if self.days_of_week.is_empty() {
                    return Err(ValidationError::new(
                        "weekly patterns require at least one days_of_week entry",
                    ));
                }
                if self.days_of_week.iter().any(|day| *day > 6) {
                    return Err(ValidationError::new(
                        "days_of_week values must be 0..=6 (0 = Sunday)",
                    ));
                }
                let mut days = self.days_of_week;
                days.sort_unstable();
                days.dedup();
                Cadence::Weekly {
                    interval: self.interval,
                    days_of_week: days,
                }
            }
            Frequency::Daily | Frequency::Monthly => {
                if !self.days_of_week.is_empty() {
                    return Err(ValidationError::new(
                        "days_of_week is only used by weekly patterns",
                    ));
                }
                match self.frequency {
                    Frequency::Daily => Cadence::Daily {
                        interval: self.interval,
                    },
                    _ => Cadence::Monthly {
                        interval: self.interval,
                    },
                }
            }
        };

        let end = match (self.end_date, self.occurrence_count) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::new(
                    "specify either end_date or occurrence_count, not both",
                ));
            }
            (None, None) => {
                return Err(ValidationError::new(
                    "an end condition is required: end_date or occurrence_count",
                ));
            }
            (Some(date), None) => {
                if date < base_date {
                    return Err(ValidationError::new(
                        "end_date must not be before the event date",
                    ));
                }
                RepeatEnd::Until(date)
            }
            (None, Some(count)) => {
                if count == 0 {
                    return Err(ValidationError::new("occurrence_count must be at least 1"));
                }
                RepeatEnd::Count(count)
            }
        };

        Ok(RepeatPattern { cadence, end })
    }
}
