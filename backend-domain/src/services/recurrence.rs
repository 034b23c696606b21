// Recurrence service
// Expands a repeat pattern into the concrete dates of a series

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::entities::{Cadence, RepeatEnd, RepeatPattern};

/// Hard ceiling on how far a count-bounded series may reach past its
/// first date. Keeps a sparse weekly pattern from walking forever.
pub const SAFETY_HORIZON_DAYS: u64 = 365;

/// Walks forward from `base` and collects every date the pattern emits.
///
/// The walk stops once the cursor passes the end date (count-bounded
/// series use the safety horizon instead), or once a count-bounded
/// series has produced enough occurrences. The base date itself is
/// emitted only if the pattern matches it, so the result can be empty.
pub fn expand_dates(base: NaiveDate, pattern: &RepeatPattern) -> Vec<NaiveDate> {
    let limit = match pattern.end {
        RepeatEnd::Until(until) => until,
        RepeatEnd::Count(_) => match base.checked_add_days(Days::new(SAFETY_HORIZON_DAYS)) {
            Some(horizon) => horizon,
            None => return Vec::new(),
        },
    };

    let mut dates = Vec::new();
    let mut cursor = base;
    while cursor <= limit && !is_complete(&dates, &pattern.end) {
        let emit = match &pattern.cadence {
            Cadence::Weekly { days_of_week, .. } => days_of_week.contains(&weekday_index(cursor)),
            Cadence::Daily { .. } | Cadence::Monthly { .. } => true,
        };
        if emit {
            dates.push(cursor);
        }
        cursor = match advance(cursor, &pattern.cadence) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

fn is_complete(dates: &[NaiveDate], end: &RepeatEnd) -> bool {
    matches!(end, RepeatEnd::Count(count) if dates.len() >= *count as usize)
}

fn advance(cursor: NaiveDate, cadence: &Cadence) -> Option<NaiveDate> {
    match cadence {
        // Weekly patterns inspect every day; the listed weekdays filter.
        Cadence::Weekly { .. } => cursor.checked_add_days(Days::new(1)),
        Cadence::Daily { interval } => cursor.checked_add_days(Days::new(u64::from(*interval))),
        // Month arithmetic clamps to the last valid day (Jan 31 -> Feb 28).
        Cadence::Monthly { interval } => cursor.checked_add_months(Months::new(*interval)),
    }
}

/// JS-style weekday numbering: 0 = Sunday .. 6 = Saturday.
fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
