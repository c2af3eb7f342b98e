//! Calendar-day arithmetic in the reference timezone.
//!
//! Every day boundary in the check-in core is computed in UTC. A day spans the
//! half-open interval `[00:00:00, next 00:00:00)`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use mockable::Clock;

/// Instant bounds of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    /// First instant of the day (inclusive).
    pub start: DateTime<Utc>,
    /// First instant of the following day (exclusive).
    pub end: DateTime<Utc>,
}

impl DayBounds {
    /// Whether `at` falls inside these bounds.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Calendar day of an instant; the time of day is discarded.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use checkin_backend::domain::calendar_day;
///
/// let late = Utc.with_ymd_and_hms(2024, 1, 3, 23, 59, 59).unwrap();
/// assert_eq!(calendar_day(late), NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
/// ```
#[must_use]
pub fn calendar_day(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// Today's calendar day according to `clock`.
#[must_use]
pub fn today(clock: &dyn Clock) -> NaiveDate {
    calendar_day(clock.utc())
}

/// Instant bounds for `day`.
#[must_use]
pub fn day_bounds(day: NaiveDate) -> DayBounds {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    DayBounds {
        start,
        end: start + Duration::days(1),
    }
}
