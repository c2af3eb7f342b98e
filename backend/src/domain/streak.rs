//! Consecutive-day streak arithmetic.
//!
//! A streak is the unbroken run of calendar days, ending today or yesterday,
//! on which a fan checked in to a creator. Runs whose latest day is older than
//! yesterday count as lapsed and report zero; there is no explicit reset.

use chrono::NaiveDate;

use super::CheckinRecord;

/// Streak length for records ordered newest first.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use checkin_backend::domain::streak_from_days;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// assert_eq!(streak_from_days([day(3), day(2), day(1)], day(3)), 3);
/// assert_eq!(streak_from_days([day(3), day(1)], day(5)), 0);
/// ```
pub fn streak_from_days<I>(days_newest_first: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut days = days_newest_first.into_iter();
    let Some(latest) = days.next() else {
        return 0;
    };
    if latest != today && Some(latest) != today.pred_opt() {
        return 0;
    }

    let mut streak = 1_u32;
    let mut expected = latest;
    for day in days {
        if day == expected {
            continue;
        }
        if Some(day) != expected.pred_opt() {
            break;
        }
        streak = streak.saturating_add(1);
        expected = day;
    }
    streak
}

/// Streak length over stored records ordered by descending timestamp.
pub fn streak_length(records_newest_first: &[CheckinRecord], today: NaiveDate) -> u32 {
    streak_from_days(records_newest_first.iter().map(CheckinRecord::day), today)
}
