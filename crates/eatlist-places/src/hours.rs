//! Next-closing-time calculation from weekly opening periods.
//!
//! Works on a fixed UTC offset only: `now` is shifted onto a synthetic
//! "local" UTC timeline, candidates are built there from local midnight, and
//! each is shifted back before comparison. No timezone database is involved,
//! so DST changes inside the coming week are not reflected.

use chrono::{DateTime, Datelike, NaiveTime, TimeDelta, Utc};

use crate::types::{OpeningHours, PeriodEvent};

/// Earliest close event strictly after `now`, or `None`.
///
/// For each period with a well-formed `close`, the close weekday is reached
/// by stepping `0..=6` days forward from today's local weekday. A close on
/// today's weekday whose time has already passed is therefore dropped, not
/// moved to next week; another period must supply the answer. A close at
/// exactly `now` is not in the future.
///
/// Returns `None` when hours or periods are absent, when the offset is absent
/// or non-finite, or when no period yields a future instant. Malformed
/// periods are skipped.
#[must_use]
pub fn next_close(
    opening_hours: Option<&OpeningHours>,
    utc_offset_minutes: Option<f64>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let periods = opening_hours?.periods.as_ref()?;
    let offset_minutes = utc_offset_minutes.filter(|m| m.is_finite())?;
    #[allow(clippy::cast_possible_truncation)]
    let offset = TimeDelta::try_milliseconds((offset_minutes * 60_000.0).round() as i64)?;

    let local_now = now.checked_add_signed(offset)?;
    let local_weekday = i64::from(local_now.weekday().num_days_from_sunday());
    let local_midnight = local_now.date_naive().and_time(NaiveTime::MIN).and_utc();

    periods
        .iter()
        .filter_map(|period| period.close.as_ref().and_then(close_event))
        .filter_map(|(day, minute_of_day)| {
            let days_ahead = (day - local_weekday).rem_euclid(7);
            let candidate = local_midnight
                .checked_add_signed(TimeDelta::try_days(days_ahead)?)?
                .checked_add_signed(TimeDelta::try_minutes(minute_of_day)?)?
                .checked_sub_signed(offset)?;
            (candidate > now).then_some(candidate)
        })
        .min()
}

/// `(weekday, minutes since local midnight)` for a usable close event.
///
/// The time needs at least three characters: hours are the first two,
/// minutes the next one or two.
fn close_event(event: &PeriodEvent) -> Option<(i64, i64)> {
    let day = event.day.filter(|d| (0..=6).contains(d))?;
    let time = event.time.as_deref()?;
    if time.len() < 3 {
        return None;
    }
    let hour: i64 = time.get(0..2)?.parse().ok()?;
    let minute: i64 = time.get(2..time.len().min(4))?.parse().ok()?;
    Some((day, hour * 60 + minute))
}
