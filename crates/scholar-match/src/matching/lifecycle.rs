//! Deadline arithmetic for listings. Callers always pass `today` explicitly.

use chrono::{Days, NaiveDate};

use super::domain::Scholarship;

/// Open when there is no deadline or the deadline has not passed.
pub fn is_open(scholarship: &Scholarship, today: NaiveDate) -> bool {
    scholarship
        .deadline
        .map_or(true, |deadline| deadline >= today)
}

/// Whole days until the deadline; negative once it has passed.
pub fn days_remaining(scholarship: &Scholarship, today: NaiveDate) -> Option<i64> {
    scholarship
        .deadline
        .map(|deadline| (deadline - today).num_days())
}

/// Deadline falls between today and `window_days` from now, inclusive.
pub fn closes_within(scholarship: &Scholarship, today: NaiveDate, window_days: u32) -> bool {
    days_remaining(scholarship, today)
        .is_some_and(|remaining| (0..=i64::from(window_days)).contains(&remaining))
}

/// Deadline passed more than `grace_days` ago; the listing can be retired.
///
/// A grace period reaching past the earliest representable date never expires.
pub fn is_stale(scholarship: &Scholarship, today: NaiveDate, grace_days: u32) -> bool {
    let Some(cutoff) = today.checked_sub_days(Days::new(u64::from(grace_days))) else {
        return false;
    };
    scholarship
        .deadline
        .is_some_and(|deadline| deadline < cutoff)
}
