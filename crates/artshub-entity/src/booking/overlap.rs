//! Interval arithmetic over active bookings.
//!
//! All intervals are half-open `[starts_at, ends_at)`, so a booking ending
//! at 11:00 never collides with one starting at 11:00.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Projection of an active booking used for capacity checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct BookedInterval {
    /// Start of the interval (inclusive).
    pub starts_at: DateTime<Utc>,
    /// End of the interval (exclusive).
    pub ends_at: DateTime<Utc>,
    /// Participants held by the booking.
    pub participant_count: i32,
}

impl BookedInterval {
    /// Check if this interval intersects `[starts_at, ends_at)`.
    pub fn intersects(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        self.starts_at < ends_at && self.ends_at > starts_at
    }
}

/// Sum of participants over every interval intersecting `[starts_at, ends_at)`.
///
/// This is the conservative load figure used by the availability read path.
/// It over-counts bookings that intersect the window without overlapping
/// each other, so a slot reported full may still admit a write.
pub fn overlapping_participants(
    intervals: &[BookedInterval],
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> i64 {
    intervals
        .iter()
        .filter(|interval| interval.intersects(starts_at, ends_at))
        .map(|interval| i64::from(interval.participant_count))
        .sum()
}

/// Maximum concurrent participants at any instant inside `[starts_at, ends_at)`.
///
/// This is the exact figure the write path checks against capacity. Each
/// interval is clipped to the window, then a sweep over start/end events
/// tracks the running total. Ends sort before starts at the same instant,
/// which is what makes back-to-back bookings coexist.
pub fn peak_concurrency(
    intervals: &[BookedInterval],
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> i64 {
    let mut events: Vec<(DateTime<Utc>, i64)> = Vec::with_capacity(intervals.len() * 2);
    for interval in intervals {
        let clipped_start = interval.starts_at.max(starts_at);
        let clipped_end = interval.ends_at.min(ends_at);
        if clipped_start >= clipped_end {
            continue;
        }
        let participants = i64::from(interval.participant_count);
        events.push((clipped_start, participants));
        events.push((clipped_end, -participants));
    }
    events.sort_by_key(|&(at, delta)| (at, delta));

    let mut current = 0;
    let mut peak = 0;
    for (_, delta) in events {
        current += delta;
        peak = peak.max(current);
    }
    peak
}
