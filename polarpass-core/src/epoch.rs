//! Timestamp abstraction used by the segmenter

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

/// A point in time that the segmenter can difference and offset.
///
/// Implemented for `DateTime<Utc>`, `NaiveDateTime` (treated as UTC) and
/// `f64` seconds, e.g. seconds of day from an ephemeris file.
pub trait Epoch: Copy + PartialOrd + std::fmt::Debug {
    /// Elapsed seconds from `earlier` to `self` (negative if `earlier` is later)
    fn seconds_since(&self, earlier: &Self) -> f64;

    /// The instant `seconds` after `self`
    fn offset_by(&self, seconds: f64) -> Self;
}

fn delta_seconds(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

fn seconds_delta(seconds: f64) -> TimeDelta {
    TimeDelta::microseconds((seconds * 1e6).round() as i64)
}

impl Epoch for DateTime<Utc> {
    fn seconds_since(&self, earlier: &Self) -> f64 {
        delta_seconds(*self - *earlier)
    }

    fn offset_by(&self, seconds: f64) -> Self {
        // Saturates at the representable range
        self.checked_add_signed(seconds_delta(seconds)).unwrap_or(*self)
    }
}

impl Epoch for NaiveDateTime {
    fn seconds_since(&self, earlier: &Self) -> f64 {
        delta_seconds(*self - *earlier)
    }

    fn offset_by(&self, seconds: f64) -> Self {
        self.checked_add_signed(seconds_delta(seconds)).unwrap_or(*self)
    }
}

impl Epoch for f64 {
    fn seconds_since(&self, earlier: &Self) -> f64 {
        self - earlier
    }

    fn offset_by(&self, seconds: f64) -> Self {
        self + seconds
    }
}
