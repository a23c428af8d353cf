//! Pass records produced by pairing start and end crossings

use serde::Serialize;

use crate::crossing::{Crossing, CrossingSlot, Hemisphere};
use crate::epoch::Epoch;

/// One excursion into a hemisphere's polar region.
///
/// Either side may be a placeholder when the pass was reconstructed across a
/// data gap; such passes should be treated as lower confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pass<T> {
    pub hemisphere: Hemisphere,
    pub start: CrossingSlot<T>,
    pub end: CrossingSlot<T>,
}

impl<T: Epoch> Pass<T> {
    pub fn start_crossing(&self) -> Option<&Crossing<T>> {
        self.start.observed()
    }

    pub fn end_crossing(&self) -> Option<&Crossing<T>> {
        self.end.observed()
    }

    pub fn start_time(&self) -> Option<T> {
        self.start_crossing().map(|c| c.time)
    }

    pub fn end_time(&self) -> Option<T> {
        self.end_crossing().map(|c| c.time)
    }

    pub fn start_index(&self) -> Option<usize> {
        self.start_crossing().map(|c| c.sample_index)
    }

    pub fn end_index(&self) -> Option<usize> {
        self.end_crossing().map(|c| c.sample_index)
    }

    /// True when neither side is an inferred placeholder
    pub fn is_complete(&self) -> bool {
        !self.start.is_placeholder() && !self.end.is_placeholder()
    }

    /// Seconds between the interpolated entry and exit instants
    pub fn duration_s(&self) -> Option<f64> {
        let start = self.start_crossing()?.estimated_instant();
        let end = self.end_crossing()?.estimated_instant();
        Some(end.seconds_since(&start))
    }

    pub fn to_record(&self) -> PassRecord<T> {
        PassRecord::from(self)
    }
}

/// Flat, nullable view of a pass.
///
/// `s_*` fields describe the poleward (start) crossing and `e_*` fields the
/// equatorward (end) crossing. Every field is `None` on a placeholder side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassRecord<T> {
    pub hemisphere: Hemisphere,
    pub s_time: Option<T>,
    pub e_time: Option<T>,
    pub s_ind: Option<usize>,
    pub e_ind: Option<usize>,
    pub s_frac: Option<f64>,
    pub e_frac: Option<f64>,
    pub s_dt: Option<f64>,
    pub e_dt: Option<f64>,
    pub s_dl: Option<f64>,
    pub e_dl: Option<f64>,
}

impl<T: Epoch> From<&Pass<T>> for PassRecord<T> {
    fn from(pass: &Pass<T>) -> Self {
        let start = pass.start_crossing();
        let end = pass.end_crossing();
        Self {
            hemisphere: pass.hemisphere,
            s_time: start.map(|c| c.time),
            e_time: end.map(|c| c.time),
            s_ind: start.map(|c| c.sample_index),
            e_ind: end.map(|c| c.sample_index),
            s_frac: start.map(|c| c.fraction),
            e_frac: end.map(|c| c.fraction),
            s_dt: start.map(|c| c.delta_t),
            e_dt: end.map(|c| c.delta_t),
            s_dl: start.map(|c| c.delta_lat),
            e_dl: end.map(|c| c.delta_lat),
        }
    }
}
