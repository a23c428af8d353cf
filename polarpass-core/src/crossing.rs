//! Boundary crossing records

use serde::{Deserialize, Serialize};

use crate::epoch::Epoch;

/// Hemisphere a crossing is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south",
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of travel across the boundary latitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Entering the polar region; starts a pass
    Poleward,
    /// Leaving the polar region; ends a pass
    Equatorward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Poleward => "poleward",
            Direction::Equatorward => "equatorward",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One observed crossing of the boundary latitude.
///
/// The crossing lies between two adjacent samples. Poleward crossings are
/// anchored at the later sample, equatorward crossings at the earlier one;
/// `time` is the timestamp of the anchor sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Crossing<T> {
    pub direction: Direction,
    pub hemisphere: Hemisphere,
    /// Index of the anchor sample
    pub sample_index: usize,
    /// Timestamp of the anchor sample
    pub time: T,
    /// Position of the true crossing between the bracketing samples, in [0, 1)
    pub fraction: f64,
    /// Seconds between the bracketing samples
    pub delta_t: f64,
    /// Latitude change between the bracketing samples (degrees)
    pub delta_lat: f64,
}

impl<T: Epoch> Crossing<T> {
    /// Index of the earlier of the two bracketing samples
    pub fn bracket_start(&self) -> usize {
        match self.direction {
            Direction::Poleward => self.sample_index - 1,
            Direction::Equatorward => self.sample_index,
        }
    }

    /// Interpolated instant at which the boundary was crossed
    pub fn estimated_instant(&self) -> T {
        match self.direction {
            Direction::Poleward => self.time.offset_by((self.fraction - 1.0) * self.delta_t),
            Direction::Equatorward => self.time.offset_by(self.fraction * self.delta_t),
        }
    }
}

/// A position in a crossing list: either an observed crossing or a
/// placeholder inferred across a data gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CrossingSlot<T> {
    Observed(Crossing<T>),
    Placeholder,
}

impl<T> CrossingSlot<T> {
    pub fn observed(&self) -> Option<&Crossing<T>> {
        match self {
            CrossingSlot::Observed(crossing) => Some(crossing),
            CrossingSlot::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CrossingSlot::Placeholder)
    }
}

impl<T> From<Crossing<T>> for CrossingSlot<T> {
    fn from(crossing: Crossing<T>) -> Self {
        CrossingSlot::Observed(crossing)
    }
}
