//! Diagnostic sink for the segmenter
//!
//! The segmenter reports what it finds through an observer passed in by the
//! caller instead of writing to a process-wide logger.

use crate::crossing::{Crossing, Direction, Hemisphere};
use crate::epoch::Epoch;

/// Something the segmenter noticed while scanning
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentEvent<T> {
    ScanStarted {
        samples: usize,
        boundary_lat: f64,
        orbital_period_s: f64,
    },
    CrossingDetected(Crossing<T>),
    /// Adjacent samples on opposite sides of the equator produced an
    /// exit/entry pair in one step
    EquatorStraddle {
        index: usize,
        left: Hemisphere,
        time: T,
        next_time: T,
    },
    /// A placeholder was inserted between two same-kind crossings
    GapInferred {
        hemisphere: Hemisphere,
        direction: Direction,
        previous: T,
        next: T,
        gap_s: f64,
    },
    /// A crossing at the edge of the data with no partner was dropped
    DanglingTrimmed {
        hemisphere: Hemisphere,
        direction: Direction,
        time: T,
    },
    Completed {
        north_passes: usize,
        south_passes: usize,
    },
}

pub trait SegmentObserver<T> {
    fn on_event(&mut self, event: &SegmentEvent<T>);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl<T> SegmentObserver<T> for NullObserver {
    fn on_event(&mut self, _event: &SegmentEvent<T>) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<T: Epoch> SegmentObserver<T> for TracingObserver {
    fn on_event(&mut self, event: &SegmentEvent<T>) {
        match event {
            SegmentEvent::ScanStarted { samples, boundary_lat, orbital_period_s } => {
                tracing::info!(
                    "Beginning pass parse: {} datapoints, boundary_lat: {:.1}, orbital_period: {} sec",
                    samples,
                    boundary_lat,
                    orbital_period_s
                );
            }
            SegmentEvent::CrossingDetected(crossing) => {
                tracing::debug!(
                    "{}) Found {} {} crossing at {:?} (frac {:.3}, dt {:.1} s, dlat {:.3})",
                    crossing.bracket_start(),
                    crossing.hemisphere,
                    crossing.direction,
                    crossing.time,
                    crossing.fraction,
                    crossing.delta_t,
                    crossing.delta_lat
                );
            }
            SegmentEvent::EquatorStraddle { index, left, time, next_time } => {
                tracing::debug!(
                    "{}) Found equator crossing leaving the {} hemisphere between {:?} and {:?}",
                    index,
                    left,
                    time,
                    next_time
                );
            }
            SegmentEvent::GapInferred { hemisphere, direction, previous, next, gap_s } => {
                tracing::info!(
                    "Found missing {} {} crossing between {:?} and {:?} ({:.1} s apart)",
                    hemisphere,
                    direction,
                    previous,
                    next,
                    gap_s
                );
            }
            SegmentEvent::DanglingTrimmed { hemisphere, direction, time } => {
                let edge = match direction {
                    Direction::Poleward => "pass start at END",
                    Direction::Equatorward => "pass end at START",
                };
                tracing::debug!("Dangling {} hemisphere {} of data REMOVED ({:?})", hemisphere, edge, time);
            }
            SegmentEvent::Completed { north_passes, south_passes } => {
                tracing::info!(
                    "Pass parse complete: {} northern, {} southern passes",
                    north_passes,
                    south_passes
                );
            }
        }
    }
}

/// Records every event, mostly useful in tests
impl<T: Clone> SegmentObserver<T> for Vec<SegmentEvent<T>> {
    fn on_event(&mut self, event: &SegmentEvent<T>) {
        self.push(event.clone());
    }
}
