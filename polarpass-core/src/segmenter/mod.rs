//! Pass segmenter
//!
//! One left-to-right scan over adjacent sample pairs collects poleward and
//! equatorward crossings per hemisphere. After the scan, dangling crossings
//! at the edges are trimmed and starts are paired with ends by position.

mod ledger;
mod scan;

use crate::config::SegmenterConfig;
use crate::crossing::{Crossing, CrossingSlot, Hemisphere};
use crate::epoch::Epoch;
use crate::error::{Result, SegmentError};
use crate::observer::{SegmentEvent, SegmentObserver, TracingObserver};
use crate::pass::Pass;

use ledger::HemisphereLedger;
use scan::{Boundary, StepOutcome};

/// Segment a trajectory with default settings apart from the boundary and
/// orbital period, returning `(north_passes, south_passes)`.
pub fn segment<T: Epoch>(
    times: &[T],
    latitude: &[f64],
    boundary_lat: f64,
    orbital_period_s: f64,
) -> Result<(Vec<Pass<T>>, Vec<Pass<T>>)> {
    let segmenter = PassSegmenter::new(SegmenterConfig::new(boundary_lat, orbital_period_s))?;
    Ok(segmenter.segment(times, latitude)?.into_passes())
}

/// Reusable segmenter holding a validated configuration
#[derive(Debug, Clone)]
pub struct PassSegmenter {
    config: SegmenterConfig,
}

impl PassSegmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment, reporting diagnostics through `tracing`
    pub fn segment<T: Epoch>(&self, times: &[T], latitude: &[f64]) -> Result<Segmentation<T>> {
        self.segment_with(times, latitude, &mut TracingObserver)
    }

    /// Segment, reporting diagnostics to `observer`.
    ///
    /// Fails with `InvalidInput` for mismatched or too-short inputs and with
    /// `InvalidCrossingGeometry` if a crossing cannot be classified; in both
    /// cases nothing is returned.
    pub fn segment_with<T: Epoch, O: SegmentObserver<T>>(
        &self,
        times: &[T],
        latitude: &[f64],
        observer: &mut O,
    ) -> Result<Segmentation<T>> {
        if times.len() != latitude.len() {
            return Err(SegmentError::InvalidInput(format!(
                "times and latitude differ in length ({} vs {})",
                times.len(),
                latitude.len()
            )));
        }
        if latitude.len() < 2 {
            return Err(SegmentError::InvalidInput(format!(
                "at least 2 samples are required, got {}",
                latitude.len()
            )));
        }

        observer.on_event(&SegmentEvent::ScanStarted {
            samples: latitude.len(),
            boundary_lat: self.config.boundary_lat,
            orbital_period_s: self.config.orbital_period_s,
        });

        let boundary = Boundary::new(self.config.boundary_lat, self.config.mirror_southern_boundary);
        let gap_threshold_s = self.config.gap_threshold_s();
        let mut north = HemisphereLedger::new(Hemisphere::North);
        let mut south = HemisphereLedger::new(Hemisphere::South);

        let mut record = |crossing: Crossing<T>, observer: &mut O| {
            observer.on_event(&SegmentEvent::CrossingDetected(crossing));
            let ledger = match crossing.hemisphere {
                Hemisphere::North => &mut north,
                Hemisphere::South => &mut south,
            };
            ledger.record(crossing, gap_threshold_s, observer);
        };

        for t in 0..latitude.len() - 1 {
            match scan::examine_pair(times, latitude, t, &boundary)? {
                StepOutcome::Quiet => {}
                StepOutcome::Crossing(crossing) => record(crossing, &mut *observer),
                StepOutcome::Straddle { exit, entry } => {
                    observer.on_event(&SegmentEvent::EquatorStraddle {
                        index: t,
                        left: exit.hemisphere,
                        time: times[t],
                        next_time: times[t + 1],
                    });
                    record(exit, &mut *observer);
                    record(entry, &mut *observer);
                }
            }
        }

        north.trim_dangling(observer);
        south.trim_dangling(observer);

        let segmentation = Segmentation {
            north_passes: north.passes(),
            south_passes: south.passes(),
            north,
            south,
        };
        observer.on_event(&SegmentEvent::Completed {
            north_passes: segmentation.north_passes.len(),
            south_passes: segmentation.south_passes.len(),
        });

        Ok(segmentation)
    }
}

/// Result of a segmentation run: the paired passes and the crossing lists
/// they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation<T> {
    north: HemisphereLedger<T>,
    south: HemisphereLedger<T>,
    north_passes: Vec<Pass<T>>,
    south_passes: Vec<Pass<T>>,
}

impl<T: Epoch> Segmentation<T> {
    fn ledger(&self, hemisphere: Hemisphere) -> &HemisphereLedger<T> {
        match hemisphere {
            Hemisphere::North => &self.north,
            Hemisphere::South => &self.south,
        }
    }

    pub fn passes(&self, hemisphere: Hemisphere) -> &[Pass<T>] {
        match hemisphere {
            Hemisphere::North => &self.north_passes,
            Hemisphere::South => &self.south_passes,
        }
    }

    pub fn north_passes(&self) -> &[Pass<T>] {
        &self.north_passes
    }

    pub fn south_passes(&self) -> &[Pass<T>] {
        &self.south_passes
    }

    /// Passes without any inferred placeholder side
    pub fn complete_passes(&self, hemisphere: Hemisphere) -> impl Iterator<Item = &Pass<T>> + '_ {
        self.passes(hemisphere).iter().filter(|pass| pass.is_complete())
    }

    /// Start (poleward) crossing list after trimming, placeholders included
    pub fn starts(&self, hemisphere: Hemisphere) -> &[CrossingSlot<T>] {
        self.ledger(hemisphere).starts()
    }

    /// End (equatorward) crossing list after trimming, placeholders included
    pub fn ends(&self, hemisphere: Hemisphere) -> &[CrossingSlot<T>] {
        self.ledger(hemisphere).ends()
    }

    /// Observed crossings of a hemisphere in scan order
    pub fn timeline(&self, hemisphere: Hemisphere) -> Vec<&Crossing<T>> {
        self.ledger(hemisphere).timeline()
    }

    pub fn placeholder_count(&self, hemisphere: Hemisphere) -> usize {
        self.ledger(hemisphere).placeholder_count()
    }

    pub fn into_passes(self) -> (Vec<Pass<T>>, Vec<Pass<T>>) {
        (self.north_passes, self.south_passes)
    }
}
