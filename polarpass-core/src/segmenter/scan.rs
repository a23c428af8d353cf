//! Crossing detection for a single pair of adjacent samples

use crate::crossing::{Crossing, Direction, Hemisphere};
use crate::epoch::Epoch;
use crate::error::{Result, SegmentError};

/// -1, 0 or 1. Zero and NaN map to 0, unlike `f64::signum`.
pub(crate) fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Threshold latitude used for each sample
#[derive(Debug, Clone, Copy)]
pub(crate) struct Boundary {
    magnitude: f64,
    mirror_southern: bool,
}

impl Boundary {
    pub(crate) fn new(boundary_lat: f64, mirror_southern: bool) -> Self {
        Self {
            magnitude: boundary_lat.abs(),
            mirror_southern,
        }
    }

    fn threshold_for(&self, latitude: f64) -> f64 {
        if self.mirror_southern && latitude < 0.0 {
            -self.magnitude
        } else {
            self.magnitude
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StepOutcome<T> {
    Quiet,
    Crossing(Crossing<T>),
    /// Samples on opposite sides of the equator: the hemisphere being left
    /// gets an exit and the one being entered gets an entry
    Straddle { exit: Crossing<T>, entry: Crossing<T> },
}

/// Examine the pair `(t, t + 1)`.
///
/// The boundary lies between the two samples when `|ldiff| < |dl|` and both
/// have the same sign, with `ldiff = boundary - lat[t]` and
/// `dl = lat[t+1] - lat[t]`. A sample exactly on the boundary never
/// satisfies this, so no crossing is declared for it.
///
/// With mirrored boundaries a step that changes hemisphere is judged
/// against both caps separately instead.
pub(crate) fn examine_pair<T: Epoch>(
    times: &[T],
    latitude: &[f64],
    t: usize,
    boundary: &Boundary,
) -> Result<StepOutcome<T>> {
    let lat0 = latitude[t];
    let lat1 = latitude[t + 1];

    if boundary.mirror_southern && sign(lat0) * sign(lat1) < 0 {
        return Ok(split_straddle(times, t, lat0, lat1, boundary.magnitude));
    }

    let dl = lat1 - lat0;
    let ldiff = boundary.threshold_for(lat0) - lat0;
    if !(ldiff.abs() < dl.abs() && sign(ldiff) == sign(dl)) {
        return Ok(StepOutcome::Quiet);
    }

    let hemi = sign(lat0);
    // Positive when moving poleward (or over the equator), negative when
    // moving equatorward
    let poleprod = dl * f64::from(hemi);
    // Negative when the samples straddle the equator
    let eqcross = hemi * sign(lat1);

    if !(poleprod > 0.0 || poleprod < 0.0) {
        return Err(geometry_error(t, lat0, lat1, "dl * sign(latitude) is zero"));
    }
    if eqcross == 0 {
        return Err(geometry_error(t, lat0, lat1, "sample lies exactly on the equator"));
    }

    let fraction = ldiff / dl;
    if eqcross > 0 {
        let hemisphere = if hemi > 0 { Hemisphere::North } else { Hemisphere::South };
        let direction = if poleprod > 0.0 { Direction::Poleward } else { Direction::Equatorward };
        Ok(StepOutcome::Crossing(crossing_at(times, t, dl, direction, hemisphere, fraction)))
    } else {
        let (left, entered) = if hemi > 0 {
            (Hemisphere::North, Hemisphere::South)
        } else {
            (Hemisphere::South, Hemisphere::North)
        };
        Ok(StepOutcome::Straddle {
            exit: crossing_at(times, t, dl, Direction::Equatorward, left, fraction),
            entry: crossing_at(times, t, dl, Direction::Poleward, entered, fraction),
        })
    }
}

/// Sign change with mirrored boundaries. The cap being left and the cap
/// being entered each have their own threshold, so either crossing can
/// happen without the other.
fn split_straddle<T: Epoch>(times: &[T], t: usize, lat0: f64, lat1: f64, magnitude: f64) -> StepOutcome<T> {
    let dl = lat1 - lat0;
    let (left, entered) = if lat0 > 0.0 {
        (Hemisphere::North, Hemisphere::South)
    } else {
        (Hemisphere::South, Hemisphere::North)
    };

    let exit = (lat0.abs() > magnitude).then(|| {
        let fraction = (lat0.signum() * magnitude - lat0) / dl;
        crossing_at(times, t, dl, Direction::Equatorward, left, fraction)
    });
    let entry = (lat1.abs() > magnitude).then(|| {
        let fraction = (lat1.signum() * magnitude - lat0) / dl;
        crossing_at(times, t, dl, Direction::Poleward, entered, fraction)
    });

    match (exit, entry) {
        (Some(exit), Some(entry)) => StepOutcome::Straddle { exit, entry },
        (Some(crossing), None) | (None, Some(crossing)) => StepOutcome::Crossing(crossing),
        (None, None) => StepOutcome::Quiet,
    }
}

/// Poleward crossings are anchored on `t + 1`, equatorward ones on `t`
fn crossing_at<T: Epoch>(
    times: &[T],
    t: usize,
    delta_lat: f64,
    direction: Direction,
    hemisphere: Hemisphere,
    fraction: f64,
) -> Crossing<T> {
    let sample_index = match direction {
        Direction::Poleward => t + 1,
        Direction::Equatorward => t,
    };
    Crossing {
        direction,
        hemisphere,
        sample_index,
        time: times[sample_index],
        fraction,
        delta_t: times[t + 1].seconds_since(&times[t]),
        delta_lat,
    }
}

fn geometry_error(index: usize, latitude: f64, next_latitude: f64, reason: &str) -> SegmentError {
    SegmentError::InvalidCrossingGeometry {
        index,
        latitude,
        next_latitude,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: Boundary = Boundary { magnitude: 50.0, mirror_southern: false };

    fn examine(lats: [f64; 2], boundary: &Boundary) -> Result<StepOutcome<f64>> {
        examine_pair(&[100.0, 104.0], &lats, 0, boundary)
    }

    fn single(outcome: StepOutcome<f64>) -> Crossing<f64> {
        match outcome {
            StepOutcome::Crossing(c) => c,
            other => panic!("expected a single crossing, got {:?}", other),
        }
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.2), 1);
        assert_eq!(sign(-0.1), -1);
        assert_eq!(sign(0.0), 0);
        assert_eq!(sign(-0.0), 0);
        assert_eq!(sign(f64::NAN), 0);
    }

    #[test]
    fn test_poleward_north() {
        // lb = 50, 48 -> 51: ldiff 2, dl 3, frac 2/3
        let c = single(examine([48.0, 51.0], &PLAIN).unwrap());
        assert_eq!(c.direction, Direction::Poleward);
        assert_eq!(c.hemisphere, Hemisphere::North);
        assert_eq!(c.sample_index, 1);
        assert_eq!(c.time, 104.0);
        assert!((c.fraction - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(c.delta_t, 4.0);
        assert_eq!(c.delta_lat, 3.0);
    }

    #[test]
    fn test_equatorward_north() {
        // lb = 50, 51 -> 48: ldiff -1, dl -3, frac 1/3
        let c = single(examine([51.0, 48.0], &PLAIN).unwrap());
        assert_eq!(c.direction, Direction::Equatorward);
        assert_eq!(c.hemisphere, Hemisphere::North);
        assert_eq!(c.sample_index, 0);
        assert_eq!(c.time, 100.0);
        assert!((c.fraction - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_crossing_below_boundary() {
        assert_eq!(examine([30.0, 45.0], &PLAIN).unwrap(), StepOutcome::Quiet);
        assert_eq!(examine([55.0, 70.0], &PLAIN).unwrap(), StepOutcome::Quiet);
    }

    #[test]
    fn test_exact_boundary_sample_is_not_a_crossing() {
        assert_eq!(examine([40.0, 50.0], &PLAIN).unwrap(), StepOutcome::Quiet);
        assert_eq!(examine([50.0, 60.0], &PLAIN).unwrap(), StepOutcome::Quiet);
        assert_eq!(examine([50.0, 40.0], &PLAIN).unwrap(), StepOutcome::Quiet);
    }

    #[test]
    fn test_southern_boundary_ignored_without_mirroring() {
        assert_eq!(examine([-48.0, -52.0], &PLAIN).unwrap(), StepOutcome::Quiet);
    }

    #[test]
    fn test_southern_boundary_with_mirroring() {
        let mirrored = Boundary::new(50.0, true);
        let c = single(examine([-48.0, -52.0], &mirrored).unwrap());
        assert_eq!(c.direction, Direction::Poleward);
        assert_eq!(c.hemisphere, Hemisphere::South);
        assert_eq!(c.sample_index, 1);
        assert!((c.fraction - 0.5).abs() < 1e-12);

        let c = single(examine([-52.0, -48.0], &mirrored).unwrap());
        assert_eq!(c.direction, Direction::Equatorward);
        assert_eq!(c.hemisphere, Hemisphere::South);
        assert_eq!(c.sample_index, 0);
    }

    #[test]
    fn test_equator_straddle_at_zero_boundary() {
        let zero = Boundary::new(0.0, false);
        match examine([5.0, -5.0], &zero).unwrap() {
            StepOutcome::Straddle { exit, entry } => {
                assert_eq!(exit.hemisphere, Hemisphere::North);
                assert_eq!(exit.direction, Direction::Equatorward);
                assert_eq!(exit.sample_index, 0);
                assert_eq!(entry.hemisphere, Hemisphere::South);
                assert_eq!(entry.direction, Direction::Poleward);
                assert_eq!(entry.sample_index, 1);
                assert_eq!(exit.delta_t, entry.delta_t);
                assert_eq!(exit.fraction, 0.5);
            }
            other => panic!("expected a straddle, got {:?}", other),
        }
    }

    #[test]
    fn test_straddle_across_data_gap() {
        // 55 -> -55 with lb = 50 jumps over both boundaries
        match examine([55.0, -55.0], &PLAIN).unwrap() {
            StepOutcome::Straddle { exit, entry } => {
                assert_eq!(exit.hemisphere, Hemisphere::North);
                assert_eq!(entry.hemisphere, Hemisphere::South);
            }
            other => panic!("expected a straddle, got {:?}", other),
        }
    }

    #[test]
    fn test_mirrored_jump_into_southern_cap() {
        // 10 -> -60 never reaches +50 but does pass -50
        let mirrored = Boundary::new(50.0, true);
        let c = single(examine([10.0, -60.0], &mirrored).unwrap());
        assert_eq!(c.direction, Direction::Poleward);
        assert_eq!(c.hemisphere, Hemisphere::South);
        assert_eq!(c.sample_index, 1);
        assert_eq!(c.time, 104.0);
        assert!((c.fraction - 60.0 / 70.0).abs() < 1e-12);
        assert_eq!(c.delta_lat, -70.0);
    }

    #[test]
    fn test_mirrored_jump_out_of_southern_cap() {
        // -55 -> 10 leaves the southern cap without reaching the northern one
        let mirrored = Boundary::new(50.0, true);
        let c = single(examine([-55.0, 10.0], &mirrored).unwrap());
        assert_eq!(c.direction, Direction::Equatorward);
        assert_eq!(c.hemisphere, Hemisphere::South);
        assert_eq!(c.sample_index, 0);
        assert_eq!(c.time, 100.0);
        assert!((c.fraction - 5.0 / 65.0).abs() < 1e-12);
    }

    #[test]
    fn test_mirrored_cap_to_cap_jump() {
        let mirrored = Boundary::new(50.0, true);
        match examine([55.0, -60.0], &mirrored).unwrap() {
            StepOutcome::Straddle { exit, entry } => {
                assert_eq!((exit.hemisphere, exit.direction), (Hemisphere::North, Direction::Equatorward));
                assert_eq!(exit.sample_index, 0);
                assert!((exit.fraction - 5.0 / 115.0).abs() < 1e-12);
                assert_eq!((entry.hemisphere, entry.direction), (Hemisphere::South, Direction::Poleward));
                assert_eq!(entry.sample_index, 1);
                assert!((entry.fraction - 105.0 / 115.0).abs() < 1e-12);
            }
            other => panic!("expected a straddle, got {:?}", other),
        }
    }

    #[test]
    fn test_mirrored_mid_latitude_equator_step_is_quiet() {
        let mirrored = Boundary::new(50.0, true);
        assert_eq!(examine([20.0, -30.0], &mirrored).unwrap(), StepOutcome::Quiet);
        assert_eq!(examine([-50.0, 10.0], &mirrored).unwrap(), StepOutcome::Quiet);
    }

    #[test]
    fn test_plain_rule_keeps_shared_fraction_straddle() {
        // Without mirroring a single comparison against +50 decides both sides
        assert_eq!(examine([10.0, -60.0], &PLAIN).unwrap(), StepOutcome::Quiet);
        assert_eq!(examine([-55.0, 10.0], &PLAIN).unwrap(), StepOutcome::Quiet);
        match examine([-5.0, 60.0], &PLAIN).unwrap() {
            StepOutcome::Straddle { exit, entry } => {
                assert_eq!(exit.hemisphere, Hemisphere::South);
                assert_eq!(entry.hemisphere, Hemisphere::North);
                assert_eq!(exit.fraction, entry.fraction);
                assert!((exit.fraction - 55.0 / 65.0).abs() < 1e-12);
            }
            other => panic!("expected a straddle, got {:?}", other),
        }
    }

    #[test]
    fn test_sample_on_equator_is_fatal() {
        let small = Boundary::new(10.0, false);
        let err = examine([0.0, 20.0], &small).unwrap_err();
        assert!(matches!(err, SegmentError::InvalidCrossingGeometry { index: 0, .. }));

        let err = examine([20.0, 0.0], &small).unwrap_err();
        assert!(matches!(err, SegmentError::InvalidCrossingGeometry { .. }));
    }
}
