//! Hemisphere entries at the equator

use serde::Serialize;

use crate::crossing::Hemisphere;

/// The trajectory entered `entered` at sample `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquatorCrossing {
    pub index: usize,
    pub entered: Hemisphere,
}

/// Find every sample at which the trajectory moves into the other hemisphere.
///
/// A sample exactly on the equator counts as the hemisphere being entered,
/// so `-1, 0, 1` enters the north at index 1 and `1, 0, -1` enters the south
/// at index 1.
pub fn equator_crossings(latitude: &[f64]) -> Vec<EquatorCrossing> {
    latitude
        .windows(2)
        .enumerate()
        .filter_map(|(k, pair)| {
            let entered = if pair[0] < 0.0 && pair[1] >= 0.0 {
                Hemisphere::North
            } else if pair[0] > 0.0 && pair[1] <= 0.0 {
                Hemisphere::South
            } else {
                return None;
            };
            Some(EquatorCrossing { index: k + 1, entered })
        })
        .collect()
}
