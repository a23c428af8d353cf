//! Polar pass segmentation for low-Earth-orbit trajectories
//!
//! Splits a time-ordered latitude series into passes over the northern and
//! southern polar regions. A pass starts at a poleward crossing of the
//! boundary latitude and ends at the next equatorward crossing of it.
//!
//! ## Main Components
//! - `PassSegmenter`: single forward scan, gap inference, trimming, pairing
//! - `Crossing` / `CrossingSlot`: detected crossings and inferred placeholders
//! - `Pass` / `PassRecord`: paired crossings, typed and flat
//! - `SegmentObserver`: caller-supplied sink for diagnostic events

pub mod config;
pub mod crossing;
pub mod epoch;
pub mod equator;
pub mod error;
pub mod observer;
pub mod pass;
pub mod segmenter;

pub use config::SegmenterConfig;
pub use crossing::{Crossing, CrossingSlot, Direction, Hemisphere};
pub use epoch::Epoch;
pub use equator::{EquatorCrossing, equator_crossings};
pub use error::{Result, SegmentError};
pub use observer::{NullObserver, SegmentEvent, SegmentObserver, TracingObserver};
pub use pass::{Pass, PassRecord};
pub use segmenter::{PassSegmenter, Segmentation, segment};
