use thiserror::Error;

/// Errors raised while segmenting a trajectory
///
/// Both variants abort the scan; no partial pass list is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    /// Malformed arrays or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A crossing was detected but its direction or hemisphere cannot be
    /// classified (a sample sits exactly on the equator)
    #[error(
        "Invalid crossing geometry after sample {index}: {reason} (lat {latitude} -> {next_latitude})"
    )]
    InvalidCrossingGeometry {
        index: usize,
        latitude: f64,
        next_latitude: f64,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SegmentError>;
