//! Error types for volume filter construction

use thiserror::Error;

/// Result type for volume filter operations
pub type Result<T> = std::result::Result<T, VolumeError>;

/// Errors raised while configuring a volume filter
///
/// Streaming itself never fails: these only surface when a filter is built
/// or its multiplier is changed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolumeError {
    /// Sample width other than 2 or 4 bytes
    #[error("Unsupported sample width: {0} bytes (must be 2 or 4)")]
    UnsupportedSampleWidth(usize),

    /// Negative, NaN or infinite multiplier
    #[error("Invalid volume: {0} (must be finite and non-negative)")]
    InvalidVolume(f64),

    /// Zero-sized read chunk for a stream adapter
    #[error("Invalid chunk size: must be greater than zero")]
    InvalidChunkSize,

    /// Unrecognised raw format name
    #[error("Unknown sample format: {0} (expected s16le, s16be, s32le or s32be)")]
    UnknownFormat(String),
}
