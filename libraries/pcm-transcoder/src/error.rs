/// Transcoder error types
use pcm_volume::VolumeError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscoderError>;

#[derive(Debug, Error)]
pub enum TranscoderError {
    #[error("FFmpeg/avconv not found (tried: {tried:?})")]
    NotFound { tried: Vec<PathBuf> },

    #[error("Failed to spawn {command:?}: {source}")]
    Spawn {
        command: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcoder {0} pipe is not available")]
    MissingPipe(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Volume filter error: {0}")]
    Volume(#[from] VolumeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for TranscoderError {
    fn from(err: config::ConfigError) -> Self {
        TranscoderError::Config(err.to_string())
    }
}
