/// Construction-time volume filter settings
use crate::error::{Result, VolumeError};
use crate::filter::VolumeFilter;
use crate::format::SampleFormat;
use crate::io::DEFAULT_CHUNK_SIZE;
use crate::transformer::{validate_volume, UNITY_VOLUME};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VolumeSettings {
    #[serde(default)]
    pub format: SampleFormat,

    /// Initial linear multiplier
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Bytes read per chunk by streaming adapters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_volume() -> f64 {
    UNITY_VOLUME
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            format: SampleFormat::default(),
            volume: default_volume(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl VolumeSettings {
    pub fn validate(&self) -> Result<()> {
        validate_volume(self.volume)?;
        if self.chunk_size == 0 {
            return Err(VolumeError::InvalidChunkSize);
        }
        Ok(())
    }

    /// Validate and build a filter with these settings
    pub fn build(&self) -> Result<VolumeFilter> {
        self.validate()?;
        VolumeFilter::with_volume(self.format, self.volume)
    }
}
