/// Pipeline configuration
use crate::args::{TranscodeArgs, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
use crate::error::{Result, TranscoderError};
use crate::locator::{FfmpegLocator, DEFAULT_CANDIDATES};
use crate::process::FfmpegProcess;
use crate::pump::PumpStats;
use pcm_volume::{VolumeFilter, VolumeSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tokio::io::{AsyncRead, AsyncWrite};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub volume: VolumeSettings,

    #[serde(default)]
    pub ffmpeg: FfmpegSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FfmpegSettings {
    #[serde(default = "default_candidates")]
    pub candidates: Vec<PathBuf>,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Extra arguments inserted before the output options
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_candidates() -> Vec<PathBuf> {
    DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect()
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_channels() -> u16 {
    DEFAULT_CHANNELS
}

impl Default for FfmpegSettings {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            extra_args: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables use the `PCM` prefix and `__` as the nesting
    /// separator, e.g. `PCM_VOLUME__VOLUME=0.5`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(TranscoderError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("PCM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: Self = settings.build()?.try_deserialize()?;
        loaded.validate()?;

        tracing::debug!(
            format = %loaded.volume.format,
            volume = loaded.volume.volume,
            sample_rate = loaded.ffmpeg.sample_rate,
            channels = loaded.ffmpeg.channels,
            "Loaded pipeline configuration"
        );
        Ok(loaded)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.volume.validate()?;

        if self.ffmpeg.candidates.is_empty() {
            return Err(TranscoderError::Config(
                "At least one transcoder candidate is required".to_string(),
            ));
        }
        if self.ffmpeg.sample_rate == 0 {
            return Err(TranscoderError::Config(
                "Sample rate must be greater than zero".to_string(),
            ));
        }
        if self.ffmpeg.channels == 0 {
            return Err(TranscoderError::Config(
                "Channel count must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn locator(&self) -> FfmpegLocator {
        FfmpegLocator::new(self.ffmpeg.candidates.iter().cloned())
    }

    /// Transcoder arguments producing raw PCM in the configured format
    pub fn transcode_args(&self) -> TranscodeArgs {
        TranscodeArgs::new()
            .args(&self.ffmpeg.extra_args)
            .args(
                TranscodeArgs::raw_pcm(
                    self.volume.format,
                    self.ffmpeg.sample_rate,
                    self.ffmpeg.channels,
                )
                .as_slice(),
            )
    }

    pub fn volume_filter(&self) -> Result<VolumeFilter> {
        Ok(self.volume.build()?)
    }

    /// Bytes read from the transcoder per pump iteration
    pub fn chunk_size(&self) -> usize {
        self.volume.chunk_size
    }

    /// Run `process` with a freshly built filter and the configured chunk size
    pub async fn run<R, W>(
        &self,
        process: FfmpegProcess,
        input: &mut R,
        output: &mut W,
    ) -> Result<(PumpStats, ExitStatus)>
    where
        R: AsyncRead + Unpin + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut filter = self.volume_filter()?;
        process
            .run(input, output, &mut filter, self.chunk_size())
            .await
    }
}
