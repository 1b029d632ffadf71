//! PCM Transcoder
//!
//! Thin plumbing around an external FFmpeg process for feeding raw PCM into
//! a [`pcm_volume`] filter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────┐
//! │ Encoded     │ ──► │ FFmpeg       │ ──► │ VolumeFilter │ ──► │ PCM sink │
//! │ input       │     │ (stdin/out)  │     │ (pump)       │     │          │
//! └─────────────┘     └──────────────┘     └──────────────┘     └──────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pcm_transcoder::{FfmpegLocator, FfmpegProcess, TranscodeArgs};
//! use pcm_volume::{SampleFormat, VolumeFilter};
//!
//! let info = FfmpegLocator::default().locate().await?;
//! let process = FfmpegProcess::spawn(&info, TranscodeArgs::default_pcm())?;
//!
//! let mut filter = VolumeFilter::with_volume(SampleFormat::S16le, 0.5)?;
//! let (stats, status) = process.run(&mut input, &mut output, &mut filter, 4096).await?;
//! ```

#![deny(unsafe_code)]

mod args;
pub mod config;
mod error;
mod locator;
mod process;
mod pump;

pub use crate::args::{TranscodeArgs, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
pub use crate::config::{FfmpegSettings, PipelineConfig};
pub use crate::error::{Result, TranscoderError};
pub use crate::locator::{FfmpegInfo, FfmpegLocator, DEFAULT_CANDIDATES};
pub use crate::process::FfmpegProcess;
pub use crate::pump::{pump, PumpStats};
