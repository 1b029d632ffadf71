//! PCM Volume
//!
//! Streaming amplitude scaling for raw interleaved signed integer PCM.
//!
//! This crate provides:
//! - A generic carry-over engine, [`VolumeTransformer`], over 16/32-bit
//!   little/big-endian sample codecs
//! - [`VolumeFilter`], the same engine with its layout picked at runtime
//! - Blocking [`VolumeReader`]/[`VolumeWriter`] adapters over `std::io`
//!
//! Chunks may split samples anywhere. Complete samples are rescaled
//! (multiply, truncate toward zero, saturate) and emitted; a trailing partial
//! sample is held until the next chunk and dropped at end of stream.
//!
//! # Example
//!
//! ```rust
//! use pcm_volume::{SampleFormat, VolumeFilter};
//!
//! let mut filter = VolumeFilter::with_volume(SampleFormat::S16le, 0.5)?;
//!
//! // 10 and -10 as s16le, with the second sample split across two chunks
//! let first = filter.process(&[10, 0, 0xF6]);
//! let second = filter.process(&[0xFF]);
//!
//! assert_eq!(first, vec![5, 0]);
//! assert_eq!(second, vec![0xFB, 0xFF]);
//! # Ok::<(), pcm_volume::VolumeError>(())
//! ```

#![deny(unsafe_code)]

mod error;
mod filter;
mod format;
pub mod io;
pub mod sample;
mod settings;
mod transformer;

pub use error::{Result, VolumeError};
pub use filter::{StreamFilter, VolumeFilter};
pub use format::{Endianness, SampleFormat};
pub use io::{VolumeReader, VolumeWriter, DEFAULT_CHUNK_SIZE};
pub use sample::{PcmSample, S16Be, S16Le, S32Be, S32Le};
pub use settings::VolumeSettings;
pub use transformer::{VolumeTransformer, UNITY_VOLUME};
