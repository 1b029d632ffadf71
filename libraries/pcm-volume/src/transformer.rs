//! Streaming volume engine
//!
//! [`VolumeTransformer`] consumes raw PCM bytes in chunks of any size. Each
//! call emits every complete sample it can form, rescaled by the current
//! multiplier, and keeps the trailing partial sample (if any) until the next
//! chunk completes it.

use crate::error::{Result, VolumeError};
use crate::format::SampleFormat;
use crate::sample::{scale_sample, PcmSample};
use std::fmt;
use std::marker::PhantomData;

/// Multiplier that leaves audio untouched
pub const UNITY_VOLUME: f64 = 1.0;

/// Check that a multiplier is finite and non-negative
pub(crate) fn validate_volume(volume: f64) -> Result<f64> {
    if volume.is_finite() && volume >= 0.0 {
        Ok(volume)
    } else {
        Err(VolumeError::InvalidVolume(volume))
    }
}

/// Volume filter for one fixed sample layout `S`
///
/// # Carry buffer
///
/// Bytes that do not form a whole sample are held back and prepended to the
/// next chunk. The carry never reaches `S::WIDTH` bytes. Whatever is left in
/// it when the stream ends is discarded.
pub struct VolumeTransformer<S: PcmSample> {
    volume: f64,
    /// Trailing partial sample from the previous chunk
    carry: Vec<u8>,
    _sample: PhantomData<S>,
}

impl<S: PcmSample> VolumeTransformer<S> {
    /// Create a transformer at unity gain
    pub fn new() -> Self {
        Self::build(UNITY_VOLUME)
    }

    /// Create a transformer with an initial multiplier
    pub fn with_volume(volume: f64) -> Result<Self> {
        validate_volume(volume).map(Self::build)
    }

    fn build(volume: f64) -> Self {
        tracing::debug!(format = %S::FORMAT, volume, "Created volume transformer");
        Self {
            volume,
            carry: Vec::with_capacity(S::WIDTH),
            _sample: PhantomData,
        }
    }

    /// Sample layout handled by this transformer
    pub fn format(&self) -> SampleFormat {
        S::FORMAT
    }

    /// Current multiplier
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Set the multiplier for every sample processed from now on
    ///
    /// Rejects negative, NaN and infinite values and keeps the previous
    /// multiplier in that case. There is no upper bound; large multipliers
    /// simply saturate.
    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.volume = validate_volume(volume)?;
        tracing::debug!(format = %S::FORMAT, volume, "Volume changed");
        Ok(())
    }

    /// Current multiplier in decibels (`-inf` when muted)
    pub fn volume_db(&self) -> f64 {
        20.0 * self.volume.log10()
    }

    /// Set the multiplier from a gain in decibels
    ///
    /// `-inf` mutes; `0.0` is unity gain.
    pub fn set_volume_db(&mut self, db: f64) -> Result<()> {
        if db.is_nan() || db == f64::INFINITY {
            return Err(VolumeError::InvalidVolume(db));
        }
        self.set_volume(10.0_f64.powf(db / 20.0))
    }

    /// Whether the unity-gain passthrough path is active
    pub fn is_passthrough(&self) -> bool {
        self.volume == UNITY_VOLUME
    }

    /// Number of bytes currently held back as a partial sample
    pub fn pending(&self) -> usize {
        self.carry.len()
    }

    /// Process one chunk and return the rescaled complete samples
    pub fn process(&mut self, chunk: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.carry.len() + chunk.len());
        self.process_into(chunk, &mut out);
        out
    }

    /// Process one chunk, appending complete samples to `out`
    ///
    /// Returns the number of bytes appended, always a multiple of the sample
    /// width. Bytes already in `out` are left untouched.
    pub fn process_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> usize {
        let total = self.carry.len() + chunk.len();
        let used = total - total % S::WIDTH;

        if used == 0 {
            self.carry.extend_from_slice(chunk);
            if !chunk.is_empty() {
                tracing::trace!(pending = self.carry.len(), "Chunk shorter than one sample");
            }
            return 0;
        }

        // `used` covers the whole carry since carry.len() < WIDTH <= used
        let from_chunk = used - self.carry.len();
        let start = out.len();
        out.reserve(used);
        out.extend_from_slice(&self.carry);
        out.extend_from_slice(&chunk[..from_chunk]);

        self.carry.clear();
        self.carry.extend_from_slice(&chunk[from_chunk..]);

        if !self.is_passthrough() {
            let volume = self.volume;
            for frame in out[start..].chunks_exact_mut(S::WIDTH) {
                let value = scale_sample::<S>(S::decode(frame), volume);
                S::encode(value, frame);
            }
        }

        used
    }

    /// Drop any partial sample, returning how many bytes were discarded
    ///
    /// Use between unrelated streams; the multiplier is kept.
    pub fn reset(&mut self) -> usize {
        let discarded = self.carry.len();
        if discarded > 0 {
            tracing::debug!(
                format = %S::FORMAT,
                discarded,
                "Discarding incomplete trailing sample"
            );
        }
        self.carry.clear();
        discarded
    }

    /// End the stream, returning how many trailing bytes were discarded
    pub fn finish(mut self) -> usize {
        self.reset()
    }
}

impl<S: PcmSample> Default for VolumeTransformer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PcmSample> fmt::Debug for VolumeTransformer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeTransformer")
            .field("format", &S::FORMAT)
            .field("volume", &self.volume)
            .field("pending", &self.carry.len())
            .finish()
    }
}
