//! Runtime-selected volume filter and the streaming filter trait

use crate::error::Result;
use crate::format::{Endianness, SampleFormat};
use crate::sample::{PcmSample, S16Be, S16Le, S32Be, S32Le};
use crate::transformer::VolumeTransformer;

/// A stateful byte-stream operator that may hold back a partial frame
///
/// Implementors must append only whole frames to `out` and keep the rest
/// internally until a later call completes it.
pub trait StreamFilter: Send {
    /// Filter `chunk`, appending output to `out`; returns bytes appended
    fn process_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> usize;

    /// Bytes currently held back
    fn pending(&self) -> usize;

    /// Discard held-back bytes, returning how many were dropped
    fn reset(&mut self) -> usize;
}

impl<S: PcmSample> StreamFilter for VolumeTransformer<S> {
    fn process_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> usize {
        VolumeTransformer::process_into(self, chunk, out)
    }

    fn pending(&self) -> usize {
        VolumeTransformer::pending(self)
    }

    fn reset(&mut self) -> usize {
        VolumeTransformer::reset(self)
    }
}

/// Volume filter whose sample layout is chosen at runtime
#[derive(Debug)]
pub enum VolumeFilter {
    S16le(VolumeTransformer<S16Le>),
    S16be(VolumeTransformer<S16Be>),
    S32le(VolumeTransformer<S32Le>),
    S32be(VolumeTransformer<S32Be>),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            VolumeFilter::S16le($inner) => $body,
            VolumeFilter::S16be($inner) => $body,
            VolumeFilter::S32le($inner) => $body,
            VolumeFilter::S32be($inner) => $body,
        }
    };
}

impl VolumeFilter {
    /// Create a unity-gain filter for `format`
    pub fn new(format: SampleFormat) -> Self {
        match format {
            SampleFormat::S16le => VolumeFilter::S16le(VolumeTransformer::new()),
            SampleFormat::S16be => VolumeFilter::S16be(VolumeTransformer::new()),
            SampleFormat::S32le => VolumeFilter::S32le(VolumeTransformer::new()),
            SampleFormat::S32be => VolumeFilter::S32be(VolumeTransformer::new()),
        }
    }

    /// Create a filter for `format` with an initial multiplier
    pub fn with_volume(format: SampleFormat, volume: f64) -> Result<Self> {
        let mut filter = Self::new(format);
        filter.set_volume(volume)?;
        Ok(filter)
    }

    /// Create a unity-gain filter from a sample width and byte order
    ///
    /// Fails with [`crate::VolumeError::UnsupportedSampleWidth`] unless
    /// `width` is 2 or 4.
    pub fn configure(width: usize, endianness: Endianness) -> Result<Self> {
        SampleFormat::from_parts(width, endianness).map(Self::new)
    }

    pub fn format(&self) -> SampleFormat {
        dispatch!(self, t => t.format())
    }

    /// Bytes per sample
    pub fn width(&self) -> usize {
        self.format().width()
    }

    pub fn volume(&self) -> f64 {
        dispatch!(self, t => t.volume())
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        dispatch!(self, t => t.set_volume(volume))
    }

    pub fn volume_db(&self) -> f64 {
        dispatch!(self, t => t.volume_db())
    }

    pub fn set_volume_db(&mut self, db: f64) -> Result<()> {
        dispatch!(self, t => t.set_volume_db(db))
    }

    pub fn is_passthrough(&self) -> bool {
        dispatch!(self, t => t.is_passthrough())
    }

    pub fn pending(&self) -> usize {
        dispatch!(self, t => t.pending())
    }

    pub fn process(&mut self, chunk: &[u8]) -> Vec<u8> {
        dispatch!(self, t => t.process(chunk))
    }

    pub fn process_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> usize {
        dispatch!(self, t => t.process_into(chunk, out))
    }

    pub fn reset(&mut self) -> usize {
        dispatch!(self, t => t.reset())
    }

    /// End the stream, returning how many trailing bytes were discarded
    pub fn finish(self) -> usize {
        dispatch!(self, t => t.finish())
    }
}

impl StreamFilter for VolumeFilter {
    fn process_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> usize {
        VolumeFilter::process_into(self, chunk, out)
    }

    fn pending(&self) -> usize {
        VolumeFilter::pending(self)
    }

    fn reset(&mut self) -> usize {
        VolumeFilter::reset(self)
    }
}

impl Default for VolumeFilter {
    fn default() -> Self {
        Self::new(SampleFormat::default())
    }
}

impl<T: StreamFilter + ?Sized> StreamFilter for &mut T {
    fn process_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> usize {
        (**self).process_into(chunk, out)
    }

    fn pending(&self) -> usize {
        (**self).pending()
    }

    fn reset(&mut self) -> usize {
        (**self).reset()
    }
}
