//! Per-format sample codecs
//!
//! Each codec is a zero-sized type describing one frame shape: how many bytes
//! a sample occupies, its signed range, and how to read and write it. The
//! streaming engine in [`crate::VolumeTransformer`] is generic over these.

use crate::format::SampleFormat;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::marker::PhantomData;

/// Capability set for one signed integer PCM layout
pub trait PcmSample: Send + Sync + 'static {
    /// Bytes per sample
    const WIDTH: usize;
    /// Smallest representable value
    const MIN: i64;
    /// Largest representable value
    const MAX: i64;
    /// Runtime descriptor for this layout
    const FORMAT: SampleFormat;

    /// Decode one sample from exactly `WIDTH` bytes
    fn decode(bytes: &[u8]) -> i64;

    /// Encode `value` into exactly `WIDTH` bytes
    ///
    /// `value` must already lie within `MIN..=MAX`.
    fn encode(value: i64, bytes: &mut [u8]);
}

/// Signed 16-bit sample in byte order `E`
#[derive(Debug, Clone, Copy)]
pub struct S16<E>(PhantomData<E>);

/// Signed 32-bit sample in byte order `E`
#[derive(Debug, Clone, Copy)]
pub struct S32<E>(PhantomData<E>);

pub type S16Le = S16<LittleEndian>;
pub type S16Be = S16<BigEndian>;
pub type S32Le = S32<LittleEndian>;
pub type S32Be = S32<BigEndian>;

/// Maps a `byteorder` marker to the matching 16/32-bit formats
pub trait FormatOrder: ByteOrder + Send + Sync + 'static {
    const S16: SampleFormat;
    const S32: SampleFormat;
}

impl FormatOrder for LittleEndian {
    const S16: SampleFormat = SampleFormat::S16le;
    const S32: SampleFormat = SampleFormat::S32le;
}

impl FormatOrder for BigEndian {
    const S16: SampleFormat = SampleFormat::S16be;
    const S32: SampleFormat = SampleFormat::S32be;
}

impl<E: FormatOrder> PcmSample for S16<E> {
    const WIDTH: usize = 2;
    const MIN: i64 = i16::MIN as i64;
    const MAX: i64 = i16::MAX as i64;
    const FORMAT: SampleFormat = E::S16;

    #[inline]
    fn decode(bytes: &[u8]) -> i64 {
        E::read_i16(bytes) as i64
    }

    #[inline]
    fn encode(value: i64, bytes: &mut [u8]) {
        E::write_i16(bytes, value as i16);
    }
}

impl<E: FormatOrder> PcmSample for S32<E> {
    const WIDTH: usize = 4;
    const MIN: i64 = i32::MIN as i64;
    const MAX: i64 = i32::MAX as i64;
    const FORMAT: SampleFormat = E::S32;

    #[inline]
    fn decode(bytes: &[u8]) -> i64 {
        E::read_i32(bytes) as i64
    }

    #[inline]
    fn encode(value: i64, bytes: &mut [u8]) {
        E::write_i32(bytes, value as i32);
    }
}

/// Scale one decoded sample: multiply, truncate toward zero, saturate
///
/// Total for every input: `as i64` saturates on overflow and maps NaN to 0,
/// and the clamp pins the result into the sample range.
#[inline]
pub fn scale_sample<S: PcmSample>(value: i64, volume: f64) -> i64 {
    let scaled = (value as f64 * volume).trunc() as i64;
    scaled.clamp(S::MIN, S::MAX)
}
