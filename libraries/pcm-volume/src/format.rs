//! Raw PCM frame shapes

use crate::error::{Result, VolumeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte order of a multi-byte sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    Little,
    Big,
}

/// Signed integer PCM layout understood by the volume filter
///
/// Names match FFmpeg's raw `-f` formats so a configured format can be handed
/// to the transcoder unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Signed 16-bit little-endian
    #[default]
    S16le,
    /// Signed 16-bit big-endian
    S16be,
    /// Signed 32-bit little-endian
    S32le,
    /// Signed 32-bit big-endian
    S32be,
}

impl SampleFormat {
    /// All supported formats
    pub const ALL: [SampleFormat; 4] = [
        SampleFormat::S16le,
        SampleFormat::S16be,
        SampleFormat::S32le,
        SampleFormat::S32be,
    ];

    /// Resolve a format from its width in bytes and byte order
    ///
    /// Only 2- and 4-byte samples are supported.
    pub fn from_parts(width: usize, endianness: Endianness) -> Result<Self> {
        match (width, endianness) {
            (2, Endianness::Little) => Ok(SampleFormat::S16le),
            (2, Endianness::Big) => Ok(SampleFormat::S16be),
            (4, Endianness::Little) => Ok(SampleFormat::S32le),
            (4, Endianness::Big) => Ok(SampleFormat::S32be),
            (other, _) => Err(VolumeError::UnsupportedSampleWidth(other)),
        }
    }

    /// Bytes per sample
    pub fn width(&self) -> usize {
        match self {
            SampleFormat::S16le | SampleFormat::S16be => 2,
            SampleFormat::S32le | SampleFormat::S32be => 4,
        }
    }

    pub fn bits(&self) -> u32 {
        self.width() as u32 * 8
    }

    pub fn endianness(&self) -> Endianness {
        match self {
            SampleFormat::S16le | SampleFormat::S32le => Endianness::Little,
            SampleFormat::S16be | SampleFormat::S32be => Endianness::Big,
        }
    }

    /// Smallest representable sample, `-2^(bits-1)`
    pub fn min_value(&self) -> i64 {
        -(1_i64 << (self.bits() - 1))
    }

    /// Largest representable sample, `2^(bits-1) - 1`
    pub fn max_value(&self) -> i64 {
        (1_i64 << (self.bits() - 1)) - 1
    }

    /// FFmpeg raw format name (`-f` argument)
    pub fn ffmpeg_name(&self) -> &'static str {
        match self {
            SampleFormat::S16le => "s16le",
            SampleFormat::S16be => "s16be",
            SampleFormat::S32le => "s32le",
            SampleFormat::S32be => "s32be",
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ffmpeg_name())
    }
}

impl FromStr for SampleFormat {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self> {
        SampleFormat::ALL
            .into_iter()
            .find(|format| format.ffmpeg_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VolumeError::UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_accepts_supported_widths() {
        assert_eq!(
            SampleFormat::from_parts(2, Endianness::Little).unwrap(),
            SampleFormat::S16le
        );
        assert_eq!(
            SampleFormat::from_parts(2, Endianness::Big).unwrap(),
            SampleFormat::S16be
        );
        assert_eq!(
            SampleFormat::from_parts(4, Endianness::Little).unwrap(),
            SampleFormat::S32le
        );
        assert_eq!(
            SampleFormat::from_parts(4, Endianness::Big).unwrap(),
            SampleFormat::S32be
        );
    }

    #[test]
    fn from_parts_rejects_other_widths() {
        for width in [0, 1, 3, 8] {
            assert_eq!(
                SampleFormat::from_parts(width, Endianness::Little),
                Err(VolumeError::UnsupportedSampleWidth(width))
            );
        }
    }

    #[test]
    fn ranges_match_signed_integers() {
        assert_eq!(SampleFormat::S16le.min_value(), i16::MIN as i64);
        assert_eq!(SampleFormat::S16be.max_value(), i16::MAX as i64);
        assert_eq!(SampleFormat::S32le.min_value(), i32::MIN as i64);
        assert_eq!(SampleFormat::S32be.max_value(), i32::MAX as i64);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for format in SampleFormat::ALL {
            assert_eq!(format.to_string().parse::<SampleFormat>().unwrap(), format);
        }
        assert_eq!("S32BE".parse::<SampleFormat>().unwrap(), SampleFormat::S32be);
        assert!(matches!(
            "f32le".parse::<SampleFormat>(),
            Err(VolumeError::UnknownFormat(_))
        ));
    }

    #[test]
    fn default_is_ffmpeg_default_output() {
        assert_eq!(SampleFormat::default(), SampleFormat::S16le);
    }
}
