//! Property-based tests for the volume filter
//!
//! These tests use proptest to verify streaming invariants across random
//! inputs, chunkings and multipliers.

use pcm_volume::{SampleFormat, VolumeFilter};
use proptest::prelude::*;

fn any_format() -> impl Strategy<Value = SampleFormat> {
    prop::sample::select(SampleFormat::ALL.to_vec())
}

/// Encode logical sample values in `format`
fn encode(format: SampleFormat, values: &[i64]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|&v| match format {
            SampleFormat::S16le => (v as i16).to_le_bytes().to_vec(),
            SampleFormat::S16be => (v as i16).to_be_bytes().to_vec(),
            SampleFormat::S32le => (v as i32).to_le_bytes().to_vec(),
            SampleFormat::S32be => (v as i32).to_be_bytes().to_vec(),
        })
        .collect()
}

/// Decode whole samples in `format`
fn decode(format: SampleFormat, bytes: &[u8]) -> Vec<i64> {
    bytes
        .chunks_exact(format.width())
        .map(|frame| match format {
            SampleFormat::S16le => i16::from_le_bytes([frame[0], frame[1]]) as i64,
            SampleFormat::S16be => i16::from_be_bytes([frame[0], frame[1]]) as i64,
            SampleFormat::S32le => {
                i32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]) as i64
            }
            SampleFormat::S32be => {
                i32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as i64
            }
        })
        .collect()
}

/// Split `data` at the given cut points (taken modulo the length)
fn split_at_cuts(data: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    if data.is_empty() {
        return vec![Vec::new()];
    }
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
    points.push(0);
    points.push(data.len());
    points.sort_unstable();

    points
        .windows(2)
        .map(|w| data[w[0]..w[1]].to_vec())
        .collect()
}

fn feed(filter: &mut VolumeFilter, chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in chunks {
        filter.process_into(chunk, &mut out);
    }
    out
}

proptest! {
    /// Property: unity volume returns the aligned prefix byte-for-byte
    #[test]
    fn unity_volume_is_byte_exact(
        format in any_format(),
        data in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut filter = VolumeFilter::new(format);
        let out = filter.process(&data);
        let aligned = data.len() - data.len() % format.width();

        prop_assert_eq!(&out[..], &data[..aligned]);
        prop_assert_eq!(filter.pending(), data.len() - aligned);
    }

    /// Property: any chunking yields the same output as a single call
    #[test]
    fn chunking_does_not_change_output(
        format in any_format(),
        volume in prop_oneof![Just(1.0f64), 0.0f64..4.0],
        data in prop::collection::vec(any::<u8>(), 0..512),
        cuts in prop::collection::vec(any::<usize>(), 0..16),
    ) {
        let mut whole = VolumeFilter::with_volume(format, volume).unwrap();
        let expected = whole.process(&data);

        let mut chunked = VolumeFilter::with_volume(format, volume).unwrap();
        let actual = feed(&mut chunked, &split_at_cuts(&data, &cuts));

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(chunked.pending(), whole.pending());
    }

    /// Property: no bytes are lost or invented
    #[test]
    fn bytes_are_conserved(
        format in any_format(),
        volume in 0.0f64..8.0,
        data in prop::collection::vec(any::<u8>(), 0..512),
        cuts in prop::collection::vec(any::<usize>(), 0..16),
    ) {
        let mut filter = VolumeFilter::with_volume(format, volume).unwrap();
        let out = feed(&mut filter, &split_at_cuts(&data, &cuts));

        prop_assert!(filter.pending() < format.width());
        prop_assert_eq!(out.len() % format.width(), 0);
        prop_assert_eq!(out.len() + filter.finish(), data.len());
    }

    /// Property: every sample is scaled, truncated toward zero, then clamped
    #[test]
    fn samples_follow_truncating_saturating_rule(
        format in any_format(),
        volume in 0.0f64..16.0,
        seed in prop::collection::vec(any::<i32>(), 1..64),
    ) {
        let values: Vec<i64> = seed
            .iter()
            .map(|&v| v as i64 % (format.max_value() + 1))
            .collect();
        let mut filter = VolumeFilter::with_volume(format, volume).unwrap();
        let out = decode(format, &filter.process(&encode(format, &values)));

        for (input, output) in values.iter().zip(out) {
            let expected = if volume == 1.0 {
                *input
            } else {
                ((*input as f64 * volume).trunc() as i64)
                    .clamp(format.min_value(), format.max_value())
            };
            prop_assert_eq!(output, expected);
        }
    }

    /// Property: negative samples truncate toward zero, never toward -inf
    #[test]
    fn negative_fractions_truncate_toward_zero(
        format in any_format(),
        magnitude in 1i64..30000,
    ) {
        let mut filter = VolumeFilter::with_volume(format, 0.5).unwrap();
        let out = decode(format, &filter.process(&encode(format, &[-magnitude, magnitude])));

        prop_assert_eq!(out[0], -(magnitude / 2));
        prop_assert_eq!(out[1], magnitude / 2);
        prop_assert_eq!(out[0], -out[1]);
    }

    /// Property: little- and big-endian outputs are per-sample byte reversals
    #[test]
    fn byte_order_only_affects_layout(
        wide in any::<bool>(),
        volume in 0.0f64..4.0,
        seed in prop::collection::vec(any::<i16>(), 1..64),
    ) {
        let (le, be) = if wide {
            (SampleFormat::S32le, SampleFormat::S32be)
        } else {
            (SampleFormat::S16le, SampleFormat::S16be)
        };
        let values: Vec<i64> = seed.iter().map(|&v| v as i64).collect();

        let little = VolumeFilter::with_volume(le, volume).unwrap().process(&encode(le, &values));
        let big = VolumeFilter::with_volume(be, volume).unwrap().process(&encode(be, &values));

        prop_assert_eq!(decode(le, &little), decode(be, &big));
        for (l, b) in little.chunks_exact(le.width()).zip(big.chunks_exact(be.width())) {
            let mut reversed = b.to_vec();
            reversed.reverse();
            prop_assert_eq!(l, &reversed[..]);
        }
    }

    /// Property: zero volume mutes everything and keeps length
    #[test]
    fn zero_volume_mutes(
        format in any_format(),
        data in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut filter = VolumeFilter::with_volume(format, 0.0).unwrap();
        let out = filter.process(&data);

        prop_assert_eq!(out.len(), data.len() - data.len() % format.width());
        prop_assert!(out.iter().all(|&b| b == 0));
    }
}
