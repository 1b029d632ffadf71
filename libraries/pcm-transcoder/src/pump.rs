//! Async pump from a PCM source, through a volume filter, into a sink

use crate::error::Result;
use pcm_volume::{StreamFilter, VolumeError};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Byte counts for one pumped stream
///
/// `bytes_in == bytes_out + discarded` always holds once the pump returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Trailing partial-sample bytes dropped at end of stream
    pub discarded: u64,
}

/// Copy `reader` to `writer` until EOF, filtering every chunk
///
/// Reads at most `chunk_size` bytes at a time. A partial sample left in the
/// filter by earlier use is dropped first, so the stream starts aligned. At
/// EOF the writer is flushed and any partial sample held by the filter is
/// discarded.
pub async fn pump<R, W, F>(
    reader: &mut R,
    writer: &mut W,
    filter: &mut F,
    chunk_size: usize,
) -> Result<PumpStats>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
    F: StreamFilter + ?Sized,
{
    if chunk_size == 0 {
        return Err(VolumeError::InvalidChunkSize.into());
    }

    let stale = filter.reset();
    if stale > 0 {
        tracing::debug!(stale, "Dropped partial sample left from a previous stream");
    }

    let mut input = vec![0u8; chunk_size];
    let mut output = Vec::with_capacity(chunk_size);
    let mut stats = PumpStats::default();

    loop {
        let read = reader.read(&mut input).await?;
        if read == 0 {
            break;
        }
        stats.bytes_in += read as u64;

        output.clear();
        filter.process_into(&input[..read], &mut output);
        if !output.is_empty() {
            writer.write_all(&output).await?;
            stats.bytes_out += output.len() as u64;
        }
    }

    writer.flush().await?;
    stats.discarded = filter.reset() as u64;

    if stats.discarded > 0 {
        tracing::warn!(
            discarded = stats.discarded,
            "Stream ended mid-sample; trailing bytes dropped"
        );
    }
    tracing::debug!(
        bytes_in = stats.bytes_in,
        bytes_out = stats.bytes_out,
        "Pump finished"
    );

    Ok(stats)
}
