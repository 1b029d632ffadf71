//! Blocking `std::io` adapters
//!
//! [`VolumeReader`] pulls raw PCM from any reader and serves it filtered;
//! [`VolumeWriter`] filters everything written to it before forwarding.

use crate::error::{Result, VolumeError};
use crate::filter::StreamFilter;
use std::io::{self, Read, Write};

/// Default number of bytes pulled from the inner reader per refill
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Reader that applies a [`StreamFilter`] to an inner byte source
///
/// A trailing partial sample left when the inner reader hits EOF is dropped.
pub struct VolumeReader<R, F> {
    inner: R,
    filter: F,
    scratch: Vec<u8>,
    /// Filtered bytes not yet handed to the caller
    ready: Vec<u8>,
    position: usize,
    eof: bool,
}

impl<R: Read, F: StreamFilter> VolumeReader<R, F> {
    pub fn new(inner: R, filter: F) -> Self {
        Self {
            inner,
            filter,
            scratch: vec![0; DEFAULT_CHUNK_SIZE],
            ready: Vec::with_capacity(DEFAULT_CHUNK_SIZE),
            position: 0,
            eof: false,
        }
    }

    /// Use a custom refill size
    pub fn with_chunk_size(inner: R, filter: F, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(VolumeError::InvalidChunkSize);
        }
        let mut reader = Self::new(inner, filter);
        reader.scratch = vec![0; chunk_size];
        Ok(reader)
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Mutable access to the filter, e.g. to change volume mid-stream
    ///
    /// Bytes already filtered but not yet read keep their old volume.
    pub fn filter_mut(&mut self) -> &mut F {
        &mut self.filter
    }

    pub fn into_inner(self) -> (R, F) {
        (self.inner, self.filter)
    }

    /// Refill `ready`; returns false once the inner reader is exhausted
    fn fill(&mut self) -> io::Result<bool> {
        self.ready.clear();
        self.position = 0;

        while self.ready.is_empty() {
            if self.eof {
                return Ok(false);
            }
            let read = match self.inner.read(&mut self.scratch) {
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if read == 0 {
                self.eof = true;
                self.filter.reset();
                return Ok(false);
            }
            self.filter.process_into(&self.scratch[..read], &mut self.ready);
        }

        Ok(true)
    }
}

impl<R: Read, F: StreamFilter> Read for VolumeReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.position >= self.ready.len() && !self.fill()? {
            return Ok(0);
        }

        let available = &self.ready[self.position..];
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.position += count;
        Ok(count)
    }
}

/// Writer that applies a [`StreamFilter`] before forwarding to `inner`
///
/// Filtered samples the inner writer has not yet taken are staged and drained
/// before any new input is accepted. A failure while draining returns `Err`
/// with nothing consumed, so the caller can retry the same buffer. Once the
/// filter has consumed a buffer, `write` reports it in full and a write error
/// on its samples surfaces from the next `write` or `flush`.
pub struct VolumeWriter<W: Write, F> {
    inner: W,
    filter: F,
    staging: Vec<u8>,
}

impl<W: Write, F: StreamFilter> VolumeWriter<W, F> {
    pub fn new(inner: W, filter: F) -> Self {
        Self {
            inner,
            filter,
            staging: Vec::with_capacity(DEFAULT_CHUNK_SIZE),
        }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut F {
        &mut self.filter
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Filtered bytes waiting for the inner writer
    pub fn staged(&self) -> usize {
        self.staging.len()
    }

    /// Flush and return the inner writer, dropping any partial sample
    pub fn into_inner(mut self) -> io::Result<W> {
        self.drain_staging()?;
        self.inner.flush()?;
        self.filter.reset();
        Ok(self.inner)
    }

    /// Push staged bytes to the inner writer, keeping whatever it refused
    fn drain_staging(&mut self) -> io::Result<()> {
        let mut written = 0;
        let result = loop {
            if written >= self.staging.len() {
                break Ok(());
            }
            match self.inner.write(&self.staging[written..]) {
                Ok(0) => {
                    break Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write filtered samples",
                    ))
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => break Err(e),
            }
        };
        self.staging.drain(..written);
        result
    }
}

impl<W: Write, F: StreamFilter> Write for VolumeWriter<W, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.drain_staging()?;

        self.filter.process_into(buf, &mut self.staging);
        if let Err(e) = self.drain_staging() {
            tracing::trace!(error = %e, staged = self.staging.len(), "Inner writer deferred samples");
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_staging()?;
        self.inner.flush()
    }
}
