/// FFmpeg argument building
use pcm_volume::SampleFormat;
use std::ffi::OsString;

/// Default output sample rate (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Default output channel count
pub const DEFAULT_CHANNELS: u16 = 2;

/// Arguments for one transcoder invocation
///
/// Input is read from stdin unless an explicit `-i` is supplied; output always
/// goes to `pipe:1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscodeArgs {
    args: Vec<OsString>,
}

impl TranscodeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode anything to raw interleaved PCM in `format`
    pub fn raw_pcm(format: SampleFormat, sample_rate: u32, channels: u16) -> Self {
        Self::new()
            .arg("-analyzeduration")
            .arg("0")
            .arg("-loglevel")
            .arg("0")
            .arg("-f")
            .arg(format.ffmpeg_name())
            .arg("-ar")
            .arg(sample_rate.to_string())
            .arg("-ac")
            .arg(channels.to_string())
    }

    /// FFmpeg's usual voice-pipeline shape: s16le, 48 kHz, stereo
    pub fn default_pcm() -> Self {
        Self::raw_pcm(SampleFormat::S16le, DEFAULT_SAMPLE_RATE, DEFAULT_CHANNELS)
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether an explicit input has been given
    pub fn has_input(&self) -> bool {
        self.args.iter().any(|a| a == "-i")
    }

    pub fn as_slice(&self) -> &[OsString] {
        &self.args
    }

    /// Final argument vector: `-i -` prepended if needed, `pipe:1` appended
    pub fn into_command_args(self) -> Vec<OsString> {
        let mut out = Vec::with_capacity(self.args.len() + 3);
        if !self.has_input() {
            out.push(OsString::from("-i"));
            out.push(OsString::from("-"));
        }
        out.extend(self.args);
        out.push(OsString::from("pipe:1"));
        out
    }
}
