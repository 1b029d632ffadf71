/// Transcoder child process with piped stdin/stdout
use crate::args::TranscodeArgs;
use crate::error::{Result, TranscoderError};
use crate::locator::FfmpegInfo;
use crate::pump::{pump, PumpStats};
use pcm_volume::StreamFilter;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

#[derive(Debug)]
pub struct FfmpegProcess {
    child: Child,
}

impl FfmpegProcess {
    /// Spawn the located transcoder with `args`
    pub fn spawn(info: &FfmpegInfo, args: TranscodeArgs) -> Result<Self> {
        Self::spawn_command(&info.command, args.into_command_args())
    }

    /// Spawn `program` with exactly `args`
    pub fn spawn_command<I, S>(program: &Path, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TranscoderError::Spawn {
                command: program.to_path_buf(),
                source,
            })?;

        tracing::debug!(command = %program.display(), pid = ?child.id(), "Spawned transcoder");
        Ok(Self { child })
    }

    /// Take the input pipe; dropping it signals end of input
    pub fn take_stdin(&mut self) -> Result<ChildStdin> {
        self.child
            .stdin
            .take()
            .ok_or(TranscoderError::MissingPipe("stdin"))
    }

    /// Take the raw PCM output pipe
    pub fn take_stdout(&mut self) -> Result<ChildStdout> {
        self.child
            .stdout
            .take()
            .ok_or(TranscoderError::MissingPipe("stdout"))
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for the process to exit
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let status = self.child.wait().await?;
        if !status.success() {
            tracing::warn!(%status, "Transcoder exited unsuccessfully");
        }
        Ok(status)
    }

    /// Feed `input` to the transcoder while pumping its output through
    /// `filter` into `output`, then wait for it to exit
    ///
    /// The transcoder closing its stdin early (broken pipe) is not an error;
    /// it simply stopped reading. If either side fails the other is dropped
    /// at once, closing both pipes, and the child is killed.
    pub async fn run<R, W, F>(
        mut self,
        input: &mut R,
        output: &mut W,
        filter: &mut F,
        chunk_size: usize,
    ) -> Result<(PumpStats, ExitStatus)>
    where
        R: AsyncRead + Unpin + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
        F: StreamFilter + ?Sized,
    {
        let mut stdin = self.take_stdin()?;
        let mut stdout = self.take_stdout()?;

        let feed = async move {
            let copied = tokio::io::copy(input, &mut stdin).await;
            // Closing stdin tells the transcoder the input is complete
            drop(stdin);
            match copied {
                Ok(bytes) => tracing::debug!(bytes, "Transcoder input complete"),
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("Transcoder closed its input early");
                }
                Err(e) => return Err(TranscoderError::from(e)),
            }
            Ok(())
        };

        let result = tokio::try_join!(feed, pump(&mut stdout, output, filter, chunk_size));
        let ((), stats) = match result {
            Ok(done) => done,
            Err(e) => {
                tracing::warn!(error = %e, "Transcoder pipeline failed; killing process");
                drop(stdout);
                // The child may already be gone; kill_on_drop covers the rest
                let _ = self.child.start_kill();
                return Err(e);
            }
        };

        let status = self.wait().await?;
        Ok((stats, status))
    }

    pub async fn kill(&mut self) -> Result<()> {
        self.child.kill().await?;
        Ok(())
    }
}
