//! FFmpeg discovery
//!
//! Discovery is an explicit step: callers run [`FfmpegLocator::locate`] once
//! and keep the returned [`FfmpegInfo`]. Nothing is cached behind their back,
//! so a later `locate` re-probes the candidates.

use crate::error::{Result, TranscoderError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Executables tried, in order, when no explicit list is given
pub const DEFAULT_CANDIDATES: [&str; 4] = ["ffmpeg", "avconv", "./ffmpeg", "./avconv"];

/// A usable transcoder installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegInfo {
    /// Command that spawns the transcoder
    pub command: PathBuf,
    /// Combined stdout and stderr of `<command> -h`
    pub output: String,
}

impl FfmpegInfo {
    /// Version string from the help banner, e.g. `6.1.1`
    pub fn version(&self) -> Option<&str> {
        let start = self.output.find("version ")? + "version ".len();
        let rest = &self.output[start..];
        let end = rest.find(" Copyright")?;
        let version = rest[..end].trim();
        (!version.is_empty()).then_some(version)
    }
}

/// Probes candidate executables for a working transcoder
#[derive(Debug, Clone)]
pub struct FfmpegLocator {
    candidates: Vec<PathBuf>,
}

impl FfmpegLocator {
    pub fn new<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Return the first candidate that can be spawned
    ///
    /// A candidate counts as found as soon as `<candidate> -h` starts; its
    /// exit status is not inspected.
    pub async fn locate(&self) -> Result<FfmpegInfo> {
        for candidate in &self.candidates {
            match probe(candidate).await {
                Ok(info) => {
                    tracing::info!(
                        command = %info.command.display(),
                        version = info.version().unwrap_or("unknown"),
                        "Located transcoder"
                    );
                    return Ok(info);
                }
                Err(e) => {
                    tracing::warn!(candidate = %candidate.display(), error = %e, "Transcoder candidate unavailable");
                }
            }
        }

        Err(TranscoderError::NotFound {
            tried: self.candidates.clone(),
        })
    }
}

impl Default for FfmpegLocator {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATES)
    }
}

/// Run `<command> -h` and capture its output
async fn probe(command: &Path) -> Result<FfmpegInfo> {
    let output = Command::new(command)
        .arg("-h")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| TranscoderError::Spawn {
            command: command.to_path_buf(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    Ok(FfmpegInfo {
        command: command.to_path_buf(),
        output: format!("{}\n{}", stdout, stderr),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_candidates_in_order() {
        let locator = FfmpegLocator::default();
        let names: Vec<_> = locator.candidates().iter().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(names, vec!["ffmpeg", "avconv", "./ffmpeg", "./avconv"]);
    }

    #[test]
    fn version_parsed_from_banner() {
        let info = FfmpegInfo {
            command: PathBuf::from("ffmpeg"),
            output: "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) 2000-2023 the FFmpeg developers\n"
                .to_string(),
        };
        assert_eq!(info.version(), Some("6.1.1-3ubuntu5"));
    }

    #[test]
    fn version_missing() {
        let info = FfmpegInfo {
            command: PathBuf::from("true"),
            output: "\n".to_string(),
        };
        assert_eq!(info.version(), None);
    }

    #[tokio::test]
    async fn missing_candidates_report_not_found() {
        let locator = FfmpegLocator::new(["/nonexistent/ffmpeg-a", "/nonexistent/ffmpeg-b"]);
        match locator.locate().await {
            Err(TranscoderError::NotFound { tried }) => assert_eq!(tried.len(), 2),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_candidate_list_is_not_found() {
        let locator = FfmpegLocator::new(Vec::<PathBuf>::new());
        assert!(matches!(
            locator.locate().await,
            Err(TranscoderError::NotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn first_spawnable_candidate_wins() {
        // `true` ignores `-h` and exits; spawning is all that matters
        let locator = FfmpegLocator::new(["/nonexistent/ffmpeg", "true", "sh"]);
        let info = locator.locate().await.unwrap();
        assert_eq!(info.command, PathBuf::from("true"));
    }
}
