use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::narration::codec::SpeechFormat;
use crate::narration::engine::AudioEncoder;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment variable naming the `ffmpeg` binary.
pub const FFMPEG_PATH_ENV: &str = "FFMPEG_PATH";

/// Encoder that spawns the system `ffmpeg`.
#[derive(Clone, Debug)]
pub struct FfmpegEncoder {
    bin: PathBuf,
}

impl FfmpegEncoder {
    /// Use `bin` as the `ffmpeg` executable.
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    /// Binary from `FFMPEG_PATH`, else `ffmpeg` looked up on `PATH`.
    pub fn from_env() -> Self {
        match std::env::var_os(FFMPEG_PATH_ENV) {
            Some(p) if !p.is_empty() => Self::new(p),
            _ => Self::new("ffmpeg"),
        }
    }

    /// Executable this encoder runs.
    pub fn bin(&self) -> &Path {
        &self.bin
    }
}

impl AudioEncoder for FfmpegEncoder {
    fn ensure_available(&self) -> ScenecastResult<()> {
        let ok = Command::new(&self.bin)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if ok {
            Ok(())
        } else {
            Err(ScenecastError::asset(format!(
                "ffmpeg is required for speech encoding, but '{}' could not be run \
                 (install it or set {FFMPEG_PATH_ENV})",
                self.bin.display()
            )))
        }
    }

    fn encode(
        &self,
        wav_path: &Path,
        out_path: &Path,
        format: SpeechFormat,
    ) -> ScenecastResult<()> {
        ensure_parent_dir(out_path)?;

        let output = Command::new(&self.bin)
            .args(["-y", "-loglevel", "error", "-i"])
            .arg(wav_path)
            .args(format.encoder_args())
            .arg(out_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ScenecastError::asset(format!(
                    "failed to spawn ffmpeg '{}': {e}",
                    self.bin.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScenecastError::asset(format!(
                "ffmpeg exited with status {} encoding '{}': {}",
                output.status,
                wav_path.display(),
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ScenecastResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
