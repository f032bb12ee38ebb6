use crate::foundation::error::{ScenecastError, ScenecastResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoded speech format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechFormat {
    /// Opus in Ogg, tuned for speech.
    #[default]
    Opus,
    /// Vorbis in Ogg.
    Vorbis,
}

impl SpeechFormat {
    /// File extension, without the dot.
    pub fn ext(self) -> &'static str {
        match self {
            Self::Opus => "opus",
            Self::Vorbis => "ogg",
        }
    }

    /// `ffmpeg` output codec arguments.
    pub fn encoder_args(self) -> &'static [&'static str] {
        match self {
            Self::Opus => &["-c:a", "libopus", "-b:a", "96k", "-vbr", "on"],
            Self::Vorbis => &["-c:a", "libvorbis", "-q:a", "5"],
        }
    }

    /// MIME type hosts should serve the asset with.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Opus => "audio/ogg; codecs=opus",
            Self::Vorbis => "audio/ogg; codecs=vorbis",
        }
    }

    /// Lowercase name, as accepted by `SPEECH_FORMAT`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opus => "opus",
            Self::Vorbis => "vorbis",
        }
    }
}

impl fmt::Display for SpeechFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeechFormat {
    type Err = ScenecastError;

    fn from_str(s: &str) -> ScenecastResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opus" => Ok(Self::Opus),
            "vorbis" | "ogg" => Ok(Self::Vorbis),
            other => Err(ScenecastError::validation(format!(
                "unknown speech format '{other}' (expected opus or vorbis)"
            ))),
        }
    }
}
