use crate::foundation::defaults;
use crate::foundation::error::{ScenecastError, ScenecastResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entry of a timeline, discriminated by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimelineItem {
    /// Visual effect between or around clips. Occupies no time of its own.
    Transition(TransitionItem),
    /// Static title card.
    Card(CardItem),
    /// Recorded terminal session.
    Cast(CastItem),
}

impl TimelineItem {
    /// Clip kind for cards and casts, `None` for transitions.
    pub fn clip_kind(&self) -> Option<ClipKind> {
        match self {
            Self::Transition(_) => None,
            Self::Card(_) => Some(ClipKind::Card),
            Self::Cast(_) => Some(ClipKind::Cast),
        }
    }

    /// Return the transition payload if this item is one.
    pub fn as_transition(&self) -> Option<&TransitionItem> {
        match self {
            Self::Transition(t) => Some(t),
            Self::Card(_) | Self::Cast(_) => None,
        }
    }

    /// Speech cues of a clip; always empty for transitions.
    pub fn speech(&self) -> &[SpeechCue] {
        match self {
            Self::Transition(_) => &[],
            Self::Card(c) => &c.speech,
            Self::Cast(c) => &c.speech,
        }
    }

    /// Audio attachments of a clip; always empty for transitions.
    pub fn audio(&self) -> &[AudioAttachment] {
        match self {
            Self::Transition(_) => &[],
            Self::Card(c) => &c.audio,
            Self::Cast(c) => &c.audio,
        }
    }
}

/// The two item kinds that occupy time on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    /// Title card.
    Card,
    /// Terminal recording.
    Cast,
}

/// Transition marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionItem {
    /// Effect name.
    pub name: TransitionName,
    /// Stated effect length in frames.
    pub duration_frames: u32,
    /// Travel direction for directional effects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Which side of the cut a fade applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FadeMode>,
}

impl TransitionItem {
    /// Frames by which the following clip is pulled earlier.
    ///
    /// Nonzero only for overlapping kinds.
    pub fn overlap_frames(&self) -> u64 {
        if self.name.overlaps() {
            u64::from(self.duration_frames)
        } else {
            0
        }
    }

    /// Frames the effect is visible for. A `cut` is instantaneous whatever its stated duration.
    pub fn visual_frames(&self) -> u64 {
        match self.name {
            TransitionName::Cut => 0,
            _ => u64::from(self.duration_frames),
        }
    }
}

/// Known transition effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionName {
    /// Hard cut.
    Cut,
    /// Fade through black.
    Fade,
    /// Blend of outgoing and incoming clip.
    Crossfade,
    /// Incoming clip pushes the outgoing one off screen.
    Swipe,
    /// Short directional slide.
    Slide,
    /// Directional reveal.
    Wipe,
    /// Blur out/in.
    Blur,
}

impl TransitionName {
    /// Return `true` when adjacent clips share frames during this transition.
    pub fn overlaps(self) -> bool {
        matches!(self, Self::Swipe | Self::Crossfade)
    }

    /// Lowercase keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cut => "cut",
            Self::Fade => "fade",
            Self::Crossfade => "crossfade",
            Self::Swipe => "swipe",
            Self::Slide => "slide",
            Self::Wipe => "wipe",
            Self::Blur => "blur",
        }
    }
}

/// Direction of a directional transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the left edge.
    Left,
    /// Toward the right edge.
    Right,
    /// Toward the top edge.
    Up,
    /// Toward the bottom edge.
    Down,
}

impl FromStr for Direction {
    type Err = ScenecastError;

    fn from_str(s: &str) -> ScenecastResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(ScenecastError::validation(format!(
                "unknown direction '{other}'"
            ))),
        }
    }
}

/// Fade phase selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeMode {
    /// Fade the incoming clip only.
    In,
    /// Fade the outgoing clip only.
    Out,
    /// Fade both sides.
    Both,
}

/// Title card clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardItem {
    /// Main title.
    pub title: String,
    /// Optional second line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// On-screen length in seconds.
    #[serde(default = "defaults::card_seconds", deserialize_with = "de_seconds")]
    pub seconds: f64,
    /// Narration still to be synthesized.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speech: Vec<SpeechCue>,
    /// Audio played with the card.
    #[serde(
        default,
        deserialize_with = "de_one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub audio: Vec<AudioAttachment>,
}

/// Terminal recording clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastItem {
    /// Recording path or URL as the host resolves it.
    #[serde(alias = "path")]
    pub cast_path: String,
    /// Terminal columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<u32>,
    /// Terminal rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Narration still to be synthesized.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speech: Vec<SpeechCue>,
    /// Audio played with the recording.
    #[serde(
        default,
        deserialize_with = "de_one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub audio: Vec<AudioAttachment>,
}

/// Narration line to synthesize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechCue {
    /// Text as written in the script.
    pub text: String,
    /// Synthesis voice id.
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Reference point in the clip.
    #[serde(default = "default_speech_anchor")]
    pub anchor: AudioAnchor,
    /// Seconds added to the anchor; may be negative.
    #[serde(
        default = "defaults::offset_sec",
        skip_serializing_if = "defaults::is_default_offset"
    )]
    pub offset_sec: f64,
}

impl SpeechCue {
    /// Cue with default voice, anchor and offset.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: default_voice(),
            anchor: defaults::SPEECH_ANCHOR,
            offset_sec: defaults::OFFSET_SEC,
        }
    }
}

/// Audio file played relative to a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioAttachment {
    /// Asset reference.
    pub src: String,
    /// Reference point; per-kind default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AudioAnchor>,
    /// Seconds added to the anchor; may be negative.
    #[serde(default = "defaults::offset_sec")]
    pub offset_sec: f64,
    /// Linear gain in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Repeat until the clip ends.
    #[serde(rename = "loop", default, skip_serializing_if = "Option::is_none")]
    pub looped: Option<bool>,
    /// Fade-in length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_in_sec: Option<f64>,
    /// Fade-out length in seconds, applied toward the end of the clip slice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_out_sec: Option<f64>,
    /// Free-form debugging label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AudioAttachment {
    /// Attachment with only `src`, `anchor` and `offset_sec` set.
    pub fn new(src: impl Into<String>, anchor: Option<AudioAnchor>, offset_sec: f64) -> Self {
        Self {
            src: src.into(),
            anchor,
            offset_sec,
            volume: None,
            looped: None,
            fade_in_sec: None,
            fade_out_sec: None,
            label: None,
        }
    }
}

/// Named reference point within a clip's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioAnchor {
    /// Clip start.
    InBegin,
    /// End of the incoming transition.
    InEnd,
    /// End of the clip's nominal length.
    OutBegin,
    /// End of the clip's occupied duration.
    OutEnd,
    /// Composition origin.
    Absolute,
}

impl AudioAnchor {
    /// All anchors, in table order.
    pub const ALL: [Self; 5] = [
        Self::InBegin,
        Self::InEnd,
        Self::OutBegin,
        Self::OutEnd,
        Self::Absolute,
    ];

    /// Canonical camelCase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InBegin => "inBegin",
            Self::InEnd => "inEnd",
            Self::OutBegin => "outBegin",
            Self::OutEnd => "outEnd",
            Self::Absolute => "absolute",
        }
    }

    /// Decode an anchor name, falling back to `inBegin` for anything unrecognized.
    pub fn from_name_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(anchor = s, "unrecognized audio anchor, using inBegin");
            Self::InBegin
        })
    }
}

impl fmt::Display for AudioAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioAnchor {
    type Err = ScenecastError;

    /// Case-insensitive; accepts `clipStart`, `baseEnd` and `visibleEnd` as older spellings.
    fn from_str(s: &str) -> ScenecastResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "inbegin" | "clipstart" => Ok(Self::InBegin),
            "inend" => Ok(Self::InEnd),
            "outbegin" | "baseend" => Ok(Self::OutBegin),
            "outend" | "visibleend" => Ok(Self::OutEnd),
            "absolute" => Ok(Self::Absolute),
            _ => Err(ScenecastError::validation(format!("unknown anchor '{s}'"))),
        }
    }
}

impl<'de> Deserialize<'de> for AudioAnchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_name_lenient(&s))
    }
}

fn default_voice() -> String {
    defaults::VOICE.to_owned()
}

fn default_speech_anchor() -> AudioAnchor {
    defaults::SPEECH_ANCHOR
}

fn de_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(defaults::CARD_SECONDS))
}

fn de_one_or_many<'de, D>(deserializer: D) -> Result<Vec<AudioAttachment>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        One(AudioAttachment),
        Many(Vec<AudioAttachment>),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Repr::One(a)) => Ok(vec![a]),
        Some(Repr::Many(v)) => Ok(v),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
