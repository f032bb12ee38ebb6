//! Default values for optional timeline fields.
//!
//! The parser, the model's serde defaults and the scheduler all read from here so a default can
//! only ever have one value.

use crate::scene::model::{AudioAnchor, ClipKind};

/// Timeline name used when a script has no `timeline:` line.
pub const TIMELINE_NAME: &str = "timeline";

/// Voice used by `say` lines without `voice=`.
pub const VOICE: &str = "af_heart";

/// Anchor used by `say` lines without `anchor=`.
pub const SPEECH_ANCHOR: AudioAnchor = AudioAnchor::InBegin;

/// Offset applied to cues and attachments without one.
pub const OFFSET_SEC: f64 = 0.0;

/// Card length when the `@Ns` clause is omitted.
pub const CARD_SECONDS: f64 = 0.0;

/// Attachment volume when unset.
pub const VOLUME: f64 = 1.0;

/// Attachment looping when unset.
pub const LOOP: bool = false;

/// Fade length when unset.
pub const FADE_SEC: f64 = 0.0;

/// Playback rate used by `scenecast schedule` when none is given.
pub const FPS: u32 = 30;

/// Anchor for an audio attachment that omits one.
pub fn attachment_anchor(kind: ClipKind) -> AudioAnchor {
    match kind {
        ClipKind::Card => AudioAnchor::InEnd,
        ClipKind::Cast => AudioAnchor::InBegin,
    }
}

pub(crate) fn offset_sec() -> f64 {
    OFFSET_SEC
}

pub(crate) fn card_seconds() -> f64 {
    CARD_SECONDS
}

pub(crate) fn is_default_offset(v: &f64) -> bool {
    *v == OFFSET_SEC
}
