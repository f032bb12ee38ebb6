//! Frame-level placement of clips, chapters and audio.
//!
//! Everything here is pure: given a timeline and per-clip base frame counts, the same schedule
//! comes out every time.

/// Cue anchor resolution.
pub mod anchor;
/// Attachment playback windows and gain envelopes.
pub mod audio;
/// Card chapter index and navigation.
pub mod chapters;
/// Per-clip base frame counts.
pub mod durations;
/// Clip start/duration layout.
pub mod layout;

use crate::foundation::core::Fps;
use crate::foundation::error::ScenecastResult;
use crate::scene::timeline::Timeline;
use serde::Serialize;

pub use anchor::{ClipGeometry, anchor_frame, cue_frame};
pub use audio::{ScheduledAudio, place_audio};
pub use chapters::{Chapter, ChapterIndex};
pub use durations::{CastProbe, clip_base_frames};
pub use layout::{ClipNode, Schedule, layout};

/// Full playback plan for one timeline, as printed by `scenecast schedule`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Timeline name.
    pub name: String,
    /// Rate the plan was computed at.
    pub fps: Fps,
    /// Clip layout and total length.
    #[serde(flatten)]
    pub schedule: Schedule,
    /// Card chapters.
    pub chapters: ChapterIndex,
    /// Resolved audio attachments.
    pub audio: Vec<ScheduledAudio>,
}

/// Compute base frames, layout, chapters and audio placement in one pass.
pub fn plan(timeline: &Timeline, fps: Fps, probe: &dyn CastProbe) -> ScenecastResult<Plan> {
    let base = clip_base_frames(timeline, fps, probe)?;
    let schedule = layout(timeline, &base)?;
    let chapters = ChapterIndex::new(timeline, &schedule);
    let audio = place_audio(timeline, &schedule, fps);
    Ok(Plan {
        name: timeline.name.clone(),
        fps,
        schedule,
        chapters,
        audio,
    })
}
