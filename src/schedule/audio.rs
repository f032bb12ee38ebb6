use crate::foundation::core::Fps;
use crate::foundation::defaults;
use crate::scene::model::{AudioAnchor, AudioAttachment};
use crate::scene::timeline::Timeline;
use crate::schedule::anchor::cue_frame;
use crate::schedule::layout::{ClipNode, Schedule};
use serde::Serialize;

/// An attachment resolved to a playback window inside its clip.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAudio {
    /// Index into `Schedule::clips`.
    pub clip: usize,
    /// Asset reference, unchanged.
    pub src: String,
    /// Anchor after applying the per-kind default.
    pub anchor: AudioAnchor,
    /// Absolute cue frame before clamping to the clip.
    pub cue_frame: i64,
    /// Clip-relative first frame.
    pub from: u64,
    /// Frames from `from` to the end of the clip.
    pub window: u64,
    /// Linear gain in `[0, 1]`.
    pub volume: f64,
    /// Repeat until the window ends.
    pub looped: bool,
    /// Fade-in length in frames.
    pub fade_in_frames: u64,
    /// Fade-out length in frames, ending at the window's last frame.
    pub fade_out_frames: u64,
    /// Debug label carried through from the attachment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ScheduledAudio {
    /// Gain at `frame` frames into the window.
    pub fn gain_at(&self, frame: u64) -> f64 {
        let f = frame as f64;
        let fade_in = if self.fade_in_frames > 0 {
            (f / self.fade_in_frames as f64).min(1.0)
        } else {
            1.0
        };
        let fade_out = if self.fade_out_frames > 0 {
            ((self.window as f64 - 1.0 - f) / self.fade_out_frames as f64).min(1.0)
        } else {
            1.0
        };
        self.volume * (fade_in * fade_out).clamp(0.0, 1.0)
    }
}

/// Resolve every audio attachment in `timeline` against `schedule`.
///
/// Attachments whose cue lands at or after the end of their clip are skipped.
pub fn place_audio(timeline: &Timeline, schedule: &Schedule, fps: Fps) -> Vec<ScheduledAudio> {
    let mut out = Vec::new();
    for (clip_idx, clip) in schedule.clips.iter().enumerate() {
        let Some(item) = timeline.items.get(clip.source_index) else {
            continue;
        };
        for att in item.audio() {
            match place_one(clip_idx, clip, att, fps) {
                Some(placed) => out.push(placed),
                None => tracing::debug!(
                    src = att.src.as_str(),
                    clip = clip_idx,
                    "audio cue falls after its clip, skipping"
                ),
            }
        }
    }
    out
}

fn place_one(
    clip_idx: usize,
    clip: &ClipNode,
    att: &AudioAttachment,
    fps: Fps,
) -> Option<ScheduledAudio> {
    let anchor = att
        .anchor
        .unwrap_or_else(|| defaults::attachment_anchor(clip.kind));
    let cue = cue_frame(clip.geometry(), anchor, att.offset_sec, fps);

    let from = u64::try_from(cue.saturating_sub(clip.start)).unwrap_or(0);
    if from >= clip.duration {
        return None;
    }

    Some(ScheduledAudio {
        clip: clip_idx,
        src: att.src.clone(),
        anchor,
        cue_frame: cue,
        from,
        window: clip.duration - from,
        volume: att.volume.unwrap_or(defaults::VOLUME).clamp(0.0, 1.0),
        looped: att.looped.unwrap_or(defaults::LOOP),
        fade_in_frames: fade_frames(att.fade_in_sec, fps),
        fade_out_frames: fade_frames(att.fade_out_sec, fps),
        label: att.label.clone(),
    })
}

fn fade_frames(secs: Option<f64>, fps: Fps) -> u64 {
    let frames = fps.secs_to_frames_round(secs.unwrap_or(defaults::FADE_SEC));
    u64::try_from(frames).unwrap_or(0)
}
