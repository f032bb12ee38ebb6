use crate::foundation::core::Fps;
use crate::scene::model::AudioAnchor;
use serde::Serialize;

/// Where a clip sits on the composition timeline, as needed to resolve cue anchors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipGeometry {
    /// First frame the clip occupies.
    pub start: i64,
    /// Visible length of the incoming transition.
    pub incoming_transition_frames: u64,
    /// Nominal clip length.
    pub base_frames: u64,
    /// Length including the outgoing overlap tail.
    pub occupied_duration: u64,
}

/// Absolute frame an anchor refers to.
///
/// `absolute` resolves to the composition origin so the caller's offset is used as-is.
pub fn anchor_frame(geom: ClipGeometry, anchor: AudioAnchor) -> i64 {
    match anchor {
        AudioAnchor::InBegin => geom.start,
        AudioAnchor::InEnd => geom
            .start
            .saturating_add(frames_i64(geom.incoming_transition_frames)),
        AudioAnchor::OutBegin => geom.start.saturating_add(frames_i64(geom.base_frames)),
        AudioAnchor::OutEnd => geom
            .start
            .saturating_add(frames_i64(geom.occupied_duration)),
        AudioAnchor::Absolute => 0,
    }
}

/// Absolute frame of a cue: anchor frame plus `round(offset_sec * fps)`, saturating at the `i64`
/// range.
pub fn cue_frame(geom: ClipGeometry, anchor: AudioAnchor, offset_sec: f64, fps: Fps) -> i64 {
    anchor_frame(geom, anchor).saturating_add(fps.secs_to_frames_round(offset_sec))
}

fn frames_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}
