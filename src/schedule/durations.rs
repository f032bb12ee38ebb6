use crate::foundation::core::Fps;
use crate::foundation::error::ScenecastResult;
use crate::scene::model::TimelineItem;
use crate::scene::timeline::Timeline;

/// Reports how long a terminal recording plays.
pub trait CastProbe {
    /// Playback length of the recording at `cast_path`, in seconds.
    fn duration_secs(&self, cast_path: &str) -> ScenecastResult<f64>;
}

impl<F> CastProbe for F
where
    F: Fn(&str) -> ScenecastResult<f64>,
{
    fn duration_secs(&self, cast_path: &str) -> ScenecastResult<f64> {
        self(cast_path)
    }
}

/// Nominal frame count of every clip, in clip order.
///
/// Cards use their `seconds`; casts ask `probe`. Both round up and are at least 1.
pub fn clip_base_frames(
    timeline: &Timeline,
    fps: Fps,
    probe: &dyn CastProbe,
) -> ScenecastResult<Vec<u64>> {
    let mut out = Vec::new();
    for item in &timeline.items {
        match item {
            TimelineItem::Transition(_) => {}
            TimelineItem::Card(card) => out.push(fps.secs_to_frames_ceil_min1(card.seconds)),
            TimelineItem::Cast(cast) => {
                let secs = probe.duration_secs(&cast.cast_path)?;
                out.push(fps.secs_to_frames_ceil_min1(secs));
            }
        }
    }
    Ok(out)
}
