use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::scene::model::{ClipKind, TransitionItem};
use crate::scene::timeline::Timeline;
use crate::schedule::anchor::ClipGeometry;
use serde::Serialize;

/// One card or cast placed on the composition timeline.
///
/// Built fresh by [`layout`]; never shared between scheduling passes.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipNode {
    /// Position of the clip in `Timeline::items`.
    pub source_index: usize,
    /// Card or cast.
    pub kind: ClipKind,
    /// Nominal length, at least 1.
    pub base_frames: u64,
    /// Nearest transition before the clip anywhere in the item list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_transition: Option<TransitionItem>,
    /// Last transition between this clip and the next one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_transition: Option<TransitionItem>,
    /// Visible length of the incoming transition.
    pub in_frames: u64,
    /// Visible length of the outgoing transition.
    pub out_frames: u64,
    /// Frames shared with the previous clip.
    pub in_overlap_frames: u64,
    /// Frames shared with the next clip.
    pub out_overlap_frames: u64,
    /// First occupied frame. Negative only when overlaps exceed the clips before it.
    pub start: i64,
    /// Occupied length: `max(1, base_frames + out_overlap_frames)`.
    pub duration: u64,
}

impl ClipNode {
    /// Geometry used to resolve cue anchors.
    pub fn geometry(&self) -> ClipGeometry {
        ClipGeometry {
            start: self.start,
            incoming_transition_frames: self.in_frames,
            base_frames: self.base_frames,
            occupied_duration: self.duration,
        }
    }

    /// Chapter position: start plus the incoming transition's stated duration.
    ///
    /// Unlike `in_frames`, a `cut` counts here with whatever duration it carries.
    pub fn visible_start(&self) -> i64 {
        let stated = self
            .in_transition
            .as_ref()
            .map_or(0, |t| u64::from(t.duration_frames));
        self.start.saturating_add(to_i64(stated))
    }

    /// Exclusive end of the occupied range.
    pub fn end(&self) -> i64 {
        self.start.saturating_add(to_i64(self.duration))
    }

    /// Return `true` when `frame` lies inside `[start, end)`.
    pub fn contains(&self, frame: i64) -> bool {
        self.start <= frame && frame < self.end()
    }
}

/// Clip layout for one timeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Clips in timeline order.
    pub clips: Vec<ClipNode>,
    /// `Σ base − Σ overlaps between adjacent clips`, at least 1.
    pub total_frames: u64,
}

impl Schedule {
    /// Clips occupying `frame`. During an overlapping transition this yields two clips.
    pub fn active_at(&self, frame: i64) -> impl Iterator<Item = &ClipNode> + '_ {
        self.clips.iter().filter(move |c| c.contains(frame))
    }
}

/// Place every clip of `timeline` on an absolute frame range.
///
/// `base_frames[k]` is the nominal length of the k-th card/cast (transitions excluded). Values
/// below 1 are raised to 1.
pub fn layout(timeline: &Timeline, base_frames: &[u64]) -> ScenecastResult<Schedule> {
    let entries: Vec<(usize, ClipKind)> = timeline.clips().collect();
    if entries.len() != base_frames.len() {
        return Err(ScenecastError::validation(format!(
            "timeline '{}' has {} clips but {} base frame counts were given",
            timeline.name,
            entries.len(),
            base_frames.len()
        )));
    }

    let transitions: Vec<(usize, &TransitionItem)> = timeline
        .items
        .iter()
        .enumerate()
        .filter_map(|(i, it)| it.as_transition().map(|t| (i, t)))
        .collect();

    let mut clips = Vec::with_capacity(entries.len());
    let mut current: i64 = 0;
    let mut prev_out_overlap = 0u64;
    let mut sum_base: i128 = 0;
    let mut sum_overlap: i128 = 0;

    for (k, &(pos, kind)) in entries.iter().enumerate() {
        let next_pos = entries.get(k + 1).map(|e| e.0);
        let base = base_frames[k].max(1);

        let in_tr = nearest_before(&transitions, pos);
        let out_tr = last_between(&transitions, pos, next_pos);
        let out_overlap = out_tr.map_or(0, TransitionItem::overlap_frames);

        let start = current;
        current = start
            .saturating_add(to_i64(base))
            .saturating_sub(to_i64(out_overlap));

        sum_base += i128::from(base);
        if next_pos.is_some() {
            sum_overlap += i128::from(out_overlap);
        }

        clips.push(ClipNode {
            source_index: pos,
            kind,
            base_frames: base,
            in_frames: in_tr.map_or(0, TransitionItem::visual_frames),
            out_frames: out_tr.map_or(0, TransitionItem::visual_frames),
            in_transition: in_tr.cloned(),
            out_transition: out_tr.cloned(),
            in_overlap_frames: prev_out_overlap,
            out_overlap_frames: out_overlap,
            start,
            duration: base.saturating_add(out_overlap).max(1),
        });
        prev_out_overlap = out_overlap;
    }

    let total = (sum_base - sum_overlap).max(1);
    Ok(Schedule {
        clips,
        total_frames: u64::try_from(total).unwrap_or(u64::MAX),
    })
}

/// Nearest transition strictly before `pos`.
fn nearest_before<'a>(
    transitions: &[(usize, &'a TransitionItem)],
    pos: usize,
) -> Option<&'a TransitionItem> {
    let idx = transitions.partition_point(|(i, _)| *i < pos);
    idx.checked_sub(1).map(|j| transitions[j].1)
}

/// Last transition strictly between `prev` and `next` (or after `prev` when there is no next
/// clip).
fn last_between<'a>(
    transitions: &[(usize, &'a TransitionItem)],
    prev: usize,
    next: Option<usize>,
) -> Option<&'a TransitionItem> {
    let idx = match next {
        Some(next) => transitions.partition_point(|(i, _)| *i < next),
        None => transitions.len(),
    };
    let j = idx.checked_sub(1)?;
    let (i, t) = transitions[j];
    (i > prev).then_some(t)
}

fn to_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/layout.rs"]
mod tests;
