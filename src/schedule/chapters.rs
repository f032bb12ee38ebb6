use crate::scene::model::{ClipKind, TimelineItem};
use crate::scene::timeline::Timeline;
use crate::schedule::layout::Schedule;
use serde::Serialize;

/// Frames of slack before "previous" stops snapping to the current chapter's start.
const NAV_TOLERANCE_FRAMES: i64 = 1;

/// A card clip, addressed by the frame where it becomes fully visible.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Card title.
    pub title: String,
    /// Visible start: clip start plus incoming transition length.
    pub frame: i64,
    /// Index into `Schedule::clips`.
    pub clip: usize,
}

/// Sorted chapter starts for one schedule.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterIndex {
    chapters: Vec<Chapter>,
    end_frame: i64,
}

impl ChapterIndex {
    /// Collect the card clips of `schedule`. Casts never start a chapter.
    pub fn new(timeline: &Timeline, schedule: &Schedule) -> Self {
        let mut chapters: Vec<Chapter> = schedule
            .clips
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ClipKind::Card)
            .map(|(i, c)| {
                let title = match timeline.items.get(c.source_index) {
                    Some(TimelineItem::Card(card)) => card.title.clone(),
                    _ => String::new(),
                };
                Chapter {
                    title,
                    frame: c.visible_start(),
                    clip: i,
                }
            })
            .collect();
        // A long incoming transition can push a visible start past the next card's.
        chapters.sort_by_key(|c| c.frame);

        let end_frame = i64::try_from(schedule.total_frames)
            .unwrap_or(i64::MAX)
            .saturating_sub(1);
        Self {
            chapters,
            end_frame,
        }
    }

    /// Chapters in frame order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Last frame of the composition.
    pub fn end_frame(&self) -> i64 {
        self.end_frame
    }

    /// Index of the last chapter starting at or before `frame`; `None` before the first one.
    pub fn at_or_before(&self, frame: i64) -> Option<usize> {
        self.chapters
            .partition_point(|c| c.frame <= frame)
            .checked_sub(1)
    }

    /// Frame to seek to for "previous chapter" from `frame`.
    ///
    /// Past the last chapter's start (beyond the tolerance) this returns that start; elsewhere it
    /// steps back one chapter, stopping at the first.
    pub fn previous_target(&self, frame: i64) -> Option<i64> {
        let last = self.chapters.len().checked_sub(1)?;
        let past_last = self.chapters[last]
            .frame
            .saturating_add(NAV_TOLERANCE_FRAMES);
        let target = match self.at_or_before(frame) {
            None => 0,
            Some(i) if i == last && frame > past_last => last,
            Some(i) => i.saturating_sub(1),
        };
        Some(self.chapters[target].frame)
    }

    /// Frame to seek to for "next chapter" from `frame`; the final frame after the last chapter.
    pub fn next_target(&self, frame: i64) -> Option<i64> {
        if self.chapters.is_empty() {
            return None;
        }
        let next = self.at_or_before(frame).map_or(0, |i| i + 1);
        Some(
            self.chapters
                .get(next)
                .map_or(self.end_frame, |c| c.frame),
        )
    }
}
