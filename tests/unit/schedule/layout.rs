use super::*;
use crate::scene::model::{CardItem, Direction, TimelineItem, TransitionName};

fn card(title: &str) -> TimelineItem {
    TimelineItem::Card(CardItem {
        title: title.to_owned(),
        subtitle: None,
        seconds: 1.0,
        speech: vec![],
        audio: vec![],
    })
}

fn tr(name: TransitionName, frames: u32) -> TimelineItem {
    TimelineItem::Transition(TransitionItem {
        name,
        duration_frames: frames,
        direction: (name == TransitionName::Swipe).then_some(Direction::Right),
        mode: None,
    })
}

fn tl(items: Vec<TimelineItem>) -> Timeline {
    Timeline {
        name: "t".to_owned(),
        items,
    }
}

#[test]
fn swipe_pulls_the_next_clip_earlier() {
    let t = tl(vec![card("A"), tr(TransitionName::Swipe, 15), card("B")]);
    let s = layout(&t, &[60, 90]).unwrap();
    assert_eq!(s.total_frames, 135);

    let (a, b) = (&s.clips[0], &s.clips[1]);
    assert_eq!((a.start, a.duration), (0, 75));
    assert_eq!(a.out_overlap_frames, 15);
    assert_eq!((b.start, b.duration), (45, 90));
    assert_eq!(b.in_overlap_frames, 15);
    assert_eq!(b.in_frames, 15);
    assert_eq!(b.source_index, 2);
    assert_eq!(s.active_at(50).count(), 2);
    assert_eq!(s.active_at(80).count(), 1);
}

#[test]
fn fade_is_visible_but_does_not_overlap() {
    let t = tl(vec![card("A"), tr(TransitionName::Fade, 10), card("B")]);
    let s = layout(&t, &[60, 90]).unwrap();
    assert_eq!(s.total_frames, 150);
    assert_eq!(s.clips[1].start, 60);
    assert_eq!(s.clips[0].out_frames, 10);
    assert_eq!(s.clips[1].visible_start(), 70);
}

#[test]
fn cut_does_not_delay_anchors_but_delays_the_chapter() {
    let t = tl(vec![card("A"), tr(TransitionName::Cut, 20), card("B")]);
    let s = layout(&t, &[30, 30]).unwrap();
    assert_eq!(s.clips[1].start, 30);
    assert_eq!(s.clips[1].in_frames, 0);
    assert_eq!(s.clips[1].visible_start(), 50);
    assert_eq!(
        s.clips[1].in_transition.as_ref().map(|t| t.name),
        Some(TransitionName::Cut)
    );
}

#[test]
fn adjacent_transitions_resolve_to_the_one_nearest_the_later_clip() {
    let t = tl(vec![
        card("A"),
        tr(TransitionName::Fade, 5),
        tr(TransitionName::Crossfade, 8),
        card("B"),
    ]);
    let s = layout(&t, &[40, 40]).unwrap();
    let out = s.clips[0].out_transition.as_ref().unwrap();
    let inc = s.clips[1].in_transition.as_ref().unwrap();
    assert_eq!(out.name, TransitionName::Crossfade);
    assert_eq!(inc.name, TransitionName::Crossfade);
    assert_eq!(s.clips[1].start, 32);
}

#[test]
fn leading_transition_only_sets_incoming() {
    let t = tl(vec![tr(TransitionName::Fade, 12), card("A"), card("B")]);
    let s = layout(&t, &[10, 10]).unwrap();
    assert_eq!(s.clips[0].in_frames, 12);
    assert!(s.clips[0].out_transition.is_none());
    // No transition between A and B, so B still inherits the leading fade as its nearest one.
    assert_eq!(s.clips[1].in_frames, 12);
    assert_eq!(s.clips[1].start, 10);
    assert_eq!(s.total_frames, 20);
}

#[test]
fn trailing_overlap_extends_last_clip_but_not_total() {
    let t = tl(vec![card("A"), tr(TransitionName::Swipe, 6)]);
    let s = layout(&t, &[30]).unwrap();
    assert_eq!(s.clips[0].duration, 36);
    assert_eq!(s.total_frames, 30);
}

#[test]
fn base_frames_are_clamped_and_totals_floor_at_one() {
    let t = tl(vec![card("A")]);
    let s = layout(&t, &[0]).unwrap();
    assert_eq!(s.clips[0].base_frames, 1);
    assert_eq!(s.total_frames, 1);

    let empty = layout(&tl(vec![]), &[]).unwrap();
    assert!(empty.clips.is_empty());
    assert_eq!(empty.total_frames, 1);
}

#[test]
fn oversized_overlap_makes_start_negative() {
    let t = tl(vec![card("A"), tr(TransitionName::Crossfade, 50), card("B")]);
    let s = layout(&t, &[20, 100]).unwrap();
    assert_eq!(s.clips[1].start, -30);
    assert_eq!(s.total_frames, 70);
}

#[test]
fn duration_law_holds_for_mixed_timelines() {
    let items = vec![
        card("A"),
        tr(TransitionName::Swipe, 15),
        card("B"),
        tr(TransitionName::Fade, 10),
        card("C"),
        tr(TransitionName::Crossfade, 7),
        card("D"),
        tr(TransitionName::Blur, 9),
        card("E"),
    ];
    let base = [60, 45, 30, 90, 12];
    let s = layout(&tl(items), &base).unwrap();

    let sum_base: u64 = base.iter().sum();
    assert_eq!(s.total_frames, sum_base - 15 - 7);
    for w in s.clips.windows(2) {
        assert_eq!(
            w[1].start,
            w[0].start + w[0].base_frames as i64 - w[0].out_overlap_frames as i64
        );
        assert_eq!(w[1].in_overlap_frames, w[0].out_overlap_frames);
    }
    let last = s.clips.last().unwrap();
    assert_eq!(last.start + last.base_frames as i64, s.total_frames as i64);
}

#[test]
fn base_frame_count_must_match_clip_count() {
    let t = tl(vec![card("A"), card("B")]);
    let err = layout(&t, &[10]).unwrap_err();
    assert!(matches!(err, ScenecastError::Validation(_)));
}

#[test]
fn geometry_feeds_the_anchor_resolver() {
    let t = tl(vec![card("A"), tr(TransitionName::Swipe, 10), card("B")]);
    let s = layout(&t, &[50, 60]).unwrap();
    let g = s.clips[1].geometry();
    assert_eq!(g.start, 40);
    assert_eq!(g.incoming_transition_frames, 10);
    assert_eq!(g.base_frames, 60);
    assert_eq!(g.occupied_duration, 60);
}

#[test]
fn huge_base_frames_saturate_instead_of_overflowing() {
    let t = tl(vec![card("A"), tr(TransitionName::Swipe, 15), card("B")]);
    let s = layout(&t, &[u64::MAX, 30]).unwrap();
    assert_eq!(s.clips[0].duration, u64::MAX);
    assert_eq!(s.clips[0].end(), i64::MAX);
    assert_eq!(s.clips[1].start, i64::MAX - 15);
    assert_eq!(s.clips[1].visible_start(), i64::MAX);
    assert_eq!(s.total_frames, u64::MAX);
}

#[test]
fn huge_script_durations_schedule_without_panicking() {
    use crate::foundation::core::Fps;
    use crate::scene::model::AudioAttachment;
    use crate::schedule::plan;

    let script = concat!(
        "card \"A\"@99999999999999999999s\n",
        "swipe left 10\n",
        "card \"B\"@1s\n",
        "  say \"x\" @99999999999999999999s\n",
    );
    let mut t = crate::script::parse(script).unwrap();
    // A build turns speech into attachments; do the same so audio placement sees the cue.
    if let TimelineItem::Card(b) = &mut t.items[2] {
        let cue = b.speech.remove(0);
        b.audio.push(AudioAttachment::new(
            "speech/t/x.opus",
            Some(cue.anchor),
            cue.offset_sec,
        ));
    }

    let no_casts = |_: &str| -> ScenecastResult<f64> { Ok(0.0) };
    let p = plan(&t, Fps::whole(30).unwrap(), &no_casts).unwrap();
    assert_eq!(p.schedule.clips[0].base_frames, u64::MAX);
    assert_eq!(p.schedule.clips[1].start, i64::MAX - 10);
    assert_eq!(p.chapters.chapters().len(), 2);
    assert_eq!(p.audio.len(), 1);
    assert_eq!(p.audio[0].cue_frame, i64::MAX);
    assert_eq!(p.audio[0].from, 10);
}
