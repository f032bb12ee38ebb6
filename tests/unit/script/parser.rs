use super::*;
use crate::scene::model::{AudioAnchor, Direction, TransitionItem, TransitionName};

fn card(title: &str, seconds: f64) -> TimelineItem {
    TimelineItem::Card(CardItem {
        title: title.to_owned(),
        subtitle: None,
        seconds,
        speech: vec![],
        audio: vec![],
    })
}

#[test]
fn cards_and_fade_build_the_expected_timeline() {
    let tl = parse("timeline: demo\ncard \"Hello\"@2s\nfade 10\ncard \"World\"@3s\n").unwrap();
    assert_eq!(
        tl,
        Timeline {
            name: "demo".to_owned(),
            items: vec![
                card("Hello", 2.0),
                TimelineItem::Transition(TransitionItem {
                    name: TransitionName::Fade,
                    duration_frames: 10,
                    direction: None,
                    mode: None,
                }),
                card("World", 3.0),
            ],
        }
    );
}

#[test]
fn say_with_all_options_attaches_to_open_card() {
    let tl = parse("card \"Intro\"\n  say \"Hi\" @1.5s voice=af_heart anchor=inEnd\n").unwrap();
    let TimelineItem::Card(c) = &tl.items[0] else {
        panic!("expected card");
    };
    assert_eq!(
        c.speech,
        vec![SpeechCue {
            text: "Hi".to_owned(),
            voice: "af_heart".to_owned(),
            anchor: AudioAnchor::InEnd,
            offset_sec: 1.5,
        }]
    );
}

#[test]
fn say_defaults_voice_anchor_and_offset() {
    let tl = parse("cast demo.cast 100x30\n    say \"ls -la\"\n").unwrap();
    let TimelineItem::Cast(c) = &tl.items[0] else {
        panic!("expected cast");
    };
    assert_eq!(c.cast_path, "demo.cast");
    assert_eq!((c.cols, c.rows), (Some(100), Some(30)));
    assert_eq!(c.speech, vec![SpeechCue::new("ls -la")]);
}

#[test]
fn say_without_open_block_is_a_syntax_error() {
    let err = parse("timeline: t\nsay \"x\"\n").unwrap_err();
    let ScenecastError::Syntax { line_no, line } = err else {
        panic!("expected syntax error, got {err}");
    };
    assert_eq!(line_no, 2);
    assert_eq!(line, "say \"x\"");

    // Indented, but still nothing open.
    let err = parse("fade 5\n  say \"x\"\n").unwrap_err();
    assert!(matches!(err, ScenecastError::Syntax { line_no: 2, .. }));
}

#[test]
fn transition_closes_block_so_later_say_fails() {
    let err = parse("card \"A\"\nfade 4\n  say \"late\"\n").unwrap_err();
    assert!(matches!(err, ScenecastError::Syntax { line_no: 3, .. }));
}

#[test]
fn unrecognized_line_fails_whole_script() {
    let err = parse("card \"A\"@1s\nzoom 10\ncard \"B\"@1s\n").unwrap_err();
    assert_eq!(err.to_string(), "syntax error on line 2: \"zoom 10\"");
}

#[test]
fn opening_a_block_closes_the_previous_one() {
    let tl = parse(
        "card \"A\" | \"first\" @ 1.25s\n  say \"one\"\ncast a.cast 80x24\n  say \"two\"\ncard \"B\"\n",
    )
    .unwrap();
    assert_eq!(tl.name, "timeline");
    assert_eq!(tl.items.len(), 3);
    let TimelineItem::Card(a) = &tl.items[0] else {
        panic!("expected card");
    };
    assert_eq!(a.subtitle.as_deref(), Some("first"));
    assert_eq!(a.seconds, 1.25);
    assert_eq!(a.speech.len(), 1);
    assert_eq!(tl.items[1].speech()[0].text, "two");
    assert_eq!(tl.items[2], card("B", 0.0));
}

#[test]
fn swipe_direction_and_keywords_are_case_insensitive() {
    let tl = parse("CARD \"A\"@1S\nSwipe LEFT 12\nCrossFade 6\ncard \"B\"@1\n").unwrap();
    assert_eq!(
        tl.items[1],
        TimelineItem::Transition(TransitionItem {
            name: TransitionName::Swipe,
            duration_frames: 12,
            direction: Some(Direction::Left),
            mode: None,
        })
    );
    assert_eq!(tl.items[2].as_transition().unwrap().name, TransitionName::Crossfade);
    assert_eq!(tl.items[3], card("B", 1.0));
}

#[test]
fn comments_blank_lines_tabs_and_crlf_are_tolerated() {
    let script = "# intro\r\ntimeline:  tabs \r\n\r\ncard \"A\"@1s\r\n\tsay \"tabbed\"  \r\n   # note\r\n";
    let tl = parse(script).unwrap();
    assert_eq!(tl.name, "tabs");
    assert_eq!(tl.items.len(), 1);
    assert_eq!(tl.items[0].speech()[0].text, "tabbed");
}

#[test]
fn say_text_may_contain_quotes() {
    let tl = parse("card \"A\"\n  say \"a \"quoted\" word\" voice=bm_george\n  say \"\"\n").unwrap();
    let speech = tl.items[0].speech();
    assert_eq!(speech[0].text, "a \"quoted\" word");
    assert_eq!(speech[0].voice, "bm_george");
    assert_eq!(speech[1].text, "");
}

#[test]
fn legacy_anchor_names_are_accepted() {
    let tl = parse("card \"A\"\n  say \"x\" anchor=visibleEnd\n  say \"y\" anchor=clipstart\n").unwrap();
    let speech = tl.items[0].speech();
    assert_eq!(speech[0].anchor, AudioAnchor::OutEnd);
    assert_eq!(speech[1].anchor, AudioAnchor::InBegin);
}

#[test]
fn later_timeline_line_wins_and_does_not_close_block() {
    let tl = parse("timeline: a\ncard \"A\"\ntimeline: b\n  say \"still open\"\n").unwrap();
    assert_eq!(tl.name, "b");
    assert_eq!(tl.items[0].speech().len(), 1);
}

#[test]
fn parse_then_json_round_trip_keeps_fields() {
    let script = "timeline: rt\ncard \"T\" | \"S\" @2.5s\n  say \"Hi\" @0.5s voice=af_bella anchor=outBegin\nswipe up 9\ncast x.cast 90x20\n  say \"go\"\ncrossfade 7\ncard \"End\"\n";
    let tl = parse(script).unwrap();
    let back = Timeline::from_json_str(&tl.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, tl);
}

#[test]
fn oversized_counts_clamp_instead_of_failing() {
    let tl = parse("card \"A\"\nfade 99999999999\ncast demo.cast 100000000000x24\n").unwrap();
    let TimelineItem::Transition(t) = &tl.items[1] else {
        panic!("expected transition");
    };
    assert_eq!(t.duration_frames, u32::MAX);
    let TimelineItem::Cast(c) = &tl.items[2] else {
        panic!("expected cast");
    };
    assert_eq!((c.cols, c.rows), (Some(u32::MAX), Some(24)));
}
