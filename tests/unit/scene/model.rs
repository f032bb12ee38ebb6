use super::*;

#[test]
fn items_serialize_with_type_discriminant() {
    let item = TimelineItem::Transition(TransitionItem {
        name: TransitionName::Swipe,
        duration_frames: 15,
        direction: Some(Direction::Right),
        mode: None,
    });
    let v = serde_json::to_value(&item).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "type": "transition",
            "name": "swipe",
            "durationFrames": 15,
            "direction": "right"
        })
    );
}

#[test]
fn cast_accepts_path_alias_and_single_audio_object() {
    let item: TimelineItem = serde_json::from_value(serde_json::json!({
        "type": "cast",
        "path": "casts/demo.cast",
        "audio": { "src": "music.ogg", "volume": 0.5, "loop": true }
    }))
    .unwrap();
    let TimelineItem::Cast(cast) = item else {
        panic!("expected cast");
    };
    assert_eq!(cast.cast_path, "casts/demo.cast");
    assert_eq!(cast.audio.len(), 1);
    assert_eq!(cast.audio[0].volume, Some(0.5));
    assert_eq!(cast.audio[0].looped, Some(true));
    assert_eq!(cast.audio[0].offset_sec, 0.0);
    assert_eq!(cast.audio[0].anchor, None);
}

#[test]
fn unknown_item_type_is_rejected() {
    let res: Result<TimelineItem, _> = serde_json::from_value(serde_json::json!({
        "type": "overlay",
        "title": "x"
    }));
    assert!(res.is_err());
}

#[test]
fn card_seconds_null_or_missing_defaults_to_zero() {
    let a: CardItem = serde_json::from_value(serde_json::json!({ "title": "A" })).unwrap();
    let b: CardItem =
        serde_json::from_value(serde_json::json!({ "title": "B", "seconds": null })).unwrap();
    assert_eq!(a.seconds, 0.0);
    assert_eq!(b.seconds, 0.0);
}

#[test]
fn anchors_decode_leniently() {
    for a in AudioAnchor::ALL {
        let v = serde_json::to_value(a).unwrap();
        assert_eq!(v, serde_json::Value::String(a.as_str().to_owned()));
        let back: AudioAnchor = serde_json::from_value(v).unwrap();
        assert_eq!(back, a);
    }
    let legacy: AudioAnchor = serde_json::from_str("\"visibleEnd\"").unwrap();
    assert_eq!(legacy, AudioAnchor::OutEnd);
    let unknown: AudioAnchor = serde_json::from_str("\"sometime\"").unwrap();
    assert_eq!(unknown, AudioAnchor::InBegin);
    assert!("sometime".parse::<AudioAnchor>().is_err());
    assert_eq!("INEND".parse::<AudioAnchor>().unwrap(), AudioAnchor::InEnd);
}

#[test]
fn overlap_only_for_swipe_and_crossfade() {
    let mk = |name| TransitionItem {
        name,
        duration_frames: 12,
        direction: None,
        mode: None,
    };
    assert_eq!(mk(TransitionName::Swipe).overlap_frames(), 12);
    assert_eq!(mk(TransitionName::Crossfade).overlap_frames(), 12);
    for name in [
        TransitionName::Cut,
        TransitionName::Fade,
        TransitionName::Slide,
        TransitionName::Wipe,
        TransitionName::Blur,
    ] {
        assert_eq!(mk(name).overlap_frames(), 0, "{}", name.as_str());
    }
    assert_eq!(mk(TransitionName::Cut).visual_frames(), 0);
    assert_eq!(mk(TransitionName::Fade).visual_frames(), 12);
}

#[test]
fn speech_offset_is_omitted_when_zero() {
    let cue = SpeechCue::new("hello");
    let v = serde_json::to_value(&cue).unwrap();
    assert_eq!(
        v,
        serde_json::json!({ "text": "hello", "voice": "af_heart", "anchor": "inBegin" })
    );
}
