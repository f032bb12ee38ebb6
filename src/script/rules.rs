use crate::foundation::defaults;
use crate::scene::model::{
    AudioAnchor, CardItem, CastItem, Direction, SpeechCue, TransitionItem, TransitionName,
};
use crate::script::cursor::Cursor;

/// What one script line says.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    Blank,
    TimelineDecl(String),
    Transition(TransitionItem),
    CardOpen(CardItem),
    CastOpen(CastItem),
    Say(SpeechCue),
}

type Classifier = fn(&str) -> Option<Statement>;

/// Line classifiers in priority order. The first rule that matches owns the line.
const RULES: &[Classifier] = &[
    blank_or_comment,
    timeline_decl,
    transition,
    card_open,
    cast_open,
    say_line,
];

pub(crate) fn classify(line: &str) -> Option<Statement> {
    RULES.iter().find_map(|rule| rule(line))
}

fn blank_or_comment(line: &str) -> Option<Statement> {
    let t = line.trim();
    (t.is_empty() || t.starts_with('#')).then_some(Statement::Blank)
}

fn timeline_decl(line: &str) -> Option<Statement> {
    let mut c = Cursor::new(line);
    c.keyword("timeline")?;
    c.skip_ws();
    c.char(':')?;
    c.skip_ws();
    let name = c.rest().trim();
    (!name.is_empty()).then(|| Statement::TimelineDecl(name.to_owned()))
}

fn transition(line: &str) -> Option<Statement> {
    let mut c = Cursor::new(line);
    if let Some(name) = c.opt(|c| {
        c.keyword("crossfade")
            .map(|_| TransitionName::Crossfade)
            .or_else(|| c.keyword("fade").map(|_| TransitionName::Fade))
    }) {
        c.ws1()?;
        let frames = c.uint()?;
        c.end()?;
        return Some(Statement::Transition(TransitionItem {
            name,
            duration_frames: frames,
            direction: None,
            mode: None,
        }));
    }

    c.keyword("swipe")?;
    c.ws1()?;
    let direction: Direction = c.word()?.parse().ok()?;
    c.ws1()?;
    let frames = c.uint()?;
    c.end()?;
    Some(Statement::Transition(TransitionItem {
        name: TransitionName::Swipe,
        duration_frames: frames,
        direction: Some(direction),
        mode: None,
    }))
}

/// `\s*@\s*NUMBER s?`
fn at_seconds(c: &mut Cursor<'_>) -> Option<f64> {
    c.skip_ws();
    c.char('@')?;
    c.skip_ws();
    let secs = c.number()?;
    c.opt(|c| c.char_ci('s'));
    Some(secs)
}

fn card_open(line: &str) -> Option<Statement> {
    let mut c = Cursor::new(line);
    c.keyword("card")?;
    c.ws1()?;
    let title = c.quoted()?;
    let subtitle = c.opt(|c| {
        c.skip_ws();
        c.char('|')?;
        c.skip_ws();
        c.quoted()
    });
    let seconds = c.opt(at_seconds);
    c.end()?;
    Some(Statement::CardOpen(CardItem {
        title: title.to_owned(),
        subtitle: subtitle.map(str::to_owned),
        seconds: seconds.unwrap_or(defaults::CARD_SECONDS),
        speech: Vec::new(),
        audio: Vec::new(),
    }))
}

fn cast_open(line: &str) -> Option<Statement> {
    let mut c = Cursor::new(line);
    c.keyword("cast")?;
    c.ws1()?;
    let path = c.non_ws()?;
    c.ws1()?;
    let cols = c.uint()?;
    c.char_ci('x')?;
    let rows = c.uint()?;
    c.end()?;
    Some(Statement::CastOpen(CastItem {
        cast_path: path.to_owned(),
        cols: Some(cols),
        rows: Some(rows),
        speech: Vec::new(),
        audio: Vec::new(),
    }))
}

fn say_line(line: &str) -> Option<Statement> {
    let mut c = Cursor::new(line);
    if c.skip_ws() < 2 {
        return None;
    }
    c.keyword("say")?;
    c.ws1()?;
    c.char('"')?;

    // The text may itself contain quotes: take the first closing quote after which the rest of
    // the line still parses.
    let body = c.rest();
    body.match_indices('"').find_map(|(close, _)| {
        let mut tail = Cursor::new(&body[close + 1..]);
        let (offset, voice, anchor) = say_options(&mut tail)?;
        Some(Statement::Say(SpeechCue {
            text: body[..close].to_owned(),
            voice: voice.unwrap_or(defaults::VOICE).to_owned(),
            anchor: anchor.unwrap_or(defaults::SPEECH_ANCHOR),
            offset_sec: offset.unwrap_or(defaults::OFFSET_SEC),
        }))
    })
}

/// Offset, voice and anchor of a `say` line, in that fixed order.
type SayOptions<'a> = (Option<f64>, Option<&'a str>, Option<AudioAnchor>);

fn say_options<'a>(c: &mut Cursor<'a>) -> Option<SayOptions<'a>> {
    let offset = c.opt(at_seconds);
    let voice = c.opt(|c| {
        c.ws1()?;
        c.keyword("voice=")?;
        c.word()
    });
    let anchor = c.opt(|c| {
        c.ws1()?;
        c.keyword("anchor=")?;
        c.word()?.parse::<AudioAnchor>().ok()
    });
    c.end()?;
    Some((offset, voice, anchor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_tried_in_priority_order() {
        assert_eq!(classify("   "), Some(Statement::Blank));
        assert_eq!(classify("  # card \"x\""), Some(Statement::Blank));
        assert_eq!(
            classify("Timeline : intro"),
            Some(Statement::TimelineDecl("intro".to_owned()))
        );
        assert!(matches!(classify("crossfade 8"), Some(Statement::Transition(_))));
        assert!(matches!(classify("CARD \"A\""), Some(Statement::CardOpen(_))));
        assert!(matches!(
            classify("cast a.cast 80X24"),
            Some(Statement::CastOpen(_))
        ));
        assert!(matches!(classify("  say \"x\""), Some(Statement::Say(_))));
    }

    #[test]
    fn statements_must_start_at_column_zero() {
        assert_eq!(classify(" fade 10"), None);
        assert_eq!(classify(" card \"A\""), None);
        assert_eq!(classify("say \"x\""), None);
    }

    #[test]
    fn near_misses_are_rejected() {
        for line in [
            "fade",
            "fade10",
            "fadeout 10",
            "fade 10 frames",
            "swipe sideways 10",
            "swipe left",
            "card \"\"",
            "card Hello",
            "card \"A\" @",
            "card \"A\" @.s",
            "cast a.cast",
            "cast a.cast 80x",
            "cast a.cast 80x24x",
            "timeline:",
            "  say \"x\" voice=a-b",
            "  say \"x\" anchor=later",
            "  say x",
        ] {
            assert_eq!(classify(line), None, "{line:?}");
        }
    }
}
