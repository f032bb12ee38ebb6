use crate::foundation::defaults;
use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::scene::model::{CardItem, CastItem, SpeechCue, TimelineItem};
use crate::scene::timeline::Timeline;
use crate::script::rules::{Statement, classify};
use std::borrow::Cow;

/// Compile scene-script text into a [`Timeline`].
///
/// Fails on the first line that matches no rule, and on a `say` line with no open card or cast.
/// There is no recovery: one bad line fails the whole script. Duplicate names across scripts are
/// not checked here.
pub fn parse(script: &str) -> ScenecastResult<Timeline> {
    let mut name = defaults::TIMELINE_NAME.to_owned();
    let mut items = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for (idx, raw) in script.lines().enumerate() {
        let line = normalize_line(raw);
        let Some(stmt) = classify(&line) else {
            return Err(ScenecastError::syntax(idx + 1, raw));
        };

        match stmt {
            Statement::Blank => {}
            Statement::TimelineDecl(n) => name = n,
            Statement::Transition(t) => {
                close(&mut open, &mut items);
                items.push(TimelineItem::Transition(t));
            }
            Statement::CardOpen(card) => {
                close(&mut open, &mut items);
                open = Some(OpenBlock::Card(card));
            }
            Statement::CastOpen(cast) => {
                close(&mut open, &mut items);
                open = Some(OpenBlock::Cast(cast));
            }
            Statement::Say(cue) => match open.as_mut() {
                Some(block) => block.push_speech(cue),
                None => return Err(ScenecastError::syntax(idx + 1, raw)),
            },
        }
    }

    close(&mut open, &mut items);
    Ok(Timeline { name, items })
}

/// The card or cast that `say` lines currently attach to.
enum OpenBlock {
    Card(CardItem),
    Cast(CastItem),
}

impl OpenBlock {
    fn push_speech(&mut self, cue: SpeechCue) {
        match self {
            Self::Card(c) => c.speech.push(cue),
            Self::Cast(c) => c.speech.push(cue),
        }
    }

    fn into_item(self) -> TimelineItem {
        match self {
            Self::Card(c) => TimelineItem::Card(c),
            Self::Cast(c) => TimelineItem::Cast(c),
        }
    }
}

fn close(open: &mut Option<OpenBlock>, items: &mut Vec<TimelineItem>) {
    if let Some(block) = open.take() {
        items.push(block.into_item());
    }
}

/// Leading tabs become two spaces each; trailing whitespace is dropped.
fn normalize_line(raw: &str) -> Cow<'_, str> {
    let raw = raw.trim_end();
    let indent = raw.len() - raw.trim_start().len();
    let lead = &raw[..indent];
    if !lead.contains('\t') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in lead.chars() {
        if ch == '\t' {
            out.push_str("  ");
        } else {
            out.push(ch);
        }
    }
    out.push_str(&raw[indent..]);
    Cow::Owned(out)
}

#[cfg(test)]
#[path = "../../tests/unit/script/parser.rs"]
mod tests;
