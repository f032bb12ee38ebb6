use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::scene::model::{AudioAttachment, ClipKind, SpeechCue, TimelineItem};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Ordered transitions, cards and casts compiled from one script.
///
/// This is also the compiled document format: `{ "name": ..., "items": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Timeline name, unique within a build run.
    pub name: String,
    /// Items in script order.
    pub items: Vec<TimelineItem>,
}

impl Timeline {
    /// Parse a compiled timeline document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScenecastResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScenecastError::semantic(format!("malformed timeline JSON: {e}")))
    }

    /// Parse a compiled timeline document from a JSON string.
    pub fn from_json_str(s: &str) -> ScenecastResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ScenecastError::semantic(format!("malformed timeline JSON: {e}")))
    }

    /// Parse a compiled timeline document from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScenecastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScenecastError::semantic(format!("open timeline JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty-printed JSON (two-space indent, stable field order).
    pub fn to_json_pretty(&self) -> ScenecastResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScenecastError::serde(e.to_string()))
    }

    /// Iterate clips as `(position in items, kind)`.
    pub fn clips(&self) -> impl Iterator<Item = (usize, ClipKind)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, it)| it.clip_kind().map(|k| (i, k)))
    }

    /// Total number of speech cues across all clips.
    pub fn speech_cue_count(&self) -> usize {
        self.items.iter().map(|it| it.speech().len()).sum()
    }

    /// Check the field-level rules a build relies on.
    ///
    /// The name must be usable as a single path component because it names the asset directory
    /// and output documents.
    pub fn validate(&self) -> ScenecastResult<()> {
        validate_name(&self.name)?;

        for (i, item) in self.items.iter().enumerate() {
            match item {
                TimelineItem::Transition(_) => {}
                TimelineItem::Card(card) => {
                    if card.title.is_empty() {
                        return Err(item_err(i, "card title must be non-empty"));
                    }
                    if !card.seconds.is_finite() || card.seconds < 0.0 {
                        return Err(item_err(i, "card seconds must be finite and >= 0"));
                    }
                    validate_cues(i, &card.speech)?;
                    validate_attachments(i, &card.audio)?;
                }
                TimelineItem::Cast(cast) => {
                    if cast.cast_path.trim().is_empty() {
                        return Err(item_err(i, "cast path must be non-empty"));
                    }
                    validate_cues(i, &cast.speech)?;
                    validate_attachments(i, &cast.audio)?;
                }
            }
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> ScenecastResult<()> {
    if name.trim().is_empty() {
        return Err(ScenecastError::semantic("timeline has no name"));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ScenecastError::semantic(format!(
            "timeline name '{name}' is not a valid file name"
        )));
    }
    Ok(())
}

fn validate_cues(item: usize, cues: &[SpeechCue]) -> ScenecastResult<()> {
    for cue in cues {
        if cue.voice.is_empty()
            || !cue
                .voice
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(item_err(
                item,
                format!("voice '{}' must match [A-Za-z0-9_]+", cue.voice),
            ));
        }
        if !cue.offset_sec.is_finite() {
            return Err(item_err(item, "speech offset must be finite"));
        }
    }
    Ok(())
}

fn validate_attachments(item: usize, audio: &[AudioAttachment]) -> ScenecastResult<()> {
    for a in audio {
        if a.src.is_empty() {
            return Err(item_err(item, "audio src must be non-empty"));
        }
        if !a.offset_sec.is_finite() {
            return Err(item_err(item, "audio offset must be finite"));
        }
        if let Some(v) = a.volume
            && !(0.0..=1.0).contains(&v)
        {
            return Err(item_err(item, format!("audio volume {v} outside [0, 1]")));
        }
        for fade in [a.fade_in_sec, a.fade_out_sec].into_iter().flatten() {
            if !fade.is_finite() || fade < 0.0 {
                return Err(item_err(item, "audio fades must be finite and >= 0"));
            }
        }
    }
    Ok(())
}

fn item_err(index: usize, msg: impl AsRef<str>) -> ScenecastError {
    ScenecastError::semantic(format!("item {index}: {}", msg.as_ref()))
}
