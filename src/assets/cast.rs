use crate::assets::paths::normalize_rel_path;
use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::schedule::durations::CastProbe;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads asciicast recordings from a directory to learn their length.
#[derive(Clone, Debug)]
pub struct AsciicastProbe {
    root: PathBuf,
}

impl AsciicastProbe {
    /// Probe recordings under `root`. Cast paths are resolved relative to it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory cast paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CastProbe for AsciicastProbe {
    fn duration_secs(&self, cast_path: &str) -> ScenecastResult<f64> {
        let rel = normalize_rel_path(cast_path)?;
        let path = self.root.join(&rel);
        let text = std::fs::read_to_string(&path).map_err(|e| {
            ScenecastError::asset(format!("read recording '{}': {e}", path.display()))
        })?;
        let secs = recording_duration_secs(&text);
        tracing::debug!(cast = rel.as_str(), secs, "probed recording");
        Ok(secs)
    }
}

/// Length of an asciicast document in seconds, or 0 when nothing usable is found.
///
/// A whole-document header with a numeric `duration` wins, then the last `stdout` event of a v1
/// recording, then the timestamp of the final line of a v2 event stream.
pub(crate) fn recording_duration_secs(text: &str) -> f64 {
    if let Ok(doc) = serde_json::from_str::<Value>(text) {
        if let Some(d) = doc.get("duration").and_then(Value::as_f64) {
            return d;
        }
        if let Some(t) = doc
            .get("stdout")
            .and_then(Value::as_array)
            .and_then(|events| events.last())
            .and_then(event_time)
        {
            return t;
        }
    }

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() >= 2
        && let Some(last) = lines.last()
        && let Ok(event) = serde_json::from_str::<Value>(last)
        && let Some(t) = event_time(&event)
    {
        return t;
    }
    0.0
}

fn event_time(event: &Value) -> Option<f64> {
    event.as_array()?.first()?.as_f64()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cast.rs"]
mod tests;
