use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::narration::builder::{ManifestEntry, write_text};
use crate::scene::timeline::Timeline;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Host path of a timeline's self-registering module.
pub fn module_href(name: &str) -> String {
    format!("/timelines/{name}.speech.js")
}

/// ES module that exports `name` and `timeline` and registers itself on `globalThis.shellScene`.
///
/// Hosts that load the module before the player exists find it under `__timelines`/`__titles`.
pub fn speech_module(timeline: &Timeline) -> ScenecastResult<String> {
    let name = to_json(&timeline.name, false)?;
    let items = to_json(&timeline.items, true)?;
    Ok(format!(
        r#"// AUTO-GENERATED for timeline {name} - DO NOT EDIT
export const name = {name};
export const timeline = {items};
if (typeof globalThis !== "undefined") {{
  const root = (globalThis.shellScene ??= {{}});
  if (typeof root.registerTimeline === "function") {{
    root.registerTimeline(name, timeline, {name});
  }} else {{
    (root.__timelines ??= {{}})[name] = timeline;
    (root.__titles ??= {{}})[name] = {name};
  }}
}}
"#
    ))
}

/// Index of every successfully built timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Registry {
    /// Names, sorted.
    pub names: Vec<String>,
    /// Module paths, parallel to `names`.
    pub modules: Vec<String>,
    /// Display title per name.
    pub titles: BTreeMap<String, String>,
}

impl Registry {
    /// Registry over `entries`, sorted by name.
    pub fn from_entries<'e>(entries: impl IntoIterator<Item = &'e ManifestEntry>) -> Self {
        let mut sorted: Vec<&ManifestEntry> = entries.into_iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            names: sorted.iter().map(|e| e.name.clone()).collect(),
            modules: sorted.iter().map(|e| e.module.clone()).collect(),
            titles: sorted
                .iter()
                .map(|e| (e.name.clone(), e.title.clone()))
                .collect(),
        }
    }

    /// Write as pretty JSON to `path`.
    pub fn write(&self, path: &Path) -> ScenecastResult<()> {
        write_text(path, &to_json(self, true)?)
    }
}

fn to_json<T: Serialize + ?Sized>(v: &T, pretty: bool) -> ScenecastResult<String> {
    let r = if pretty {
        serde_json::to_string_pretty(v)
    } else {
        serde_json::to_string(v)
    };
    r.map_err(|e| ScenecastError::serde(e.to_string()))
}
