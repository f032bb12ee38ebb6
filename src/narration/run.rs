use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::narration::builder::{ManifestEntry, NarrationBuilder};
use crate::narration::output::Registry;
use crate::script::parse;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Script file extension, matched case-insensitively.
pub const SCRIPT_EXT: &str = "timeline";

/// A script that failed to build.
#[derive(Debug)]
pub struct RunFailure {
    /// Script path.
    pub file: PathBuf,
    /// Why it failed.
    pub error: ScenecastError,
}

/// Outcome of [`build_all`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Successfully built timelines, in script order.
    pub built: Vec<ManifestEntry>,
    /// Scripts that failed, in script order.
    pub failures: Vec<RunFailure>,
    /// Where the registry was written.
    pub registry_path: PathBuf,
}

impl RunReport {
    /// Return `true` when every script built.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build every `*.timeline` script in the builder's timelines directory.
///
/// Fails outright only when the encoder is unavailable or the directory is missing. Each script
/// otherwise succeeds or fails on its own; the registry is written from the successes either way.
pub fn build_all(builder: &mut NarrationBuilder<'_>) -> ScenecastResult<RunReport> {
    builder.ensure_encoder()?;
    let scripts = discover_scripts(&builder.opts().timelines_dir)?;
    tracing::info!(scripts = scripts.len(), "building speech assets");

    let mut report = RunReport::default();
    let mut seen = HashSet::new();
    for path in scripts {
        match build_script(builder, &path, &mut seen) {
            Ok(entry) => report.built.push(entry),
            Err(error) => {
                tracing::error!(file = %path.display(), "failed building timeline: {error}");
                report.failures.push(RunFailure { file: path, error });
            }
        }
    }

    report.registry_path = builder.opts().output_dir().join("registry.json");
    Registry::from_entries(&report.built).write(&report.registry_path)?;
    tracing::info!(
        built = report.built.len(),
        failed = report.failures.len(),
        "wrote {}",
        report.registry_path.display()
    );
    Ok(report)
}

fn build_script(
    builder: &mut NarrationBuilder<'_>,
    path: &Path,
    seen: &mut HashSet<String>,
) -> ScenecastResult<ManifestEntry> {
    use anyhow::Context as _;
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("read script '{}'", path.display()))?;
    let timeline = parse(&script)?;
    if !seen.insert(timeline.name.clone()) {
        return Err(ScenecastError::semantic(format!(
            "duplicate timeline name '{}'",
            timeline.name
        )));
    }
    let (_, entry) = builder.build(&timeline)?;
    Ok(entry)
}

/// Script files in `dir`, sorted by file name.
pub fn discover_scripts(dir: &Path) -> ScenecastResult<Vec<PathBuf>> {
    use anyhow::Context as _;
    if !dir.is_dir() {
        return Err(ScenecastError::validation(format!(
            "timelines directory '{}' not found",
            dir.display()
        )));
    }

    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("list '{}'", dir.display()))? {
        let path = entry
            .with_context(|| format!("list '{}'", dir.display()))?
            .path();
        let is_script = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(SCRIPT_EXT));
        if is_script && path.is_file() {
            out.push(path);
        }
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}
