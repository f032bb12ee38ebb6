use crate::foundation::error::{ScenecastError, ScenecastResult};

/// Normalize and validate an asset path relative to a content root.
///
/// The result uses `/` separators and has no `.` segments. A single leading `/` is accepted and
/// means "from the content root", the way hosts address public assets; parent traversals (`..`)
/// are rejected.
pub(crate) fn normalize_rel_path(source: &str) -> ScenecastResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(ScenecastError::validation("asset path must be non-empty"));
    }
    if s.starts_with("//") || s.contains("://") {
        return Err(ScenecastError::validation(format!(
            "asset path '{source}' must be local to the content root"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScenecastError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScenecastError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}
