use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5ce9_ca57_0d1c_7a11;

/// Longest slug kept in an asset basename.
pub const SLUG_MAX_CHARS: usize = 48;

/// Slug used when the text has no usable characters.
const EMPTY_SLUG: &str = "tts";

/// Stable 16-hex-digit cache key of a `(voice, text)` pair.
pub fn cache_key(voice: &str, text: &str) -> String {
    let mut h = Xxh3::with_seed(XXH3_SEED);
    h.update(voice.as_bytes());
    h.update(b"::");
    h.update(text.as_bytes());
    format!("{:016x}", h.digest())
}

/// File-name-safe rendering of narration text.
///
/// Runs of characters outside `[A-Za-z0-9_-]` become one `-`, dashes are collapsed and trimmed
/// from both ends, then the result is cut to [`SLUG_MAX_CHARS`].
pub fn slug(text: &str) -> String {
    let mut s = String::with_capacity(text.len().min(SLUG_MAX_CHARS * 2));
    for ch in text.chars() {
        let keep = ch.is_ascii_alphanumeric() || ch == '_' || ch == '-';
        let c = if keep { ch } else { '-' };
        if c == '-' && s.ends_with('-') {
            continue;
        }
        s.push(c);
    }
    let trimmed: String = s.trim_matches('-').chars().take(SLUG_MAX_CHARS).collect();
    if trimmed.is_empty() {
        EMPTY_SLUG.to_owned()
    } else {
        trimmed
    }
}

/// Asset basename, without extension: `slug-voice-key`.
pub fn basename(text: &str, voice: &str) -> String {
    format!("{}-{}-{}", slug(text), voice, cache_key(voice, text))
}

#[cfg(test)]
#[path = "../../tests/unit/narration/key.rs"]
mod tests;
