use super::*;

#[test]
fn cache_key_is_deterministic_and_sixteen_hex_digits() {
    let a = cache_key("af_heart", "Hello there");
    assert_eq!(a, cache_key("af_heart", "Hello there"));
    assert_eq!(a.len(), 16);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn cache_key_depends_on_voice() {
    assert_ne!(cache_key("af_heart", "hi"), cache_key("bm_george", "hi"));
    assert_ne!(cache_key("af_heart", "hi"), cache_key("af_heart", "hi!"));
}

#[test]
fn slug_collapses_and_trims() {
    assert_eq!(slug("Hello, world!"), "Hello-world");
    assert_eq!(slug("  --run   `make install`--  "), "run-make-install");
    assert_eq!(slug("snake_case-ok"), "snake_case-ok");
    assert_eq!(slug("déjà vu"), "d-j-vu");
}

#[test]
fn slug_falls_back_and_truncates() {
    assert_eq!(slug(""), "tts");
    assert_eq!(slug("!!! ???"), "tts");
    let long = "word ".repeat(30);
    let s = slug(&long);
    assert_eq!(s.chars().count(), SLUG_MAX_CHARS);
    assert!(s.starts_with("word-word-"));
}

#[test]
fn basename_joins_slug_voice_and_key() {
    let b = basename("Hi there", "af_heart");
    assert_eq!(b, format!("Hi-there-af_heart-{}", cache_key("af_heart", "Hi there")));
}
