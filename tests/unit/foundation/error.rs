use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScenecastError::semantic("x")
            .to_string()
            .contains("semantic error:")
    );
    assert!(ScenecastError::asset("x").to_string().contains("asset error:"));
    assert!(
        ScenecastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScenecastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn syntax_error_names_the_line() {
    let err = ScenecastError::syntax(3, "say \"x\"");
    assert_eq!(err.to_string(), "syntax error on line 3: \"say \"x\"\"");
    let ScenecastError::Syntax { line_no, line } = err else {
        panic!("expected syntax error");
    };
    assert_eq!(line_no, 3);
    assert_eq!(line, "say \"x\"");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScenecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
