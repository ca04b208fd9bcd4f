use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BinError::precondition("x")
            .to_string()
            .contains("precondition violated:")
    );
    assert!(
        BinError::missing_surface("x")
            .to_string()
            .contains("missing surface:")
    );
    assert!(BinError::plugin("x").to_string().contains("plugin error:"));
    assert!(
        BinError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BinError::consistency("x")
            .to_string()
            .contains("internal consistency fault:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BinError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
