use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KanvasError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KanvasError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(KanvasError::raster("x").to_string().contains("raster error:"));
    assert!(
        KanvasError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn unknown_pass_names_the_handle() {
    let err = KanvasError::UnknownPass(PassId::from_raw(7));
    assert!(err.to_string().contains("7"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KanvasError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
