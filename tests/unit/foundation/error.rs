use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SavannaError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SavannaError::setup("x").to_string().contains("setup error:"));
    assert!(SavannaError::render("x").to_string().contains("render error:"));
    assert!(SavannaError::encode("x").to_string().contains("encode error:"));
    assert!(
        SavannaError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SavannaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: SavannaError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, SavannaError::Serde(_)));
}
