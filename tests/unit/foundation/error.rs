use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MemeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MemeError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(MemeError::media("x").to_string().contains("media error:"));
    assert!(MemeError::encode("x").to_string().contains("encode error:"));
    assert!(
        MemeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn unimplemented_template_names_the_selector() {
    let msg = MemeError::UnimplementedTemplate(7).to_string();
    assert_eq!(msg, "template 7 is not implemented");
}

#[test]
fn not_found_names_the_path() {
    let msg = MemeError::not_found("memes_config.json").to_string();
    assert!(msg.contains("file not found"));
    assert!(msg.contains("memes_config.json"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MemeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
