//! Config loading and credential resolution feeding the pipeline

use ideaforge_config::{ConfigError, CredentialSource, IdeaForgeConfig, resolve_credential};
use ideaforge_core::Forge;

use crate::common::write_config;

#[test]
fn config_key_reaches_both_components() {
    let (_dir, path) = write_config("[api_keys]\ngemini = \"AIza-from-file\"\n");
    let config = IdeaForgeConfig::load_from(&path).unwrap();

    let (credential, source) = resolve_credential(None, None, Some(&config));
    assert_eq!(source, CredentialSource::ConfigFile);

    let forge = Forge::new(credential);
    assert_eq!(forge.expander().credential().as_str(), "AIza-from-file");
    assert_eq!(forge.critic().credential().as_str(), "AIza-from-file");
}

#[test]
fn config_key_expands_env_reference() {
    unsafe {
        std::env::set_var("IDEAFORGE_SUITE_KEY", "AIza-from-env-ref");
    }
    let (_dir, path) = write_config("[api_keys]\ngemini = \"${IDEAFORGE_SUITE_KEY}\"\n");
    let config = IdeaForgeConfig::load_from(&path).unwrap();
    assert_eq!(config.gemini_key(), Some("AIza-from-env-ref".to_string()));
    unsafe {
        std::env::remove_var("IDEAFORGE_SUITE_KEY");
    }
}

#[test]
fn unset_env_reference_falls_through_to_missing() {
    unsafe {
        std::env::remove_var("IDEAFORGE_SUITE_UNSET");
    }
    let (_dir, path) = write_config("[api_keys]\ngemini = \"${IDEAFORGE_SUITE_UNSET}\"\n");
    let config = IdeaForgeConfig::load_from(&path).unwrap();

    let (credential, source) = resolve_credential(None, None, Some(&config));
    assert!(credential.is_empty());
    assert_eq!(source, CredentialSource::Missing);

    // An empty credential still yields a working pipeline.
    assert_eq!(
        Forge::new(credential).run("idea").critique,
        "Critiquing: Forging: idea"
    );
}

#[test]
fn unknown_sections_are_ignored() {
    let (_dir, path) = write_config("[future]\nmodel = \"x\"\n");
    let config = IdeaForgeConfig::load_from(&path).unwrap();
    assert!(config.api_keys.is_none());
}

#[test]
fn malformed_config_reports_path() {
    let (_dir, path) = write_config("not = [valid");
    let err = IdeaForgeConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), &path);
}
