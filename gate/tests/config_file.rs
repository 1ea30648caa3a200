use std::io::Write;

use atk_gate::{Gate, GateConfig, GateError, LogFormat};
use atk_types::InterfaceId;

#[test]
fn loads_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
portal_url = "https://portal.example.test/graphql"
portal_access_token = "sm_aat_file"
indexer_url = "https://indexer.example.test/subgraphs/name/atk"
request_timeout_secs = 10
capability_cache_ttl_secs = 300
log_format = "json"

[interfaces]
ISMART = "0x12345678"
"#
    )
    .unwrap();

    let config = GateConfig::from_toml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.portal_url, "https://portal.example.test/graphql");
    assert_eq!(config.portal_access_token.as_deref(), Some("sm_aat_file"));
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.capability_cache_ttl_secs, 300);
    assert_eq!(config.capability_sweep_interval_secs, 60);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(
        config.interface_registry().get("ISMART"),
        Some(InterfaceId::new([0x12, 0x34, 0x56, 0x78]))
    );

    // Building a real gate does not touch the network.
    let gate = Gate::new(config).unwrap();
    assert_eq!(gate.capability_cache().ttl().as_secs(), 300);
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = GateConfig::from_toml_file(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, GateError::Config(_)));
}

#[test]
fn invalid_config_is_rejected_by_gate() {
    let config = GateConfig {
        capability_sweep_interval_secs: 0,
        ..Default::default()
    };
    assert!(matches!(Gate::new(config), Err(GateError::Config(_))));
}
