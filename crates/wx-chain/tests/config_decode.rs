use std::io::Write;

use wx_chain::{CandidateSpec, ChainConfig, State, TransitionTable};
use wx_core::WxError;

#[test]
fn empty_document_uses_weather_defaults() {
    let config = ChainConfig::from_yaml_str("").unwrap();
    assert_eq!(config, ChainConfig::default());
    assert_eq!(config.length, 10);
    assert_eq!(config.runs, 1);
    assert_eq!(config.seed_policy.master_seed, None);
    assert_eq!(config.table().unwrap(), TransitionTable::weather());
}

#[test]
fn list_and_weight_encodings_agree() {
    let listed = ChainConfig::from_yaml_str(
        r#"
states:
  sun: [sun, sun, sun, sun, sun, sun, sun, sun, sun, rain]
  rain: [sun, rain]
"#,
    )
    .unwrap();
    let weighted = ChainConfig::from_yaml_str(
        r#"
states:
  sun: { sun: 90, rain: 10 }
  rain: { sun: 1, rain: 1 }
"#,
    )
    .unwrap();
    assert!(matches!(weighted.states["sun"], CandidateSpec::Weights(_)));

    let listed = listed.table().unwrap();
    let weighted = weighted.table().unwrap();
    for from in listed.states() {
        for to in listed.states() {
            let a = listed.probability(from, to).unwrap();
            let b = weighted.probability(from, to).unwrap();
            assert!((a - b).abs() < 1e-12, "{from} -> {to}: {a} vs {b}");
        }
    }
    assert_eq!(weighted.candidates(&State::sun()).unwrap().len(), 10);
}

#[test]
fn overrides_are_read() {
    let config = ChainConfig::from_yaml_str(
        r#"
length: 3
runs: 4
seed_policy:
  master_seed: 99
  label: smoke
"#,
    )
    .unwrap();
    assert_eq!(config.length, 3);
    assert_eq!(config.runs, 4);
    assert_eq!(config.seed_policy.master_seed, Some(99));
    assert_eq!(config.seed_policy.label.as_deref(), Some("smoke"));
}

#[test]
fn configuration_errors_fail_before_sampling() {
    let cases = [
        ("states: {}", "empty-table"),
        ("states: { sun: [] }", "empty-candidates"),
        ("states: { sun: { sun: 0 } }", "empty-candidates"),
        ("states: { sun: [sun, hail] }", "unknown-target"),
        ("states: { sun: [sun, ' '] }", "empty-label"),
        ("runs: 0", "zero-runs"),
        ("states: { sun: { sun: 70000, rain: 1 }, rain: [sun] }", "weights-too-large"),
        ("runs: 18446744073709551615", "runs-too-large"),
        ("runs: 10001", "runs-too-large"),
        ("length: 18446744073709551615", "length-too-large"),
        ("length: 1000001", "length-too-large"),
    ];
    for (yaml, code) in cases {
        let err = ChainConfig::from_yaml_str(yaml)
            .and_then(|config| config.build())
            .unwrap_err();
        assert!(matches!(err, WxError::Config(_)), "{yaml}: {err}");
        assert_eq!(err.code(), code, "{yaml}");
    }
}

#[test]
fn bounds_are_inclusive() {
    let config = ChainConfig {
        length: wx_chain::MAX_LENGTH,
        runs: wx_chain::MAX_RUNS,
        ..ChainConfig::default()
    };
    assert!(config.build().is_ok());
}

#[test]
fn malformed_yaml_is_a_serde_error() {
    let err = ChainConfig::from_yaml_str("length: [not, a, number]").unwrap_err();
    assert!(matches!(err, WxError::Serde(_)));
    assert_eq!(err.code(), "yaml-decode");
}

#[test]
fn load_reads_from_disk_and_round_trips() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "length: 5\nstates:\n  rain: [rain]").unwrap();
    let config = ChainConfig::load(file.path()).unwrap();
    assert_eq!(config.length, 5);

    let yaml = config.to_yaml_string().unwrap();
    let decoded = ChainConfig::from_yaml_str(&yaml).unwrap();
    assert_eq!(decoded, config);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = ChainConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert_eq!(err.code(), "config-read");
    assert!(err.info().context.contains_key("path"));
}
