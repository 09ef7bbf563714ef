//! Provider configuration loading tests.

use std::io::Write;
use togyz_qumalaq::{LlmProvider, ProviderConfig};

#[test]
fn test_defaults() {
    let config = ProviderConfig::new();

    assert_eq!(*config.llm_provider(), LlmProvider::OpenAI);
    assert_eq!(config.llm_model(), "gpt-4o-mini");
    assert_eq!(*config.llm_max_tokens(), 150);
    assert_eq!(*config.llm_timeout_secs(), 30);
}

#[test]
fn test_from_file_reads_all_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "llm_provider = \"anthropic\"").unwrap();
    writeln!(file, "llm_model = \"claude-3-5-haiku-20241022\"").unwrap();
    writeln!(file, "llm_max_tokens = 200").unwrap();
    writeln!(file, "llm_timeout_secs = 10").unwrap();

    let config = ProviderConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.llm_provider(), LlmProvider::Anthropic);
    assert_eq!(config.llm_model(), "claude-3-5-haiku-20241022");
    assert_eq!(*config.llm_max_tokens(), 200);
    assert_eq!(*config.llm_timeout_secs(), 10);
}

#[test]
fn test_from_file_fills_missing_fields_with_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "llm_model = \"gpt-4o\"").unwrap();

    let config = ProviderConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.llm_provider(), LlmProvider::OpenAI);
    assert_eq!(config.llm_model(), "gpt-4o");
    assert_eq!(*config.llm_max_tokens(), 150);
    assert_eq!(*config.llm_timeout_secs(), 30);
}

#[test]
fn test_empty_file_is_all_defaults() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let config = ProviderConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.llm_provider(), LlmProvider::OpenAI);
    assert_eq!(config.llm_model(), "gpt-4o-mini");
}

#[test]
fn test_missing_file_is_an_error() {
    let err = ProviderConfig::from_file("/nonexistent/provider.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "llm_max_tokens = \"many\"").unwrap();

    let err = ProviderConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = ProviderConfig::new();

    let encoded = toml::to_string(&config).unwrap();
    let decoded: ProviderConfig = toml::from_str(&encoded).unwrap();

    assert_eq!(decoded.llm_provider(), config.llm_provider());
    assert_eq!(decoded.llm_model(), config.llm_model());
    assert_eq!(decoded.llm_max_tokens(), config.llm_max_tokens());
    assert_eq!(decoded.llm_timeout_secs(), config.llm_timeout_secs());
}
