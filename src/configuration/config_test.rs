use std::fs;

use anyhow::Result;
use tempdir::TempDir;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

fn write_config(dir: &TempDir, contents: &str) -> Result<String> {
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, contents)?;
    return Ok(config_path.to_string_lossy().to_string());
}

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(&cli::build());
    let doc = res.parse::<toml_edit::Document>();
    assert!(doc.is_ok());

    assert!(res.contains("backend = \"openai\""));
    assert!(res.contains("subject = \"general\""));
    assert!(res.contains("backend-health-check-timeout = 1000"));
    assert!(res.contains("openai-url = \"https://api.openai.com\""));
    assert!(res.contains("[possible values: local, openai]"));
    assert!(!res.contains("config-file ="));
}

#[tokio::test]
async fn it_uses_defaults_without_config_file() -> Result<()> {
    let dir = TempDir::new("scholar-scribe-config")?;
    let missing = dir
        .path()
        .join("missing.toml")
        .to_string_lossy()
        .to_string();
    let matches =
        cli::build().try_get_matches_from(vec!["scholar-scribe", "-c", missing.as_str()])?;

    let values = Config::resolve(&cli::build(), &[&matches]).await?;
    assert_eq!(values[&ConfigKey::Backend], "openai");
    assert_eq!(values[&ConfigKey::Subject], "general");
    assert_eq!(values[&ConfigKey::BackendHealthCheckTimeout], "1000");
    return Ok(());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let dir = TempDir::new("scholar-scribe-config")?;
    let config_file = write_config(
        &dir,
        "backend = \"local\"\nsubject = \"stem\"\nbackend-health-check-timeout = 250\n",
    )?;
    let matches =
        cli::build().try_get_matches_from(vec!["scholar-scribe", "-c", config_file.as_str()])?;

    let values = Config::resolve(&cli::build(), &[&matches]).await?;
    assert_eq!(values[&ConfigKey::Backend], "local");
    assert_eq!(values[&ConfigKey::Subject], "stem");
    assert_eq!(values[&ConfigKey::BackendHealthCheckTimeout], "250");
    assert_eq!(values[&ConfigKey::OpenAiURL], "https://api.openai.com");
    assert_eq!(values[&ConfigKey::ConfigFile], config_file);
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_config_with_invalid_subject() -> Result<()> {
    let dir = TempDir::new("scholar-scribe-config")?;
    let config_file = write_config(&dir, "subject = \"astrology\"\n")?;
    let matches =
        cli::build().try_get_matches_from(vec!["scholar-scribe", "-c", config_file.as_str()])?;

    let res = Config::resolve(&cli::build(), &[&matches]).await;
    assert!(res.is_err());
    assert!(res
        .unwrap_err()
        .to_string()
        .contains("invalid value for key 'subject'"));
    return Ok(());
}

#[tokio::test]
async fn it_prefers_arguments_over_config_file() -> Result<()> {
    let dir = TempDir::new("scholar-scribe-config")?;
    let config_file = write_config(&dir, "backend = \"openai\"\nsubject = \"stem\"\n")?;
    let matches = cli::build().try_get_matches_from(vec![
        "scholar-scribe",
        "chat",
        "-c",
        config_file.as_str(),
        "--backend",
        "local",
        "--subject",
        "research",
    ])?;
    let (_, chat_matches) = matches.subcommand().unwrap();

    let values = Config::resolve(&cli::build(), &[&matches, chat_matches]).await?;
    assert_eq!(values[&ConfigKey::Backend], "local");
    assert_eq!(values[&ConfigKey::Subject], "research");
    return Ok(());
}

#[test]
fn it_names_keys_in_kebab_case() {
    assert_eq!(ConfigKey::OpenAiURL.to_string(), "openai-url");
    assert_eq!(
        ConfigKey::BackendHealthCheckTimeout.to_string(),
        "backend-health-check-timeout"
    );
}

#[tokio::test]
async fn it_loads_openai_url_from_file() -> Result<()> {
    let dir = TempDir::new("scholar-scribe-config")?;
    let config_file = write_config(&dir, "openai-url = \"http://localhost:8080\"\n")?;
    let matches =
        cli::build().try_get_matches_from(vec!["scholar-scribe", "-c", config_file.as_str()])?;

    let values = Config::resolve(&cli::build(), &[&matches]).await?;
    assert_eq!(values[&ConfigKey::OpenAiURL], "http://localhost:8080");
    return Ok(());
}

#[tokio::test]
async fn it_reads_openai_url_argument() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "scholar-scribe",
        "--openai-url",
        "http://localhost:9090",
    ])?;

    let values = Config::resolve(&cli::build(), &[&matches]).await?;
    assert_eq!(values[&ConfigKey::OpenAiURL], "http://localhost:9090");
    return Ok(());
}
