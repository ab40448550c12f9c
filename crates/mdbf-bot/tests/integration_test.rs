//! Integration tests for mdbf-bot crate.
//!
//! These cover startup and background polling without a Discord connection.

use mdbf_bot::{default_cogs, default_registry, poll_once, spawn_config_poller, BotError, MdbfBot};
use mdbf_cogs::FilterCog;
use mdbf_common::test_utils::{config_fixtures, create_temp_dir, init_test_logging, write_config};
use mdbf_config::{BotSettings, ConfigError, ConfigLocator};
use std::path::Path;
use std::time::Duration;

fn settings_for(dir: &Path) -> BotSettings {
    let dir = dir.display().to_string();
    BotSettings::from_lookup(|var| match var {
        "BOT_TOKEN" => Some("token".to_string()),
        "BOT_NAME" => Some("TestBot".to_string()),
        "MDBF_CONFIG_DIR" => Some(dir.clone()),
        _ => None,
    })
    .unwrap()
}

#[test]
fn test_builtin_cogs_are_registered() {
    let registry = default_registry();
    for cog in default_cogs() {
        assert!(registry.section_for(cog.name()).is_some());
    }
}

#[tokio::test]
async fn test_load_cogs_from_config_dir() {
    init_test_logging();
    let dir = create_temp_dir();
    write_config(dir.path(), "config.toml", config_fixtures::filter_config_toml());

    let bot = MdbfBot::new(settings_for(dir.path()));
    let manager = bot.load_cogs().await.unwrap();
    let manager = manager.lock().await;
    assert_eq!(manager.bot_name(), "TestBot");
    assert!(manager.cog::<FilterCog>().unwrap().is_banned("x"));
}

#[tokio::test]
async fn test_load_cogs_fails_without_config() {
    init_test_logging();
    let dir = create_temp_dir();

    let bot = MdbfBot::new(settings_for(dir.path()));
    let err = bot.load_cogs().await.unwrap_err();
    assert!(matches!(err, BotError::Config(ConfigError::NotFound { .. })));
}

#[tokio::test]
async fn test_poll_once_picks_up_changes() {
    init_test_logging();
    let dir = create_temp_dir();
    write_config(dir.path(), "config.yml", config_fixtures::filter_config_yaml());
    let manager = MdbfBot::new(settings_for(dir.path())).load_cogs().await.unwrap();
    let locator = ConfigLocator::new(dir.path());

    assert!(poll_once(&manager, &locator).await.unwrap().is_empty());

    write_config(dir.path(), "config.yml", config_fixtures::filter_config_yaml_extended());
    let report = poll_once(&manager, &locator).await.unwrap();
    assert_eq!(report.updated, vec!["filter"]);
}

#[tokio::test]
async fn test_poller_reloads_in_background() {
    init_test_logging();
    let dir = create_temp_dir();
    write_config(dir.path(), "config.yml", config_fixtures::filter_config_yaml());
    let manager = MdbfBot::new(settings_for(dir.path())).load_cogs().await.unwrap();

    write_config(dir.path(), "config.yml", config_fixtures::filter_config_yaml_extended());
    let handle = spawn_config_poller(
        manager.clone(),
        ConfigLocator::new(dir.path()),
        Duration::from_millis(20),
    );

    let mut reloaded = false;
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if manager.lock().await.cog::<FilterCog>().unwrap().is_banned("y") {
            reloaded = true;
            break;
        }
    }
    handle.abort();
    assert!(reloaded);
}
