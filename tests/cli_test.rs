/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary with a throwaway config file so the
/// user's real favorites and settings are never touched.
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use axum::Router;
use axum::routing::get;
use common::{AppDirBuilder, FeedJsonBuilder, spawn_server};
use predicates::prelude::*;

fn command(app_dir: &AppDirBuilder) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_onthisday-explorer"));
    cmd.env("HOME", app_dir.path())
        .env("XDG_CONFIG_HOME", app_dir.path())
        .env("XDG_DATA_HOME", app_dir.path())
        .env("XDG_CACHE_HOME", app_dir.path())
        .env("NO_PROXY", "127.0.0.1,localhost")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(app_dir.config_path());
    cmd
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_onthisday-explorer"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("favorites"))
        .stdout(predicate::str::contains("--no-persist"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_onthisday-explorer"));
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_favorites_lists_saved_entries() {
    let app_dir = AppDirBuilder::new()
        .with_favorites_json(
            r#"[
  {"text": "Fact 1", "year": 1900, "formattedDate": "January 1"},
  {"text": "Fact 3", "year": 1960, "formattedDate": "January 2"},
  {"text": "Fact 2", "year": 1950, "formattedDate": "January 1"}
]"#,
        )
        .build();

    command(&app_dir)
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("Favorites (3)"))
        .stdout(predicate::str::contains(
            "January 1: Fact 1 - 1900\nJanuary 1: Fact 2 - 1950\nJanuary 2: Fact 3 - 1960",
        ));
}

#[test]
fn test_cli_favorites_empty() {
    let app_dir = AppDirBuilder::new().build();

    command(&app_dir)
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("No favorites saved yet"));
}

#[test]
fn test_cli_favorites_corrupt_file_fails() {
    let app_dir = AppDirBuilder::new().with_favorites_json("{broken").build();

    command(&app_dir)
        .arg("favorites")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read favorites"));
}

#[test]
fn test_cli_missing_config_file_fails() {
    let app_dir = AppDirBuilder::new();

    command(&app_dir)
        .arg("favorites")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_cli_invalid_config_value_fails() {
    let app_dir = AppDirBuilder::new().with_setting("page_size = 0").build();

    command(&app_dir)
        .args(["lookup", "03-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size"));
}

#[test]
fn test_cli_lookup_rejects_invalid_date() {
    let app_dir = AppDirBuilder::new().build();

    command(&app_dir)
        .args(["lookup", "02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such day"));
}

#[test]
fn test_cli_lookup_rejects_page_zero() {
    let app_dir = AppDirBuilder::new().build();

    command(&app_dir).args(["lookup", "03-05", "--page", "0"]).assert().failure();
}

#[test]
fn test_cli_lookup_unreachable_feed_prints_no_events() {
    // Port 9 (discard) is closed on test machines; the connection is refused
    let app_dir = AppDirBuilder::new()
        .with_setting(r#"feed_base_url = "http://127.0.0.1:9""#)
        .with_setting("timeout_secs = 1")
        .build();

    command(&app_dir)
        .args(["lookup", "2024-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Births on March 5"))
        .stdout(predicate::str::contains("No events found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_lookup_prints_page_from_feed() {
    let body = FeedJsonBuilder::births()
        .with_entry("Ada Lovelace", 1815)
        .with_entry("Alan Turing", 1912)
        .with_entry("Grace Hopper", 1906)
        .build();
    let app = Router::new().route(
        "/feed/v1/wikipedia/en/onthisday/births/03/05",
        get(move || async move { body }),
    );
    let base = spawn_server(app).await;

    let app_dir = AppDirBuilder::new()
        .with_setting(&format!("feed_base_url = {:?}", base))
        .with_setting("page_size = 2")
        .build();

    let mut first_page = command(&app_dir);
    first_page.args(["lookup", "03-05"]);
    let mut second_page = command(&app_dir);
    second_page.args(["lookup", "03-05", "--page", "2"]);
    let mut searched = command(&app_dir);
    searched.args(["lookup", "03-05", "--search", "GRACE"]);

    let outputs = tokio::task::spawn_blocking(move || {
        [first_page, second_page, searched].map(|mut cmd| cmd.output().unwrap())
    })
    .await
    .unwrap();

    outputs[0]
        .clone()
        .assert()
        .success()
        .stdout(predicate::str::contains("Births on March 5"))
        .stdout(predicate::str::contains("Ada Lovelace - 1815\nAlan Turing - 1912\n"))
        .stdout(predicate::str::contains("Page 1/2 (3 events)"));

    outputs[1]
        .clone()
        .assert()
        .success()
        .stdout(predicate::str::contains("Grace Hopper - 1906"))
        .stdout(predicate::str::contains("Ada Lovelace").not())
        .stdout(predicate::str::contains("Page 2/2"));

    outputs[2]
        .clone()
        .assert()
        .success()
        .stdout(predicate::str::contains("Grace Hopper - 1906"))
        .stdout(predicate::str::contains("1 of 3 events match \"GRACE\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_lookup_marks_favorites() {
    let body = FeedJsonBuilder::births().with_entry("Ada Lovelace", 1815).build();
    let app = Router::new().route(
        "/feed/v1/wikipedia/en/onthisday/births/12/10",
        get(move || async move { body }),
    );
    let base = spawn_server(app).await;

    let app_dir = AppDirBuilder::new()
        .with_setting(&format!("feed_base_url = {:?}", base))
        .with_favorites_json(
            r#"[{"text": "Ada Lovelace", "year": 1815, "formattedDate": "December 10"}]"#,
        )
        .build();

    let mut cmd = command(&app_dir);
    cmd.args(["lookup", "12-10"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap()).await.unwrap();

    output.assert().success().stdout(predicate::str::contains("★ Ada Lovelace - 1815"));
}
