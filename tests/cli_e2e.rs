//! End-to-end CLI tests for the image-fetcher binary.

// `Command::cargo_bin` is deprecated in assert_cmd >=2.0.17 in favor of
// `cargo::cargo_bin_cmd!` macro. Suppressed until migration to the new API.
#![allow(deprecated)]

mod support;
use support::socket_guard::start_mock_server_or_skip;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("image-fetcher").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mindfully fetch images"));
}

#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("image-fetcher").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("image-fetcher"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("image-fetcher").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_empty_stdin_exits_zero_with_closing_message() {
    let tempdir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("image-fetcher").unwrap();
    cmd.arg("--output-dir")
        .arg(tempdir.path().join("out"))
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the Ubuntu Image Fetcher"))
        .stdout(predicate::str::contains("Fetched 0, skipped 0, failed 0."))
        .stdout(predicate::str::contains(
            "Connection strengthened. Community enriched.",
        ));
    assert!(!tempdir.path().join("out").exists());
}

#[test]
fn test_binary_unreachable_url_exits_zero() {
    let tempdir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("image-fetcher").unwrap();
    cmd.arg("--output-dir")
        .arg(tempdir.path())
        .arg("-q")
        .write_stdin("http://127.0.0.1:1/a.png\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "⚠️ Warning: http://127.0.0.1:1/a.png is not using HTTPS.",
        ))
        .stdout(predicate::str::contains(
            "✗ Connection error for http://127.0.0.1:1/a.png",
        ))
        .stdout(predicate::str::contains("Fetched 0, skipped 0, failed 1."));
}

#[tokio::test]
async fn test_binary_comma_separated_stdin_saves_images() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/sunset"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/jpeg")
                .set_body_bytes(b"\xff\xd8\xff sunset".to_vec()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/readme.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain")
                .set_body_bytes(b"not an image".to_vec()),
        )
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let output_dir = tempdir.path().join("Fetched_Images");
    let input = format!(
        " {uri}/sunset , {uri}/readme.txt,,\n",
        uri = mock_server.uri()
    );

    let mut cmd = Command::cargo_bin("image-fetcher").unwrap();
    cmd.arg("--output-dir")
        .arg(&output_dir)
        .arg("-q")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Successfully fetched: sunset.jpg"))
        .stdout(predicate::str::contains(format!(
            "✗ Skipped {}/readme.txt (Content-Type not image/*)",
            mock_server.uri()
        )))
        .stdout(predicate::str::contains("Fetched 1, skipped 1, failed 0."));

    assert_eq!(
        std::fs::read(output_dir.join("sunset.jpg")).unwrap(),
        b"\xff\xd8\xff sunset"
    );
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 1);
}

#[tokio::test]
async fn test_binary_positional_urls_skip_duplicates() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    for route in ["/a.png", "/b.png"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "image/png")
                    .set_body_bytes(b"\x89PNG same".to_vec()),
            )
            .mount(&mock_server)
            .await;
    }

    let tempdir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("image-fetcher").unwrap();
    cmd.arg("--output-dir")
        .arg(tempdir.path())
        .arg("-q")
        .arg(format!("{}/a.png", mock_server.uri()))
        .arg(format!("{}/b.png", mock_server.uri()))
        .assert()
        .success()
        .stdout(predicate::str::contains("(Duplicate image)"))
        .stdout(predicate::str::contains("Fetched 1, skipped 1, failed 0."));

    assert!(tempdir.path().join("a.png").exists());
    assert!(!tempdir.path().join("b.png").exists());
}
