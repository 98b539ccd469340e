//! Tests for the run subcommand and config overrides.

use super::{parse, parse_cli};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["imgcrawl", "run"]) {
        CliCommand::Run {
            paths,
            links,
            skip,
            threads,
            limit,
        } => {
            assert!(paths.download_dir.is_none());
            assert!(paths.keywords.is_none());
            assert!(links.is_none());
            assert!(skip.is_none());
            assert!(threads.is_none());
            assert!(limit.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_options() {
    match parse(&[
        "imgcrawl", "run", "--skip", "false", "--threads", "8", "--limit", "20",
    ]) {
        CliCommand::Run {
            skip,
            threads,
            limit,
            ..
        } => {
            assert_eq!(skip, Some(false));
            assert_eq!(threads, Some(8));
            assert_eq!(limit, Some(20));
        }
        _ => panic!("expected Run with options"),
    }
}

#[test]
fn cli_parse_run_paths() {
    match parse(&[
        "imgcrawl",
        "run",
        "--download-dir",
        "/tmp/images",
        "--keywords",
        "kw.txt",
        "--links",
        "collected.json",
    ]) {
        CliCommand::Run { paths, links, .. } => {
            assert_eq!(paths.download_dir.as_deref(), Some(Path::new("/tmp/images")));
            assert_eq!(paths.keywords.as_deref(), Some(Path::new("kw.txt")));
            assert_eq!(links.as_deref(), Some(Path::new("collected.json")));
        }
        _ => panic!("expected Run with paths"),
    }
}

#[test]
fn cli_rejects_bad_skip_value() {
    assert!(Cli::try_parse_from(["imgcrawl", "run", "--skip", "maybe"]).is_err());
}

#[test]
fn overrides_apply_on_top_of_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
            skip_existing = true
            worker_count = 4
            download_limit = 0
            download_dir = "download"
            keywords_file = "keywords.txt"
            links_file = "links.json"
            site_name = "naver"
        "#,
    )
    .unwrap();
    let cfg_arg = cfg_path.to_string_lossy().into_owned();

    let cli = parse_cli(&[
        "imgcrawl", "run", "--config", cfg_arg.as_str(), "--skip", "false", "--threads", "2", "--limit",
        "5",
    ]);
    let cfg = cli.load_config().unwrap();
    assert!(!cfg.skip_existing);
    assert_eq!(cfg.worker_count, 2);
    assert_eq!(cfg.download_limit, 5);
    assert_eq!(cfg.site_name, "naver");
    assert_eq!(cfg.download_dir, Path::new("download"));
}
