//! Unit tests for the sym-sizes command line

use clap::Parser;
use std::path::PathBuf;
use sym_sizes::cli::Cli;

#[test]
fn test_cli_defaults() {
    let cli = Cli::parse_from(["sym-sizes", "--auth-token", "abc", "libxul.so", "out.csv"]);

    assert_eq!(cli.auth_token, "abc");
    assert_eq!(cli.num, 10, "Default --num should be 10");
    assert_eq!(cli.modulename, "libxul.so");
    assert_eq!(cli.outputfile, PathBuf::from("out.csv"));
    assert_eq!(cli.symbols_url, "https://symbols.mozilla.org/");
    assert_eq!(cli.created_after, "2022-10-21");
    assert_eq!(cli.created_before, "2022-10-23");
}

#[test]
fn test_cli_custom_num() {
    let cli = Cli::parse_from([
        "sym-sizes",
        "--auth-token",
        "abc",
        "--num",
        "2",
        "libxul.so",
        "out.csv",
    ]);

    assert_eq!(cli.num, 2);

    let job = cli.job();
    assert_eq!(job.limit, 2);
    assert_eq!(job.module, "libxul.so");
    assert_eq!(job.output, PathBuf::from("out.csv"));
}

#[test]
fn test_cli_requires_auth_token() {
    let result = Cli::try_parse_from(["sym-sizes", "libxul.so", "out.csv"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_requires_both_positionals() {
    let result = Cli::try_parse_from(["sym-sizes", "--auth-token", "abc", "libxul.so"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_negative_num() {
    let result = Cli::try_parse_from([
        "sym-sizes",
        "--auth-token",
        "abc",
        "--num",
        "-1",
        "libxul.so",
        "out.csv",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_config_from_symbols_url() {
    let cli = Cli::parse_from([
        "sym-sizes",
        "--auth-token",
        "abc",
        "--symbols-url",
        "http://localhost:8000",
        "libxul.so",
        "out.csv",
    ]);

    let config = cli.config().unwrap();
    assert_eq!(config.base_url().as_str(), "http://localhost:8000/");
    assert_eq!(
        config.files_url().unwrap().as_str(),
        "http://localhost:8000/api/uploads/files/content/"
    );
}
