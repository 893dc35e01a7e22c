//! Command line parsing

use bdsquery::app::cli::args::{Args, QueryCommand};
use bdsquery::render::{resolve_modes, OutputMode};
use clap::error::ErrorKind;

fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_with(argv.iter().copied(), false)
}

#[test]
fn test_each_subcommand() {
    let player = parse(&["bdsquery", "player", "Steve"]).unwrap();
    assert!(matches!(player.command, QueryCommand::Player { ref name, .. } if name == "Steve"));
    assert_eq!(player.command.mode_override(), None);

    let status = parse(&["bdsquery", "status"]).unwrap();
    assert!(matches!(status.command, QueryCommand::Status { .. }));

    let players = parse(&["bdsquery", "players", "--mode", "text"]).unwrap();
    assert_eq!(players.command.mode_override(), Some("text"));
}

#[test]
fn test_player_requires_a_name() {
    let err = parse(&["bdsquery", "player"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_global_options_before_and_after_subcommand() {
    let before = parse(&["bdsquery", "-t", "abc", "-O", "/tmp/shots", "status"]).unwrap();
    let after = parse(&["bdsquery", "status", "-t", "abc", "-O", "/tmp/shots"]).unwrap();
    assert_eq!(before, after);
    assert_eq!(before.token.as_deref(), Some("abc"));
}

#[test]
fn test_invalid_log_values_are_rejected() {
    let err = parse(&["bdsquery", "--log-level", "loud", "status"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    let err = parse(&["bdsquery", "--log-format", "yaml", "status"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_timeout_range() {
    assert_eq!(parse(&["bdsquery", "-T", "120", "status"]).unwrap().timeout, Some(120));
    assert!(parse(&["bdsquery", "-T", "121", "status"]).is_err());
    assert!(parse(&["bdsquery", "-T", "soon", "status"]).is_err());
}

#[test]
fn test_mode_override_resolution() {
    let defaults = [OutputMode::Text, OutputMode::Image];
    let cases: [(&[&str], Vec<OutputMode>); 4] = [
        (&["bdsquery", "status", "--mode", "text"], vec![OutputMode::Text]),
        (&["bdsquery", "status", "--mode", "image"], vec![OutputMode::Image]),
        (&["bdsquery", "status", "--mode", ""], defaults.to_vec()),
        (&["bdsquery", "status"], defaults.to_vec()),
    ];

    for (argv, expected) in cases {
        let args = parse(argv).unwrap();
        assert_eq!(
            resolve_modes(args.command.mode_override(), &defaults),
            expected,
            "{:?}",
            argv
        );
    }
}

#[test]
fn test_help_and_version() {
    let err = parse(&["bdsquery", "--help"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    assert!(err.to_string().contains("player"));

    let err = parse(&["bdsquery", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}
