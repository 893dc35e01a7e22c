//! Configuration files and command line overrides

use crate::common::write_config;
use bdsquery::app::cli::args::Args;
use bdsquery::app::cli::config::{AppConfig, ConfigError};
use bdsquery::render::OutputMode;
use std::path::PathBuf;

#[tokio::test]
async fn test_load_complete_file() {
    let (_dir, path) = write_config(
        r##"
api-url = "https://bds.example.org/api/"
token = "s3cret"
timeout = 15
decoration = "🎮"
output-modes = ["text", "image"]
render-scale = 1.5
output-dir = "shots"
typst-bin = "/opt/typst/bin/typst"
color = false
log-level = "debug"
log-format = "json"
log-file = "bdsquery.log"

[theme]
background = "#101010"
fallback-fonts = ["Sarasa Gothic SC"]

[[fields]]
path = "device.ip"
enabled = false

[[fields]]
path = "server.motd"
enabled = false
"##,
    );

    let config = AppConfig::load(Some(&path)).await.unwrap();

    assert_eq!(config.api_url, "https://bds.example.org/api");
    assert_eq!(config.token.as_deref(), Some("s3cret"));
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.decoration, "🎮");
    assert_eq!(config.output_modes, vec![OutputMode::Text, OutputMode::Image]);
    assert_eq!(config.render_scale, 1.5);
    assert_eq!(config.output_dir, PathBuf::from("shots"));
    assert_eq!(config.typst_bin, "/opt/typst/bin/typst");
    assert_eq!(config.color, Some(false));
    assert_eq!(config.log_level.as_deref(), Some("debug"));
    assert_eq!(config.log_format.as_deref(), Some("json"));
    assert_eq!(config.log_file, Some(PathBuf::from("bdsquery.log")));
    assert_eq!(config.theme.background, "#101010");
    assert_eq!(config.theme.fallback_fonts, vec!["Sarasa Gothic SC".to_string()]);
    assert!(!config.fields.is_enabled("device.ip"));
    assert!(!config.fields.is_enabled("server.motd"));
    assert!(config.fields.is_enabled("device.os"));
}

#[tokio::test]
async fn test_invalid_value_names_the_key() {
    let (_dir, path) = write_config("render-scale = 10.0\n");
    let err = AppConfig::load(Some(&path)).await.unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { .. }));
    let message = err.to_string();
    assert!(message.contains("render-scale"), "{}", message);
    assert!(message.contains(&path.display().to_string()), "{}", message);
}

#[tokio::test]
async fn test_syntax_error_is_a_parse_error() {
    let (_dir, path) = write_config("[theme\nbackground = 1\n");
    let err = AppConfig::load(Some(&path)).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[tokio::test]
async fn test_wrong_types_are_rejected() {
    for contents in [
        "timeout = \"ten\"\n",
        "api-url = 8080\n",
        "output-modes = [1, 2]\n",
        "[[fields]]\nenabled = false\n",
    ] {
        let (_dir, path) = write_config(contents);
        let err = AppConfig::load(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "{}: {:?}", contents, err);
    }
}

#[tokio::test]
async fn test_command_line_wins_over_file() {
    let (_dir, path) = write_config(
        r#"
api-url = "http://from-file:1"
output-dir = "from-file"
log-file = "from-file.log"
"#,
    );
    let args = Args::try_parse_with(
        [
            "bdsquery",
            "--config-file",
            path.to_str().unwrap(),
            "--output-dir",
            "from-cli",
            "--log-file",
            "-",
            "status",
        ],
        false,
    )
    .unwrap();

    let mut config = AppConfig::load(args.config_file.as_deref()).await.unwrap();
    config.apply_args(&args).unwrap();

    assert_eq!(config.api_url, "http://from-file:1");
    assert_eq!(config.output_dir, PathBuf::from("from-cli"));
    assert_eq!(config.log_file, None);
}

#[test]
fn test_invalid_command_line_url() {
    let args = Args::try_parse_with(["bdsquery", "--api-url", "bds.local", "status"], false).unwrap();
    let mut config = AppConfig::default();
    let err = config.apply_args(&args).unwrap_err();
    assert!(err.to_string().contains("--api-url"));
}
