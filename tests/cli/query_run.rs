//! Whole invocations against a mock status API

use crate::common::{fixture_text, write_config};
use bdsquery::app::startup::{run, EXIT_CONFIG, EXIT_OK, EXIT_QUERY_FAILED};
use mockito::{Matcher, Server};
use serial_test::serial;

async fn invoke(argv: &[&str]) -> (i32, String) {
    let mut out = Vec::new();
    let code = run(argv, &mut out).await;
    (code, String::from_utf8(out).unwrap())
}

#[tokio::test]
#[serial]
async fn test_player_text_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/player")
        .match_query(Matcher::UrlEncoded("name".into(), "Steve".into()))
        .with_status(200)
        .with_body(fixture_text("player_full.json"))
        .create_async()
        .await;
    let url = server.url();

    let (code, out) = invoke(&[
        "bdsquery",
        "--api-url",
        &url,
        "--no-color",
        "--log-level",
        "off",
        "player",
        "Steve",
        "--mode",
        "text",
    ])
    .await;

    mock.assert_async().await;
    assert_eq!(code, EXIT_OK);
    assert!(out.starts_with("[BDS] 玩家 Steve\n"), "{}", out);
    assert!(out.contains("生命值: 18/20 ❤️"));
    assert!(out.contains("状态: 🦅 飞行 | 🏃 疾跑"));
}

#[tokio::test]
#[serial]
async fn test_config_file_filters_and_token_apply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/player")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "Steve".into()),
            Matcher::UrlEncoded("token".into(), "from-config".into()),
        ]))
        .with_status(200)
        .with_body(fixture_text("player_full.json"))
        .create_async()
        .await;
    let (_dir, path) = write_config(&format!(
        r#"
api-url = "{}"
token = "from-config"
decoration = "🎮"
log-level = "off"

[[fields]]
path = "health"
enabled = false

[[fields]]
path = "maxHealth"
enabled = false
"#,
        server.url()
    ));

    let (code, out) = invoke(&[
        "bdsquery",
        "--config-file",
        path.to_str().unwrap(),
        "player",
        "Steve",
    ])
    .await;

    mock.assert_async().await;
    assert_eq!(code, EXIT_OK);
    assert!(out.starts_with("🎮 玩家 Steve"), "{}", out);
    assert!(!out.contains("生命值"));
    assert!(out.contains("🦅 飞行"));
}

#[tokio::test]
#[serial]
async fn test_unknown_player_is_not_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/player")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;
    let url = server.url();

    let (code, out) = invoke(&[
        "bdsquery", "-u", &url, "--log-level", "off", "player", "Ghost",
    ])
    .await;

    assert_eq!(code, EXIT_OK);
    assert_eq!(out, "[BDS] ❌ 未找到玩家「Ghost」\n");
}

#[tokio::test]
#[serial]
async fn test_fetch_failure_exit_code() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/status")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;
    let url = server.url();

    let (code, out) = invoke(&["bdsquery", "-u", &url, "--log-level", "off", "status"]).await;

    assert_eq!(code, EXIT_QUERY_FAILED);
    assert!(out.starts_with("查询失败: "), "{}", out);
    assert!(out.contains("503"));
}

#[tokio::test]
#[serial]
async fn test_connection_failure_reply_hides_token() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}", port);

    let (code, out) = invoke(&[
        "bdsquery",
        "-u",
        &url,
        "-t",
        "SUPERSECRET",
        "--log-level",
        "off",
        "player",
        "Steve",
    ])
    .await;

    assert_eq!(code, EXIT_QUERY_FAILED);
    assert!(out.starts_with("查询失败: "), "{}", out);
    assert!(!out.contains("SUPERSECRET"), "{}", out);
}

#[tokio::test]
#[serial]
async fn test_image_failure_keeps_text_output() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/players")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(fixture_text("players.json"))
        .create_async()
        .await;
    let output_dir = tempfile::tempdir().unwrap();
    let (_dir, path) = write_config(&format!(
        r#"
api-url = "{}"
output-modes = ["text", "image"]
typst-bin = "/nonexistent/bdsquery-test-typst"
output-dir = "{}"
log-level = "off"
"#,
        server.url(),
        output_dir.path().display()
    ));

    let (code, out) = invoke(&["bdsquery", "-c", path.to_str().unwrap(), "players"]).await;

    assert_eq!(code, EXIT_OK);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "[BDS] 在线玩家 3/20");
    let last = lines.last().copied().unwrap_or_default();
    assert!(last.starts_with("[图片渲染失败: "), "{}", out);
    assert_eq!(std::fs::read_dir(output_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
#[serial]
async fn test_invalid_config_exit_code() {
    let (_dir, path) = write_config("timeout = 0\n");
    let (code, out) = invoke(&["bdsquery", "-c", path.to_str().unwrap(), "status"]).await;
    assert_eq!(code, EXIT_CONFIG);
    assert!(out.is_empty());
}
