//! Typst documents built from fixtures

use crate::common::load_fixture;
use bdsquery::api::types::{PlayerList, PlayerRecord, ServerStatus};
use bdsquery::render::{FieldFilters, MarkupFormatter, ReportFormatter, Theme};
use chrono::{TimeZone, Utc};

fn formatter(theme: &Theme, filters: FieldFilters) -> MarkupFormatter {
    MarkupFormatter::new(theme, filters, "[BDS]")
        .with_timestamp(Utc.with_ymd_and_hms(2026, 10, 18, 8, 30, 0).unwrap())
}

fn panel_count(doc: &str) -> usize {
    doc.matches("radius: 8pt").count()
}

#[test]
fn test_player_document_structure() {
    let record: PlayerRecord = load_fixture("player_full.json");
    let doc = formatter(&Theme::default(), FieldFilters::default())
        .format_player(Some(&record), "Steve")
        .unwrap();

    assert!(doc.starts_with("#set page("));
    assert!(doc.contains(r##"fill: rgb("#1e1e2e")"##));
    assert!(doc.contains(r#"font: ("Noto Sans CJK SC", "Microsoft YaHei""#));
    assert!(doc.contains(r"\[BDS\] 玩家 Steve"));
    // seven non-empty sections
    assert_eq!(panel_count(&doc), 7);
    assert!(doc.contains("columns: (auto, 1fr)"));
    assert!(doc.contains("[🦅 飞行]"));
    assert!(doc.contains("生成时间: 2026-10-18 08:30:00"));
    assert!(doc.contains(&format!(
        "Generated by bdsquery v{}",
        env!("CARGO_PKG_VERSION")
    )));
}

#[test]
fn test_header_flag_summary_lists_glyphs() {
    let record: PlayerRecord = load_fixture("player_full.json");
    let doc = formatter(&Theme::default(), FieldFilters::default())
        .format_player(Some(&record), "Steve")
        .unwrap();
    assert!(doc.contains("[🦅 🏃 🔥 🧱]"), "{}", doc);
}

#[test]
fn test_hidden_sections_produce_no_panel() {
    let record: PlayerRecord = load_fixture("player_full.json");
    let filters = FieldFilters::hiding(["device", "pos", "biome", "isOnFire", "isOnGround"]);
    let doc = formatter(&Theme::default(), filters)
        .format_player(Some(&record), "Steve")
        .unwrap();

    assert_eq!(panel_count(&doc), 4);
    assert!(!doc.contains("设备"));
    assert!(!doc.contains("位置"));
    assert!(!doc.contains("环境"));
}

#[test]
fn test_untrusted_strings_are_escaped() {
    let status: ServerStatus = load_fixture("status.json");
    let doc = formatter(&Theme::default(), FieldFilters::default())
        .format_server(&status)
        .unwrap();

    assert!(doc.contains(r"Survival \#1"));
    assert!(doc.contains(r"Welcome \[home\]"));
    assert!(!doc.contains("Welcome [home]"));
}

#[test]
fn test_injected_markup_stays_literal() {
    let record = PlayerRecord {
        name: Some("#import \"evil\": *\n$x$".to_string()),
        ..Default::default()
    };
    let doc = formatter(&Theme::default(), FieldFilters::default())
        .format_player(Some(&record), "x")
        .unwrap();
    assert!(doc.contains(r#"\#import "evil": \* \$x\$"#), "{}", doc);
}

#[test]
fn test_theme_normalization_and_fallback() {
    let theme = Theme {
        background: "000".to_string(),
        accent: "rgb(255, 0, 128)".to_string(),
        panel: "not-a-color".to_string(),
        ..Theme::default()
    };
    let doc = formatter(&theme, FieldFilters::default())
        .format_server(&ServerStatus::default())
        .unwrap();

    assert!(doc.contains(r##"fill: rgb("#000000")"##));
    assert!(doc.contains("fill: rgb(255, 0, 128)"));
    assert!(doc.contains(r##"fill: rgb("#313244")"##));
}

#[test]
fn test_not_found_document() {
    let doc = formatter(&Theme::default(), FieldFilters::default())
        .format_player(None, "Her*brine")
        .unwrap();

    assert!(doc.starts_with("#set page("));
    assert!(doc.contains(r"\[BDS\] 未找到玩家"));
    assert!(doc.contains(r"没有找到名为「Her\*brine」的在线玩家。"));
    assert!(doc.contains("生成时间: 2026-10-18 08:30:00"));
    assert_eq!(panel_count(&doc), 1);
}

#[test]
fn test_player_list_document() {
    let list: PlayerList = load_fixture("players.json");
    let doc = formatter(&Theme::default(), FieldFilters::default())
        .format_player_list(&list)
        .unwrap();

    assert!(doc.contains(r"在线玩家 3\/20"));
    assert!(doc.contains("[Herobrine], [-],"));
    assert_eq!(panel_count(&doc), 1);
}

#[test]
fn test_repeated_rendering_is_identical() {
    let record: PlayerRecord = load_fixture("player_full.json");
    let f = formatter(&Theme::default(), FieldFilters::default());
    assert_eq!(
        f.format_player(Some(&record), "Steve").unwrap(),
        f.format_player(Some(&record), "Steve").unwrap()
    );
}
