//! Text and markup agree on which facts are shown

use crate::common::load_fixture;
use bdsquery::api::types::PlayerRecord;
use bdsquery::render::escape::escape_markup;
use bdsquery::render::view::player_report;
use bdsquery::render::{FieldFilters, MarkupFormatter, ReportFormatter, TextFormatter, Theme};

fn filter_sets() -> Vec<FieldFilters> {
    vec![
        FieldFilters::default(),
        FieldFilters::hiding(["health", "maxHealth"]),
        FieldFilters::hiding(["device", "biome", "pos.x"]),
        FieldFilters::hiding(["xuid", "uuid", "permissionLevel", "joinTime"]),
        FieldFilters::hiding(["isFlying", "isSprinting", "isOnFire", "isOnGround"]),
    ]
}

#[test]
fn test_both_formats_show_the_same_rows() {
    let record: PlayerRecord = load_fixture("player_full.json");

    for filters in filter_sets() {
        let text = TextFormatter::new(filters.clone(), "")
            .format_player(Some(&record), "Steve")
            .unwrap();
        let markup = MarkupFormatter::new(&Theme::default(), filters.clone(), "")
            .format_player(Some(&record), "Steve")
            .unwrap();
        let report = player_report(&record, &filters).unwrap();

        for section in &report.sections {
            assert!(text.contains(&format!("【{}】", section.title)));
            assert!(markup.contains(section.title));
            for row in &section.rows {
                assert!(text.contains(&format!("{}: {}", row.label, row.value)));
                assert!(markup.contains(&escape_markup(&row.value)), "{}", row.value);
            }
            for flag in &section.flags {
                assert!(text.contains(&flag.display()));
                assert!(markup.contains(&format!("[{}]", flag.display())));
            }
        }
    }
}

#[test]
fn test_disabled_health_is_absent_from_both() {
    let record: PlayerRecord = load_fixture("player_full.json");
    let filters = FieldFilters::hiding(["health", "maxHealth"]);

    let text = TextFormatter::new(filters.clone(), "")
        .format_player(Some(&record), "Steve")
        .unwrap();
    let markup = MarkupFormatter::new(&Theme::default(), filters, "")
        .format_player(Some(&record), "Steve")
        .unwrap();

    for out in [&text, &markup] {
        assert!(!out.contains("生命值"));
        assert!(out.contains("🦅 飞行"));
    }
}
