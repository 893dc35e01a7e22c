//! Projection of API records into themed report sections.
//!
//! Both output formats render from the same `Report`, so a field hidden by the
//! filter set disappears from the text and the image alike. A line is kept only when
//! every field it reads is enabled and present; a nested object that is missing or
//! whose parent path is disabled skips its lines silently.

use crate::api::types::{PlayerList, PlayerRecord, ServerStatus};
use crate::render::filter::FieldFilters;
use crate::render::labels::{dimension_label, game_mode_label, input_mode_label, permission_label};
use serde::Serialize;

/// Placeholder for optional numbers that the upstream did not report
pub const MISSING_VALUE: &str = "N/A";

/// Boolean status shown only while true
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub glyph: &'static str,
    pub label: &'static str,
}

impl Flag {
    const fn new(glyph: &'static str, label: &'static str) -> Self {
        Self { glyph, label }
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.glyph, self.label)
    }
}

/// One key/value fact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
}

/// A themed group of rows plus a compact flag summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub icon: &'static str,
    pub title: &'static str,
    /// Label used when flags are listed on one text line
    pub flag_label: &'static str,
    pub rows: Vec<Row>,
    pub flags: Vec<Flag>,
}

impl Section {
    fn new(icon: &'static str, title: &'static str) -> Self {
        Self {
            icon,
            title,
            flag_label: "状态",
            rows: Vec::new(),
            flags: Vec::new(),
        }
    }

    fn with_flag_label(mut self, label: &'static str) -> Self {
        self.flag_label = label;
        self
    }

    fn row(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(Row {
            label: label.into(),
            value: value.into(),
        });
    }

    /// Add a row when every path is enabled and the value exists
    fn row_if(
        &mut self,
        filters: &FieldFilters,
        paths: &[&str],
        label: &'static str,
        value: Option<String>,
    ) {
        if !filters.all_enabled(paths) {
            return;
        }
        if let Some(value) = value {
            self.row(label, value);
        }
    }

    fn flags_from(&mut self, filters: &FieldFilters, candidates: &[(&str, bool, Flag)]) {
        self.flags.extend(
            candidates
                .iter()
                .filter(|(path, active, _)| *active && filters.is_enabled(path))
                .map(|(_, _, flag)| *flag),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.flags.is_empty()
    }
}

/// What a report describes; drives the header wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportKind {
    Player,
    Server,
    PlayerList,
}

impl ReportKind {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Player => "玩家",
            Self::Server => "服务器",
            Self::PlayerList => "在线玩家",
        }
    }

    /// Short identifier used in file names
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Server => "server",
            Self::PlayerList => "players",
        }
    }
}

/// A record projected through the filter set, with empty sections already dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub sections: Vec<Section>,
}

impl Report {
    fn new(kind: ReportKind, title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            kind,
            title: title.into(),
            sections: sections.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    /// Every active flag across sections, in section order
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.sections.iter().flat_map(|s| s.flags.iter())
    }

    /// `<decoration> <kind> <title>`, skipping empty parts
    pub fn header(&self, decoration: &str) -> String {
        [decoration.trim(), self.kind.heading(), self.title.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Two decimal places, the precision used for every fractional quantity
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Fraction (`0.25`) as a percentage (`25.00%`)
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Whole numbers print without a fractional part (`18`), others keep theirs (`18.5`)
pub fn number(value: f64) -> String {
    format!("{}", value)
}

/// `3d 4h 5m`-style uptime in Chinese units
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    match (days, hours) {
        (0, 0) => format!("{}分钟", minutes),
        (0, _) => format!("{}小时 {}分钟", hours, minutes),
        _ => format!("{}天 {}小时 {}分钟", days, hours, minutes),
    }
}

/// Project a player record. `None` when the record names no player.
pub fn player_report(record: &PlayerRecord, filters: &FieldFilters) -> Option<Report> {
    let name = record.display_name()?;

    let sections = vec![
        player_basic(record, filters),
        player_status(record, filters),
        player_experience(record, filters),
        player_position(record, filters),
        player_environment(record, filters),
        player_device(record, filters),
        player_items(record, filters),
    ];

    Some(Report::new(ReportKind::Player, name, sections))
}

fn player_basic(record: &PlayerRecord, filters: &FieldFilters) -> Section {
    let mut section = Section::new("📋", "基础信息");
    section.row_if(filters, &["xuid"], "XUID", record.xuid.clone());
    section.row_if(filters, &["uuid"], "UUID", record.uuid.clone());
    section.row_if(
        filters,
        &["permissionLevel"],
        "权限",
        record.permission_level.map(permission_label),
    );
    section.row_if(filters, &["joinTime"], "上线时间", record.join_time.clone());
    section
}

fn player_status(record: &PlayerRecord, filters: &FieldFilters) -> Section {
    let mut section = Section::new("🎮", "游戏状态");
    section.row_if(
        filters,
        &["gameMode"],
        "游戏模式",
        record.game_mode.map(game_mode_label),
    );
    section.row_if(
        filters,
        &["health", "maxHealth"],
        "生命值",
        record
            .health
            .zip(record.max_health)
            .map(|(hp, max)| format!("{}/{} ❤️", number(hp), number(max))),
    );
    section.row_if(
        filters,
        &["hunger"],
        "饥饿值",
        record.hunger.map(|h| format!("{}/20 🍗", number(h))),
    );
    section.row_if(
        filters,
        &["speed"],
        "速度",
        Some(record.speed.map_or_else(|| MISSING_VALUE.to_string(), fixed2)),
    );
    section.flags_from(
        filters,
        &[
            ("isFlying", record.is_flying, Flag::new("🦅", "飞行")),
            ("isSneaking", record.is_sneaking, Flag::new("🐾", "潜行")),
            ("isSprinting", record.is_sprinting, Flag::new("🏃", "疾跑")),
            ("isSwimming", record.is_swimming, Flag::new("🏊", "游泳")),
            ("isSleeping", record.is_sleeping, Flag::new("💤", "睡觉")),
            ("isGliding", record.is_gliding, Flag::new("🪂", "滑翔")),
        ],
    );
    section
}

fn player_experience(record: &PlayerRecord, filters: &FieldFilters) -> Section {
    let mut section = Section::new("✨", "经验");
    section.row_if(filters, &["level"], "等级", record.level.map(|l| l.to_string()));
    section.row_if(
        filters,
        &["totalXp"],
        "总经验",
        record.total_xp.map(|xp| xp.to_string()),
    );
    section.row_if(
        filters,
        &["xpProgress"],
        "升级进度",
        record.xp_progress.map(percent),
    );
    section
}

fn player_position(record: &PlayerRecord, filters: &FieldFilters) -> Section {
    let mut section = Section::new("📍", "位置");
    let Some(pos) = record.pos.as_ref().filter(|_| filters.is_enabled("pos")) else {
        return section;
    };
    section.row_if(
        filters,
        &["pos.x", "pos.y", "pos.z"],
        "坐标",
        pos.x.zip(pos.y).zip(pos.z).map(|((x, y), z)| {
            format!("X: {}, Y: {}, Z: {}", fixed2(x), fixed2(y), fixed2(z))
        }),
    );
    section.row_if(filters, &["pos.dimId"], "维度", pos.dim_id.map(dimension_label));
    section
}

fn player_environment(record: &PlayerRecord, filters: &FieldFilters) -> Section {
    let mut section = Section::new("🌿", "环境").with_flag_label("环境");
    if let Some(biome) = record.biome.as_ref().filter(|_| filters.is_enabled("biome")) {
        section.row_if(filters, &["biome.name"], "生物群系", biome.name.clone());
        section.row_if(
            filters,
            &["biome.id"],
            "群系 ID",
            biome.id.map(|id| id.to_string()),
        );
    }
    section.flags_from(
        filters,
        &[
            ("isInWater", record.is_in_water, Flag::new("🌊", "水中")),
            ("isInLava", record.is_in_lava, Flag::new("🌋", "岩浆中")),
            ("isOnFire", record.is_on_fire, Flag::new("🔥", "着火")),
            ("isOnGround", record.is_on_ground, Flag::new("🧱", "着地")),
            ("isInRain", record.is_in_rain, Flag::new("🌧️", "淋雨")),
        ],
    );
    section
}

fn player_device(record: &PlayerRecord, filters: &FieldFilters) -> Section {
    let mut section = Section::new("📱", "设备");
    let Some(device) = record
        .device
        .as_ref()
        .filter(|_| filters.is_enabled("device"))
    else {
        return section;
    };
    section.row_if(filters, &["device.ip"], "IP", device.ip.clone());
    section.row_if(filters, &["device.os"], "系统", device.os.clone());
    section.row_if(
        filters,
        &["device.inputMode"],
        "输入方式",
        device.input_mode.map(input_mode_label),
    );
    section.row_if(
        filters,
        &["device.lastPing"],
        "延迟",
        device.last_ping.map(|ms| format!("{} ms", ms)),
    );
    section.row_if(
        filters,
        &["device.avgPing"],
        "平均延迟",
        device.avg_ping.map(|ms| format!("{} ms", ms)),
    );
    section.row_if(
        filters,
        &["device.lastPacketLoss"],
        "丢包率",
        device.last_packet_loss.map(percent),
    );
    section.row_if(
        filters,
        &["device.avgPacketLoss"],
        "平均丢包率",
        device.avg_packet_loss.map(percent),
    );
    section.row_if(
        filters,
        &["device.clientId"],
        "客户端 ID",
        device.client_id.clone(),
    );
    section
}

fn player_items(record: &PlayerRecord, filters: &FieldFilters) -> Section {
    let mut section = Section::new("🎒", "物品");
    section.row_if(
        filters,
        &["mainHand"],
        "主手",
        record.main_hand.as_ref().and_then(|i| i.describe()),
    );
    section.row_if(
        filters,
        &["offHand"],
        "副手",
        record.off_hand.as_ref().and_then(|i| i.describe()),
    );
    let armor: Vec<String> = record.armor.iter().filter_map(|i| i.describe()).collect();
    section.row_if(
        filters,
        &["armor"],
        "盔甲",
        (!armor.is_empty()).then(|| armor.join("、")),
    );
    section.row_if(
        filters,
        &["tags"],
        "标签",
        (!record.tags.is_empty()).then(|| record.tags.join(", ")),
    );
    section
}

/// Project a server status record. The title falls back to a generic name.
pub fn server_report(status: &ServerStatus, filters: &FieldFilters) -> Report {
    let title = status.display_name().unwrap_or("Bedrock Dedicated Server");

    let mut info = Section::new("🖥️", "服务器");
    info.row_if(filters, &["server.name"], "名称", status.name.clone());
    info.row_if(filters, &["server.motd"], "MOTD", status.motd.clone());
    info.row_if(
        filters,
        &["server.version"],
        "版本",
        status.version.as_ref().map(|v| match status.protocol {
            Some(protocol) => format!("{} (协议 {})", v, protocol),
            None => v.clone(),
        }),
    );
    info.row_if(filters, &["server.levelName"], "存档", status.level_name.clone());

    let mut runtime = Section::new("📈", "运行状态");
    runtime.row_if(
        filters,
        &["server.online"],
        "在线人数",
        status.online.map(|online| match status.max_players {
            Some(max) => format!("{}/{}", online, max),
            None => online.to_string(),
        }),
    );
    runtime.row_if(filters, &["server.tps"], "TPS", status.tps.map(fixed2));
    runtime.row_if(
        filters,
        &["server.mspt"],
        "MSPT",
        status.mspt.map(|ms| format!("{} ms", fixed2(ms))),
    );
    runtime.row_if(
        filters,
        &["server.uptime"],
        "运行时长",
        status.uptime.map(format_uptime),
    );

    let mut rules = Section::new("📜", "规则").with_flag_label("选项");
    rules.row_if(
        filters,
        &["server.gameMode"],
        "默认模式",
        status.game_mode.map(game_mode_label),
    );
    rules.row_if(filters, &["server.difficulty"], "难度", status.difficulty.clone());
    rules.flags_from(
        filters,
        &[
            ("server.allowCheats", status.allow_cheats, Flag::new("🧪", "允许作弊")),
            ("server.onlineMode", status.online_mode, Flag::new("🔐", "正版验证")),
        ],
    );

    Report::new(ReportKind::Server, title, vec![info, runtime, rules])
}

/// Project the online player list; one row per named player
pub fn player_list_report(list: &PlayerList, filters: &FieldFilters) -> Report {
    let online = list.online.unwrap_or(list.players.len() as u32);
    let title = match list.max {
        Some(max) => format!("{}/{}", online, max),
        None => online.to_string(),
    };

    let mut players = Section::new("👥", "玩家列表");
    for player in &list.players {
        let Some(name) = player.name.as_deref().filter(|n| !n.trim().is_empty()) else {
            continue;
        };
        let mut details = Vec::new();
        if filters.is_enabled("players.xuid") {
            if let Some(xuid) = &player.xuid {
                details.push(format!("XUID {}", xuid));
            }
        }
        if filters.is_enabled("players.ping") {
            if let Some(ping) = player.ping {
                details.push(format!("{} ms", ping));
            }
        }
        let value = if details.is_empty() {
            "-".to_string()
        } else {
            details.join(" · ")
        };
        players.row(name, value);
    }

    Report::new(ReportKind::PlayerList, title, vec![players])
}
