//! Record shapes returned by the status API.
//!
//! The API owns these shapes; every field is optional and unknown fields are
//! ignored so that newer server builds keep deserializing.

use serde::{Deserialize, Serialize};

/// Player state returned by `GET /player`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: Option<String>,
    pub xuid: Option<String>,
    pub uuid: Option<String>,
    pub permission_level: Option<i64>,
    pub join_time: Option<String>,

    pub game_mode: Option<i64>,
    pub health: Option<f64>,
    pub max_health: Option<f64>,
    pub hunger: Option<f64>,
    pub speed: Option<f64>,
    pub is_flying: bool,
    pub is_sneaking: bool,
    pub is_sprinting: bool,
    pub is_swimming: bool,
    pub is_sleeping: bool,
    pub is_gliding: bool,

    pub level: Option<i64>,
    pub total_xp: Option<i64>,
    pub xp_progress: Option<f64>,

    pub pos: Option<Position>,
    pub biome: Option<Biome>,
    pub is_in_water: bool,
    pub is_in_lava: bool,
    pub is_on_fire: bool,
    pub is_on_ground: bool,
    pub is_in_rain: bool,

    pub device: Option<DeviceInfo>,

    pub main_hand: Option<ItemStack>,
    pub off_hand: Option<ItemStack>,
    pub armor: Vec<ItemStack>,
    pub tags: Vec<String>,
}

impl PlayerRecord {
    /// Display name, if the record identifies a player at all
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub dim_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Biome {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceInfo {
    pub ip: Option<String>,
    pub os: Option<String>,
    pub input_mode: Option<i64>,
    pub last_ping: Option<i64>,
    pub avg_ping: Option<i64>,
    /// Fraction in `0.0..=1.0`
    pub last_packet_loss: Option<f64>,
    /// Fraction in `0.0..=1.0`
    pub avg_packet_loss: Option<f64>,
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemStack {
    pub type_id: Option<String>,
    pub name: Option<String>,
    pub count: Option<u32>,
}

impl ItemStack {
    /// `name ×count`, preferring the display name over the type id.
    /// `None` for empty slots.
    pub fn describe(&self) -> Option<String> {
        let label = self
            .name
            .as_deref()
            .or(self.type_id.as_deref())
            .filter(|s| !s.is_empty() && *s != "minecraft:air")?;
        Some(match self.count {
            Some(count) if count > 1 => format!("{} ×{}", label, count),
            _ => label.to_string(),
        })
    }
}

/// Server state returned by `GET /status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerStatus {
    pub name: Option<String>,
    pub motd: Option<String>,
    pub version: Option<String>,
    pub protocol: Option<i64>,
    pub level_name: Option<String>,
    pub online: Option<u32>,
    pub max_players: Option<u32>,
    pub tps: Option<f64>,
    pub mspt: Option<f64>,
    /// Seconds since server start
    pub uptime: Option<u64>,
    pub game_mode: Option<i64>,
    pub difficulty: Option<String>,
    pub allow_cheats: bool,
    pub online_mode: bool,
}

impl ServerStatus {
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.motd.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}

/// Online players returned by `GET /players`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerList {
    pub online: Option<u32>,
    pub max: Option<u32>,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerSummary {
    pub name: Option<String>,
    pub xuid: Option<String>,
    pub ping: Option<i64>,
}
