//! Query command pipeline
//!
//! One fetch, then one delivery per resolved output mode. A failing mode is
//! replaced by a failure note; the other modes of the same query still run.

use crate::api::types::{PlayerList, PlayerRecord, ServerStatus};
use crate::api::{BdsClient, FetchResult};
use crate::app::cli::args::QueryCommand;
use crate::app::cli::config::AppConfig;
use crate::render::rasterizer::clamp_scale;
use crate::render::view::ReportKind;
use crate::render::{
    resolve_modes, FormatResult, MarkupFormatter, OutputMode, Rasterizer, RenderError,
    ReportFormatter, SharedTypst, TextFormatter,
};
use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;

const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// A fetched record, ready for any formatter
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Player {
        query: String,
        record: Option<PlayerRecord>,
    },
    Server(ServerStatus),
    PlayerList(PlayerList),
}

impl Fetched {
    pub fn kind(&self) -> ReportKind {
        match self {
            Fetched::Player { .. } => ReportKind::Player,
            Fetched::Server(_) => ReportKind::Server,
            Fetched::PlayerList(_) => ReportKind::PlayerList,
        }
    }

    /// Label used in image file names
    pub fn file_label(&self) -> String {
        match self {
            Fetched::Player { query, .. } => sanitize_file_label(query),
            Fetched::Server(_) => "status".to_string(),
            Fetched::PlayerList(_) => "list".to_string(),
        }
    }

    pub fn format_with(&self, formatter: &dyn ReportFormatter) -> FormatResult {
        match self {
            Fetched::Player { query, record } => formatter.format_player(record.as_ref(), query),
            Fetched::Server(status) => formatter.format_server(status),
            Fetched::PlayerList(list) => formatter.format_player_list(list),
        }
    }
}

/// Result of one output mode
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Text(String),
    Image(PathBuf),
    Failed { mode: OutputMode, reason: String },
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Text(text) => f.write_str(text),
            Delivery::Image(path) => write!(f, "🖼️ {}", path.display()),
            Delivery::Failed {
                mode: OutputMode::Image,
                reason,
            } => write!(f, "[图片渲染失败: {}]", reason),
            Delivery::Failed {
                mode: OutputMode::Text,
                reason,
            } => write!(f, "[文本渲染失败: {}]", reason),
        }
    }
}

/// Fetch the record a command asks for
pub async fn fetch(client: &BdsClient, command: &QueryCommand) -> FetchResult<Fetched> {
    Ok(match command {
        QueryCommand::Player { name, .. } => Fetched::Player {
            query: name.clone(),
            record: client.fetch_player(name).await?,
        },
        QueryCommand::Status { .. } => Fetched::Server(client.fetch_status().await?),
        QueryCommand::Players { .. } => Fetched::PlayerList(client.fetch_player_list().await?),
    })
}

/// Run a command end to end; only the fetch can fail the whole query
pub async fn run_query(command: &QueryCommand, config: &AppConfig) -> FetchResult<Vec<Delivery>> {
    let client = BdsClient::new(config.api_settings())?;
    let fetched = fetch(&client, command).await?;

    let modes = resolve_modes(command.mode_override(), &config.output_modes);
    if modes.is_empty() {
        log::warn!("No output modes configured, nothing to deliver");
    }

    let rasterizer = SharedTypst::new(config.typst_bin.clone());
    Ok(render_outputs(&fetched, &modes, config, &rasterizer, Local::now()).await)
}

/// Produce one delivery per mode, in mode order
pub async fn render_outputs(
    fetched: &Fetched,
    modes: &[OutputMode],
    config: &AppConfig,
    rasterizer: &dyn Rasterizer,
    now: DateTime<Local>,
) -> Vec<Delivery> {
    let mut deliveries = Vec::with_capacity(modes.len());
    for mode in modes {
        let delivery = match mode {
            OutputMode::Text => {
                let formatter = TextFormatter::new(config.fields.clone(), config.decoration.clone());
                fetched.format_with(&formatter).map(Delivery::Text)
            }
            OutputMode::Image => render_image(fetched, config, rasterizer, now)
                .await
                .map(Delivery::Image),
        };

        deliveries.push(delivery.unwrap_or_else(|e| {
            log::warn!("{} output failed: {}", mode, e);
            log::debug!("DEBUG_DETAILS: {:?}", e);
            Delivery::Failed {
                mode: *mode,
                reason: e.to_string(),
            }
        }));
    }
    deliveries
}

async fn render_image(
    fetched: &Fetched,
    config: &AppConfig,
    rasterizer: &dyn Rasterizer,
    now: DateTime<Local>,
) -> Result<PathBuf, RenderError> {
    let formatter = MarkupFormatter::new(
        &config.theme,
        config.fields.clone(),
        config.decoration.clone(),
    )
    .with_timestamp(now);
    let markup = fetched.format_with(&formatter)?;
    let png = rasterizer
        .rasterize(&markup, clamp_scale(config.render_scale))
        .await?;

    let path = config.output_dir.join(image_file_name(fetched, now));
    tokio::fs::create_dir_all(&config.output_dir).await?;
    tokio::fs::write(&path, &png).await?;
    log::info!("Wrote {} ({} bytes)", path.display(), png.len());
    Ok(path)
}

/// `<kind>-<label>-<YYYYmmdd-HHMMSS>.png`
pub fn image_file_name(fetched: &Fetched, now: DateTime<Local>) -> String {
    format!(
        "{}-{}-{}.png",
        fetched.kind().slug(),
        fetched.file_label(),
        now.format(FILE_TIMESTAMP_FORMAT)
    )
}

fn sanitize_file_label(raw: &str) -> String {
    let label: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if label.is_empty() {
        "unknown".to_string()
    } else {
        label
    }
}
