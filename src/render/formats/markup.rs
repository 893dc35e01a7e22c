//! Typst markup formatter for image output
//!
//! Documents are rendered from embedded Tera templates. `base.typ` owns the page
//! setup and footer, so the report and the not-found variant always share theme,
//! fonts and attribution. Every string reaching a template is escaped here first;
//! the templates themselves never see raw upstream text.

use super::ReportFormatter;
use crate::render::error::FormatResult;
use crate::render::escape::escape_markup;
use crate::render::filter::FieldFilters;
use crate::render::theme::{ResolvedTheme, Theme};
use crate::render::view::{Report, Section};
use chrono::{DateTime, Local, TimeZone};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tera::{Context, Tera};

/// Page width in points; height grows with content
pub const PAGE_WIDTH_PT: u32 = 640;

/// Most flag cells placed on one grid row
const MAX_FLAG_COLUMNS: usize = 4;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TEMPLATES: OnceCell<Tera> = OnceCell::new();

fn templates() -> Result<&'static Tera, tera::Error> {
    TEMPLATES.get_or_try_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.typ", include_str!("../templates/base.typ")),
            ("report.typ", include_str!("../templates/report.typ")),
            ("not_found.typ", include_str!("../templates/not_found.typ")),
        ])?;
        tera.autoescape_on(vec![]);
        log::debug!("Compiled markup templates");
        Ok(tera)
    })
}

/// Attribution shown in every document footer
pub fn attribution() -> String {
    format!("Generated by bdsquery v{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Serialize)]
struct RowView {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct PanelView {
    icon: &'static str,
    title: String,
    rows: Vec<RowView>,
    flags: Vec<String>,
    flag_columns: usize,
}

impl From<&Section> for PanelView {
    fn from(section: &Section) -> Self {
        Self {
            icon: section.icon,
            title: escape_markup(section.title),
            rows: section
                .rows
                .iter()
                .map(|row| RowView {
                    label: escape_markup(&row.label),
                    value: escape_markup(&row.value),
                })
                .collect(),
            flags: section
                .flags
                .iter()
                .map(|f| escape_markup(&f.display()))
                .collect(),
            flag_columns: section.flags.len().clamp(1, MAX_FLAG_COLUMNS),
        }
    }
}

/// Markup formatter producing a standalone Typst document per report
#[derive(Debug, Clone)]
pub struct MarkupFormatter {
    filters: FieldFilters,
    decoration: String,
    theme: ResolvedTheme,
    generated_at: String,
}

impl MarkupFormatter {
    /// The generation timestamp is taken once here, so every document from this
    /// formatter carries the same footer.
    pub fn new(theme: &Theme, filters: FieldFilters, decoration: impl Into<String>) -> Self {
        Self {
            filters,
            decoration: decoration.into(),
            theme: theme.resolve(),
            generated_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn with_timestamp<Tz>(mut self, at: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.generated_at = at.format(TIMESTAMP_FORMAT).to_string();
        self
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("theme", &self.theme);
        context.insert("page_width", &PAGE_WIDTH_PT);
        context.insert("generated_at", &escape_markup(&self.generated_at));
        context.insert("attribution", &escape_markup(&attribution()));
        context
    }
}

impl ReportFormatter for MarkupFormatter {
    fn format_report(&self, report: &Report) -> FormatResult {
        let flags: Vec<&str> = report.flags().map(|f| f.glyph).collect();
        let panels: Vec<PanelView> = report.sections.iter().map(PanelView::from).collect();

        let mut context = self.base_context();
        context.insert("header", &escape_markup(&report.header(&self.decoration)));
        context.insert("flags", &escape_markup(&flags.join(" ")));
        context.insert("panels", &panels);

        Ok(templates()?.render("report.typ", &context)?)
    }

    fn format_not_found(&self, query: &str) -> FormatResult {
        let title = match self.decoration.trim() {
            "" => "未找到玩家".to_string(),
            decoration => format!("{} 未找到玩家", decoration),
        };

        let mut context = self.base_context();
        context.insert("title", &escape_markup(&title));
        context.insert(
            "message",
            &escape_markup(&format!("没有找到名为「{}」的在线玩家。", query)),
        );

        Ok(templates()?.render("not_found.typ", &context)?)
    }

    fn filters(&self) -> &FieldFilters {
        &self.filters
    }
}
