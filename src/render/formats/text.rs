//! Plain text formatter for chat output

use super::ReportFormatter;
use crate::render::error::FormatResult;
use crate::render::filter::FieldFilters;
use crate::render::view::{Report, Section};

/// Separator between flags on a single line
const FLAG_SEPARATOR: &str = " | ";

/// Text formatter producing one line per fact, grouped by section
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    filters: FieldFilters,
    decoration: String,
}

impl TextFormatter {
    pub fn new(filters: FieldFilters, decoration: impl Into<String>) -> Self {
        Self {
            filters,
            decoration: decoration.into(),
        }
    }

    fn format_section(&self, section: &Section, out: &mut Vec<String>) {
        out.push(String::new());
        out.push(format!("【{}】", section.title));
        for row in &section.rows {
            out.push(format!("{}: {}", row.label, row.value));
        }
        if !section.flags.is_empty() {
            let flags: Vec<String> = section.flags.iter().map(|f| f.display()).collect();
            out.push(format!("{}: {}", section.flag_label, flags.join(FLAG_SEPARATOR)));
        }
    }
}

impl ReportFormatter for TextFormatter {
    fn format_report(&self, report: &Report) -> FormatResult {
        let mut lines = vec![report.header(&self.decoration)];
        for section in &report.sections {
            self.format_section(section, &mut lines);
        }
        Ok(lines.join("\n").trim_end().to_string())
    }

    fn format_not_found(&self, query: &str) -> FormatResult {
        let message = format!("❌ 未找到玩家「{}」", query);
        Ok(match self.decoration.trim() {
            "" => message,
            decoration => format!("{} {}", decoration, message),
        })
    }

    fn filters(&self) -> &FieldFilters {
        &self.filters
    }
}
