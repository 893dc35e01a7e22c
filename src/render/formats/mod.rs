//! Output formatters
//!
//! Each formatter turns a projected `Report` into one output representation. The
//! record-level entry points live on the trait so both formats share the same
//! not-found handling and filter application.

pub mod markup;
pub mod text;

use crate::api::types::{PlayerList, PlayerRecord, ServerStatus};
use crate::render::error::FormatResult;
use crate::render::filter::FieldFilters;
use crate::render::view::{self, Report};

pub trait ReportFormatter: Send + Sync {
    /// Render a report that has at least a title
    fn format_report(&self, report: &Report) -> FormatResult;

    /// Render the "no such player" response for `query`
    fn format_not_found(&self, query: &str) -> FormatResult;

    /// Filter set applied to every record
    fn filters(&self) -> &FieldFilters;

    /// Render a player lookup; an absent or nameless record yields the not-found variant
    fn format_player(&self, record: Option<&PlayerRecord>, query: &str) -> FormatResult {
        match record.and_then(|r| view::player_report(r, self.filters())) {
            Some(report) => self.format_report(&report),
            None => self.format_not_found(query),
        }
    }

    fn format_server(&self, status: &ServerStatus) -> FormatResult {
        self.format_report(&view::server_report(status, self.filters()))
    }

    fn format_player_list(&self, list: &PlayerList) -> FormatResult {
        self.format_report(&view::player_list_report(list, self.filters()))
    }
}
