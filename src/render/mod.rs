//! Report rendering
//!
//! Records are projected through the field filters into a `Report`
//! (`view`), then turned into plain text or Typst markup (`formats`). Markup is
//! rasterized to PNG by an external engine behind the `Rasterizer` trait.

pub mod error;
pub mod escape;
pub mod filter;
pub mod formats;
pub mod labels;
pub mod mode;
pub mod rasterizer;
pub mod theme;
pub mod view;

pub use error::{FormatResult, RenderError};
pub use filter::{FieldFilters, FieldToggle};
pub use formats::markup::MarkupFormatter;
pub use formats::text::TextFormatter;
pub use formats::ReportFormatter;
pub use mode::{resolve_modes, OutputMode};
pub use rasterizer::{Rasterizer, SharedTypst};
pub use theme::Theme;
