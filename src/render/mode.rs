//! Output mode selection

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// How a query result is delivered
#[derive(EnumIter, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Plain text report
    Text,
    /// Typst markup rasterized to PNG
    Image,
}

impl OutputMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }

    /// Exact, case-sensitive match against the mode literals
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|mode| mode.name() == name)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::iter().map(|mode| mode.name())
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the modes for one request.
///
/// A recognised override replaces the configured set; an absent or unknown override
/// yields `defaults` verbatim, even when that set is empty.
pub fn resolve_modes(override_arg: Option<&str>, defaults: &[OutputMode]) -> Vec<OutputMode> {
    match override_arg.and_then(OutputMode::from_name) {
        Some(mode) => vec![mode],
        None => {
            if let Some(raw) = override_arg {
                log::debug!(
                    "Ignoring unrecognised output mode '{}', using defaults {:?}",
                    raw,
                    defaults
                );
            }
            defaults.to_vec()
        }
    }
}
