//! Field visibility filtering
//!
//! Every displayable field is addressed by a dotted path (`health`, `pos.dimId`,
//! `device.ip`). Configuration supplies an ordered list of toggles; a path with no
//! toggle is visible.

use serde::{Deserialize, Serialize};

/// One configured toggle for a field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldToggle {
    pub path: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl FieldToggle {
    pub fn new(path: impl Into<String>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
        }
    }
}

/// Ordered set of field toggles, immutable for the duration of a render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldFilters {
    toggles: Vec<FieldToggle>,
}

impl FieldFilters {
    pub fn new(toggles: Vec<FieldToggle>) -> Self {
        Self { toggles }
    }

    /// Build a filter set that hides each of the given paths
    pub fn hiding<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            paths
                .into_iter()
                .map(|p| FieldToggle::new(p, false))
                .collect(),
        )
    }

    /// Whether `path` should appear in output.
    ///
    /// Exact match only, first match wins, unknown paths are visible.
    pub fn is_enabled(&self, path: &str) -> bool {
        self.toggles
            .iter()
            .find(|t| t.path == path)
            .map_or(true, |t| t.enabled)
    }

    /// True when every path in `paths` is enabled
    pub fn all_enabled(&self, paths: &[&str]) -> bool {
        paths.iter().all(|p| self.is_enabled(p))
    }

}
