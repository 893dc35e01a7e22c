//! Color and font theme for markup output.
//!
//! Colors are accepted as hex (`#1e1e2e`, `#fff`, `1e1e2e`) or `rgb(r, g, b)` and
//! normalized to a Typst color expression. Anything else falls back to the default
//! value of the same slot.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex regex"));

static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("valid rgb regex")
});

pub const DEFAULT_BACKGROUND: &str = "#1e1e2e";
pub const DEFAULT_PANEL: &str = "#313244";
pub const DEFAULT_BORDER: &str = "#45475a";
pub const DEFAULT_TEXT: &str = "#cdd6f4";
pub const DEFAULT_ACCENT: &str = "#89b4fa";
pub const DEFAULT_MUTED: &str = "#a6adc8";
pub const DEFAULT_FONT: &str = "Noto Sans CJK SC";

/// Theme as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Theme {
    pub background: String,
    pub panel: String,
    pub border: String,
    pub text: String,
    pub accent: String,
    pub muted: String,
    pub font: String,
    pub fallback_fonts: Vec<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            panel: DEFAULT_PANEL.to_string(),
            border: DEFAULT_BORDER.to_string(),
            text: DEFAULT_TEXT.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
            muted: DEFAULT_MUTED.to_string(),
            font: DEFAULT_FONT.to_string(),
            fallback_fonts: vec![
                "Microsoft YaHei".to_string(),
                "PingFang SC".to_string(),
                "Noto Color Emoji".to_string(),
            ],
        }
    }
}

/// Theme with every value converted to Typst syntax, ready for the templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTheme {
    pub background: String,
    pub panel: String,
    pub border: String,
    pub text: String,
    pub accent: String,
    pub muted: String,
    /// Parenthesised array of font family strings
    pub fonts: String,
}

impl Theme {
    pub fn resolve(&self) -> ResolvedTheme {
        ResolvedTheme {
            background: normalize_color(&self.background, DEFAULT_BACKGROUND),
            panel: normalize_color(&self.panel, DEFAULT_PANEL),
            border: normalize_color(&self.border, DEFAULT_BORDER),
            text: normalize_color(&self.text, DEFAULT_TEXT),
            accent: normalize_color(&self.accent, DEFAULT_ACCENT),
            muted: normalize_color(&self.muted, DEFAULT_MUTED),
            fonts: font_chain(&self.font, &self.fallback_fonts),
        }
    }
}

/// Convert `input` into a Typst color expression, or `fallback` when unparseable.
///
/// `fallback` must itself be a valid hex color.
pub fn normalize_color(input: &str, fallback: &str) -> String {
    let trimmed = input.trim();
    if let Some(caps) = HEX_COLOR.captures(trimmed) {
        let digits = &caps[1];
        let full = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            digits.to_string()
        };
        return format!("rgb(\"#{}\")", full.to_lowercase());
    }
    if let Some(caps) = RGB_COLOR.captures(trimmed) {
        let channels: Vec<u8> = (1..=3)
            .filter_map(|i| caps[i].parse::<u16>().ok())
            .filter(|v| *v <= 255)
            .map(|v| v as u8)
            .collect();
        if let &[r, g, b] = channels.as_slice() {
            return format!("rgb({}, {}, {})", r, g, b);
        }
    }
    log::debug!("Unrecognised theme color '{}', using {}", input, fallback);
    normalize_color(fallback, DEFAULT_TEXT)
}

/// Quote a value as a Typst string literal
pub fn typst_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' | '\t' => out.push(' '),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn font_chain(primary: &str, fallbacks: &[String]) -> String {
    let families: Vec<String> = std::iter::once(primary)
        .chain(fallbacks.iter().map(String::as_str))
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(typst_string)
        .collect();

    match families.len() {
        0 => format!("({},)", typst_string(DEFAULT_FONT)),
        // a one-element Typst array needs the trailing comma
        1 => format!("({},)", families[0]),
        _ => format!("({})", families.join(", ")),
    }
}
