//! Theme management and ANSI escape sequence generation.
//!
//! Two built-in themes, `movieflix-dark` (default) and `movieflix-light`, plus
//! custom themes loaded from TOML files. The active theme can be toggled at runtime
//! and is never persisted.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//! mode = "light"
//!
//! [colors]
//! header_fg = "#1f2937"
//! text_normal = "#111827"
//! text_dim = "#6b7280"
//! accent = "#dc2626"
//! highlight_fg = "#b91c1c"
//! success_fg = "#15803d"
//! error_fg = "#b91c1c"
//! border = "#d1d5db"
//! ```
//!
//! # Example
//!
//! ```rust
//! use movieflix::ui::Theme;
//!
//! let theme = Theme::from_name("movieflix-light").unwrap();
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert_eq!(theme.toggled().name, "movieflix-dark");
//! ```

use crate::domain::error::{MovieflixError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DARK_THEME: &str = "movieflix-dark";
pub const LIGHT_THEME: &str = "movieflix-light";

/// Light or dark base, used to pick the opposite built-in when toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

/// Hex colors (e.g. `"#e5e7eb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    pub text_normal: String,
    /// Secondary text (footer, metadata).
    pub text_dim: String,
    /// Active sort buttons, selected genres, brand.
    pub accent: String,
    /// Query match highlighting in titles.
    pub highlight_fg: String,
    pub success_fg: String,
    pub error_fg: String,
    pub border: String,
}

impl Theme {
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: DARK_THEME.to_string(),
            mode: ThemeMode::Dark,
            colors: ThemeColors {
                header_fg: "#f9fafb".to_string(),
                text_normal: "#e5e7eb".to_string(),
                text_dim: "#9ca3af".to_string(),
                accent: "#ef4444".to_string(),
                highlight_fg: "#fbbf24".to_string(),
                success_fg: "#4ade80".to_string(),
                error_fg: "#f87171".to_string(),
                border: "#374151".to_string(),
            },
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            name: LIGHT_THEME.to_string(),
            mode: ThemeMode::Light,
            colors: ThemeColors {
                header_fg: "#111827".to_string(),
                text_normal: "#1f2937".to_string(),
                text_dim: "#6b7280".to_string(),
                accent: "#dc2626".to_string(),
                highlight_fg: "#b45309".to_string(),
                success_fg: "#15803d".to_string(),
                error_fg: "#b91c1c".to_string(),
                border: "#d1d5db".to_string(),
            },
        }
    }

    /// Loads a built-in theme by name. `dark` and `light` are accepted as aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            DARK_THEME | "dark" => Some(Self::dark()),
            LIGHT_THEME | "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MovieflixError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| MovieflixError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| MovieflixError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// The built-in theme of the opposite mode.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self.mode {
            ThemeMode::Dark => Self::light(),
            ThemeMode::Light => Self::dark(),
        }
    }

    /// Returns `(255, 255, 255)` on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
