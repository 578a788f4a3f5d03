//! Pane and widget styling.
//!
//! Every style goes through [`Palette`] so `NO_COLOR` turns all of them into
//! plain text attributes.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on, for tests.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Styles used across the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: bool,
}

impl Palette {
    /// Palette honoring `config`.
    pub fn new(config: ColorConfig) -> Self {
        Self {
            colors: config.colors_enabled(),
        }
    }

    fn fg(&self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    /// Border of a pane, brighter when focused.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            self.fg(Color::DarkGray)
        }
    }

    /// Results header cells.
    pub fn header(&self) -> Style {
        self.fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Header cell targeted by the keyboard capture key.
    pub fn selected_header(&self) -> Style {
        self.header().add_modifier(Modifier::REVERSED)
    }

    /// Header cell being held.
    pub fn held_header(&self) -> Style {
        self.fg(Color::Green)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Highlighted list row or form field.
    pub fn selection(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// Placeholders, hints and disabled controls.
    pub fn muted(&self) -> Style {
        self.fg(Color::DarkGray)
    }

    /// Delete cells and error messages.
    pub fn error(&self) -> Style {
        self.fg(Color::Red)
    }

    /// Confirmation messages.
    pub fn info(&self) -> Style {
        self.fg(Color::Green)
    }

    /// Keys in the help overlay.
    pub fn key(&self) -> Style {
        self.fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Section headers in the help overlay.
    pub fn section(&self) -> Style {
        self.fg(Color::Magenta).add_modifier(Modifier::BOLD)
    }

    /// Cursor cell in text inputs.
    pub fn cursor(&self) -> Style {
        if self.colors {
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorConfig::from_env_and_args(false))
    }
}
