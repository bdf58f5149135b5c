//! Color configuration and widget styles.

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
    /// `--no-color` wins, then any `NO_COLOR` value; colors are on otherwise.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors forced on or off.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Styles for every part of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Header bar.
    pub header: Style,
    /// Indicator while below the threshold.
    pub pulling: Style,
    /// Indicator once releasing would refresh.
    pub armed: Style,
    /// Indicator while a refresh is in flight.
    pub refreshing: Style,
    /// Selected card or row.
    pub selected: Style,
    /// Secondary text.
    pub muted: Style,
    /// Sidebar border and entries.
    pub sidebar: Style,
    /// Floating action button.
    pub fab: Style,
    /// Failed refresh in the status bar.
    pub error: Style,
}

impl Palette {
    /// Palette honoring the color configuration.
    ///
    /// With colors disabled, only modifiers distinguish states.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                header: Style::default().fg(Color::Black).bg(Color::Cyan),
                pulling: Style::default().fg(Color::Gray),
                armed: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                refreshing: Style::default().fg(Color::Yellow),
                selected: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                sidebar: Style::default().fg(Color::Blue),
                fab: Style::default().fg(Color::Black).bg(Color::Magenta),
                error: Style::default().fg(Color::Red),
            }
        } else {
            let bold = Style::default().add_modifier(Modifier::BOLD);
            Self {
                header: Style::default().add_modifier(Modifier::REVERSED),
                pulling: Style::default(),
                armed: bold,
                refreshing: bold,
                selected: Style::default().add_modifier(Modifier::REVERSED),
                muted: Style::default(),
                sidebar: Style::default(),
                fab: Style::default().add_modifier(Modifier::REVERSED),
                error: bold,
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
