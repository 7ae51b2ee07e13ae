//! Theme module for centralized color and style definitions
//!
//! Semantic colors for the console. Keeping them here keeps the controls, the session
//! state and the journal visually consistent.

use ratatui::style::{Color, Modifier, Style};

use crate::control::{SessionState, Source};

/// Application theme with all color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // === Session States ===
    /// No session open
    pub state_not_logging: Color,
    /// Session open and writing
    pub state_active: Color,
    /// Session open, writing suspended
    pub state_paused: Color,

    // === Controls ===
    /// Actionable control
    pub control_enabled: Color,
    /// Control that cannot be pressed
    pub control_disabled: Color,

    // === Journal Sources ===
    /// Side effects issued by start/stop
    pub source_start_stop: Color,
    /// Side effects issued by pause/resume
    pub source_pause_resume: Color,

    // === UI Elements ===
    /// Primary accent color (headers, titles)
    pub accent: Color,
    /// Text color for normal content
    pub text: Color,
    /// Text color for muted/secondary content
    pub text_muted: Color,
    /// Speed at or above the threshold
    pub speed_above: Color,
    /// Speed below the threshold
    pub speed_below: Color,

    // === Banners ===
    /// Status banner foreground
    pub warning_fg: Color,
    /// Status banner background
    pub warning_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            state_not_logging: Color::DarkGray,
            state_active: Color::Green,
            state_paused: Color::Yellow,

            control_enabled: Color::Cyan,
            control_disabled: Color::DarkGray,

            source_start_stop: Color::Blue,
            source_pause_resume: Color::Magenta,

            accent: Color::Cyan,
            text: Color::White,
            text_muted: Color::DarkGray,
            speed_above: Color::Green,
            speed_below: Color::Blue,

            warning_fg: Color::Black,
            warning_bg: Color::Yellow,
        }
    }

    /// Get the color for a session state
    pub fn session_state_color(&self, state: &SessionState) -> Color {
        match state {
            SessionState::NotLogging => self.state_not_logging,
            SessionState::Active { .. } => self.state_active,
            SessionState::Paused { .. } => self.state_paused,
        }
    }

    /// Get the color for a side-effect source
    pub fn source_color(&self, source: Source) -> Color {
        match source {
            Source::StartStop => self.source_start_stop,
            Source::PauseResume => self.source_pause_resume,
        }
    }

    // === Style Builders ===

    /// Style for headers/titles
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for muted text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for a control button
    pub fn control_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.control_enabled)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.control_disabled)
                .add_modifier(Modifier::DIM)
        }
    }

    /// Style for the status banner
    pub fn warning_banner_style(&self) -> Style {
        Style::default().fg(self.warning_fg).bg(self.warning_bg)
    }
}

/// Global theme instance
static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

/// Get the current theme
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_default() {
        let theme = Theme::default();
        assert_eq!(theme.accent, Color::Cyan);
        assert_eq!(theme.state_active, Color::Green);
    }

    #[test]
    fn test_session_state_color() {
        let theme = Theme::dark();
        assert_eq!(
            theme.session_state_color(&SessionState::NotLogging),
            Color::DarkGray
        );
        assert_eq!(
            theme.session_state_color(&SessionState::Active {
                started_by_user: true
            }),
            Color::Green
        );
        assert_eq!(
            theme.session_state_color(&SessionState::Paused {
                started_by_user: false
            }),
            Color::Yellow
        );
    }

    #[test]
    fn test_control_style() {
        let theme = Theme::dark();
        assert_eq!(theme.control_style(true).fg, Some(Color::Cyan));
        assert_eq!(theme.control_style(false).fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_global_theme() {
        let t = theme();
        assert_eq!(t.source_color(Source::PauseResume), Color::Magenta);
    }
}
