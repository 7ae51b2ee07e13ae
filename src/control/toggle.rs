//! Two-toggle presentation of the session controls
//!
//! Some hosts show one latching "logging" toggle and one "pause" toggle instead of four
//! buttons. The toggle positions are derived from the same session state.

use super::{Control, ControlError, Controls, LoggingControl, LoggingSink, SessionState};

/// Position of a latching toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    /// Released
    #[default]
    Out,
    /// Latched
    In,
}

impl ToggleState {
    /// Check if the toggle is latched
    pub fn is_in(&self) -> bool {
        matches!(self, ToggleState::In)
    }
}

/// Toggle positions for a session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleControls {
    /// In while a session is open
    pub logging: ToggleState,
    /// In while the session is paused
    pub pause: ToggleState,
    /// Whether the pause toggle can be pressed
    pub pause_enabled: bool,
}

impl ToggleControls {
    /// Toggle positions for the given session state
    pub fn for_state(state: &SessionState) -> Self {
        match state {
            SessionState::NotLogging => Self {
                logging: ToggleState::Out,
                pause: ToggleState::Out,
                pause_enabled: false,
            },
            SessionState::Active { .. } => Self {
                logging: ToggleState::In,
                pause: ToggleState::Out,
                pause_enabled: true,
            },
            SessionState::Paused { .. } => Self {
                logging: ToggleState::In,
                pause: ToggleState::In,
                pause_enabled: true,
            },
        }
    }
}

impl<S: LoggingSink> LoggingControl<S> {
    /// Get the toggle positions for the current state
    pub fn toggles(&self) -> ToggleControls {
        ToggleControls::for_state(&self.state())
    }

    /// Press the logging toggle: start when released, stop when latched
    pub fn press_logging_toggle(&mut self) -> Result<Controls, ControlError> {
        match self.toggles().logging {
            ToggleState::Out => self.start(),
            ToggleState::In => self.stop(),
        }
    }

    /// Press the pause toggle: pause when released, resume when latched
    ///
    /// Fails with the Pause control when no session is open.
    pub fn press_pause_toggle(&mut self) -> Result<Controls, ControlError> {
        let toggles = self.toggles();
        if !toggles.pause_enabled {
            return Err(ControlError::ControlDisabled {
                control: Control::Pause,
                state: self.state(),
            });
        }
        match toggles.pause {
            ToggleState::Out => self.pause(),
            ToggleState::In => self.resume(),
        }
    }
}
