//! Logging session control
//!
//! Decides when a flight-data logging session is open. Two independent inputs drive it:
//! explicit user commands (start/stop/pause/resume) and speed-threshold crossings reported
//! by the host. The machine owns the enabled state of the four user-facing controls and
//! sequences the side effects that open, enable, disable and flush the log.

mod machine;
mod sink;
mod toggle;

pub use machine::LoggingControl;
pub use sink::{Callbacks, LoggingSink};
pub use toggle::{ToggleControls, ToggleState};

use std::fmt;

use thiserror::Error;

/// Which logical operation issued a side effect
///
/// The numeric values match the notation used by hosts that log or highlight the
/// operation (`0` for start/stop, `1` for pause/resume).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Issued by `start` or `stop`, whether user- or threshold-triggered
    StartStop = 0,
    /// Issued by `pause` or `resume`
    PauseResume = 1,
}

impl Source {
    /// Numeric code for this source
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Who opened a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Opened by an explicit user command
    #[default]
    User,
    /// Opened by a threshold-reached event in automatic mode
    Automatic,
}

/// Lifecycle of the logging session
///
/// `started_by_user` only exists while a session is open, so a closed session can never
/// carry stale ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session is open
    #[default]
    NotLogging,
    /// A session is open and writing
    Active { started_by_user: bool },
    /// A session is open but writing is suspended
    Paused { started_by_user: bool },
}

impl SessionState {
    /// Get the display name for this state
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionState::NotLogging => "not logging",
            SessionState::Active { .. } => "active",
            SessionState::Paused { .. } => "paused",
        }
    }

    /// Check if a session is open (active or paused)
    pub fn is_open(&self) -> bool {
        !matches!(self, SessionState::NotLogging)
    }

    /// Whether the open session was started by the user, `None` when no session is open
    pub fn started_by_user(&self) -> Option<bool> {
        match self {
            SessionState::NotLogging => None,
            SessionState::Active { started_by_user } | SessionState::Paused { started_by_user } => {
                Some(*started_by_user)
            }
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One of the four user-facing controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Start,
    Stop,
    Pause,
    Resume,
}

impl Control {
    /// All controls in display order
    pub const ALL: [Control; 4] = [Control::Start, Control::Stop, Control::Pause, Control::Resume];

    /// Get the display name for this control
    pub fn display_name(&self) -> &'static str {
        match self {
            Control::Start => "Start",
            Control::Stop => "Stop",
            Control::Pause => "Pause",
            Control::Resume => "Resume",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Enabled flags of the four controls
///
/// Plain data derived from the session state. Hosts read it to decide which affordances
/// are actionable; only the machine produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub pause: bool,
    pub resume: bool,
}

impl Controls {
    /// Controls for the given session state
    pub fn for_state(state: &SessionState) -> Self {
        match state {
            SessionState::NotLogging => Self {
                start: true,
                stop: false,
                pause: false,
                resume: false,
            },
            SessionState::Active { .. } => Self {
                start: false,
                stop: true,
                pause: true,
                resume: false,
            },
            SessionState::Paused { .. } => Self {
                start: false,
                stop: true,
                pause: false,
                resume: true,
            },
        }
    }

    /// Check whether a single control is enabled
    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Start => self.start,
            Control::Stop => self.stop,
            Control::Pause => self.pause,
            Control::Resume => self.resume,
        }
    }
}

/// A user command, one per control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Pause,
    Resume,
}

impl Command {
    /// The control that governs this command
    pub fn control(&self) -> Control {
        match self {
            Command::Start => Control::Start,
            Command::Stop => Control::Stop,
            Command::Pause => Control::Pause,
            Command::Resume => Control::Resume,
        }
    }
}

/// Errors returned by session control operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    /// An operation was invoked while its governing control is disabled
    #[error("{control} control is disabled while {state}")]
    ControlDisabled {
        control: Control,
        state: SessionState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_table() {
        assert_eq!(
            Controls::for_state(&SessionState::NotLogging),
            Controls {
                start: true,
                stop: false,
                pause: false,
                resume: false
            }
        );

        let active = Controls::for_state(&SessionState::Active {
            started_by_user: false,
        });
        assert!(!active.start && active.stop && active.pause && !active.resume);

        let paused = Controls::for_state(&SessionState::Paused {
            started_by_user: true,
        });
        assert!(!paused.start && paused.stop && !paused.pause && paused.resume);
    }

    #[test]
    fn test_controls_is_enabled() {
        let controls = Controls::for_state(&SessionState::NotLogging);
        assert!(controls.is_enabled(Control::Start));
        assert!(!controls.is_enabled(Control::Stop));
        assert!(!controls.is_enabled(Control::Pause));
        assert!(!controls.is_enabled(Control::Resume));
    }

    #[test]
    fn test_started_by_user_only_when_open() {
        assert_eq!(SessionState::NotLogging.started_by_user(), None);
        assert_eq!(
            SessionState::Active {
                started_by_user: true
            }
            .started_by_user(),
            Some(true)
        );
        assert_eq!(
            SessionState::Paused {
                started_by_user: false
            }
            .started_by_user(),
            Some(false)
        );
    }

    #[test]
    fn test_source_codes() {
        assert_eq!(Source::StartStop.code(), 0);
        assert_eq!(Source::PauseResume.code(), 1);
    }

    #[test]
    fn test_command_controls() {
        assert_eq!(Command::Start.control(), Control::Start);
        assert_eq!(Command::Stop.control(), Control::Stop);
        assert_eq!(Command::Pause.control(), Control::Pause);
        assert_eq!(Command::Resume.control(), Control::Resume);
    }

    #[test]
    fn test_error_message() {
        let err = ControlError::ControlDisabled {
            control: Control::Pause,
            state: SessionState::NotLogging,
        };
        assert_eq!(err.to_string(), "Pause control is disabled while not logging");
    }
}
