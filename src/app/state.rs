//! Console state
//!
//! Everything the console needs besides the terminal: the session controller with its
//! journal, the simulated ground speed and its threshold detector, and the status line.
//! Kept separate from the terminal so it can be driven in tests.

use anyhow::Result;

use crate::config::Config;
use crate::control::{Command, LoggingControl};
use crate::input::Action;
use crate::journal::SessionJournal;
use crate::threshold::{ThresholdDetector, ThresholdEvent};

/// Console state driven by user actions
#[derive(Debug)]
pub struct AppState {
    /// Session controller, owning the journal as its side-effect channel
    pub control: LoggingControl<SessionJournal>,
    /// Threshold edge detector for the simulated speed
    pub detector: ThresholdDetector,
    /// Simulated ground speed in knots
    pub speed_knots: f64,
    /// Speed change per step in knots
    pub speed_step_knots: f64,
    /// Status line message, cleared on the next key press
    pub status_message: Option<String>,
    /// Set when the user asked to quit
    pub should_quit: bool,
    /// Whether the UI needs to be re-rendered
    pub needs_render: bool,
}

impl AppState {
    /// Create console state from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let detector = ThresholdDetector::new(config.threshold_knots, config.hysteresis_knots)?;
        let control = LoggingControl::new(SessionJournal::new(config.journal_capacity))
            .with_automatic_mode(config.automatic_mode);

        let mut state = Self {
            control,
            detector,
            speed_knots: 0.0,
            speed_step_knots: config.speed_step_knots,
            status_message: None,
            should_quit: false,
            needs_render: true,
        };
        // Parked aircraft: establish the below-threshold level
        state.update_speed(0.0);
        Ok(state)
    }

    /// Apply a user action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Command(command) => self.run_command(command),
            Action::LoggingToggle => {
                if let Err(e) = self.control.press_logging_toggle() {
                    self.status_message = Some(e.to_string());
                }
            }
            Action::PauseToggle => {
                if !self.control.toggles().pause_enabled {
                    self.status_message = Some("Pause toggle needs an open session".to_string());
                } else if let Err(e) = self.control.press_pause_toggle() {
                    self.status_message = Some(e.to_string());
                }
            }
            Action::ToggleAutomatic => {
                let automatic = !self.control.automatic_mode();
                self.control.set_automatic_mode(automatic);
                tracing::info!(automatic, "Automatic mode toggled");
            }
            Action::SpeedUp => self.update_speed(self.speed_knots + self.speed_step_knots),
            Action::SpeedDown => self.update_speed(self.speed_knots - self.speed_step_knots),
            Action::Quit => self.should_quit = true,
        }
        self.needs_render = true;
    }

    /// Run a command if its control is enabled
    ///
    /// Disabled controls never reach the controller; the user gets a status message.
    fn run_command(&mut self, command: Command) {
        let control = command.control();
        if !self.control.controls().is_enabled(control) {
            self.status_message = Some(format!(
                "{} is not available while {}",
                control,
                self.control.state()
            ));
            return;
        }
        if let Err(e) = self.control.dispatch(command) {
            tracing::warn!("Command {:?} rejected: {}", command, e);
            self.status_message = Some(e.to_string());
        }
    }

    /// Set the simulated speed and forward any threshold crossing to the controller
    pub fn update_speed(&mut self, speed_knots: f64) {
        self.speed_knots = speed_knots.max(0.0);
        match self.detector.observe(self.speed_knots) {
            Some(ThresholdEvent::Reached) => {
                if self.control.threshold_reached() {
                    tracing::info!(speed = self.speed_knots, "Session opened automatically");
                }
            }
            Some(ThresholdEvent::Missed) => {
                if self.control.threshold_missed() {
                    tracing::info!(speed = self.speed_knots, "Session closed automatically");
                }
            }
            None => {}
        }
    }

    /// Close any open session so the journal records its flush
    pub fn shutdown(&mut self) {
        if self.control.state().is_open() {
            tracing::info!("Closing open logging session on exit");
            if let Err(e) = self.control.stop() {
                tracing::warn!("Failed to close session on exit: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::SessionState;

    fn state() -> AppState {
        AppState::new(&Config::default()).unwrap()
    }

    fn automatic_state() -> AppState {
        let config = Config {
            automatic_mode: true,
            ..Config::default()
        };
        AppState::new(&config).unwrap()
    }

    fn codes(state: &AppState) -> String {
        state.control.sink().action_codes()
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert_eq!(s.speed_knots, 0.0);
        assert_eq!(s.control.state(), SessionState::NotLogging);
        assert!(!s.control.automatic_mode());
        assert!(s.control.sink().is_empty());
    }

    #[test]
    fn test_disabled_command_shows_message_without_side_effects() {
        let mut s = state();
        s.apply(Action::Command(Command::Pause));
        assert_eq!(
            s.status_message.as_deref(),
            Some("Pause is not available while not logging")
        );
        assert_eq!(codes(&s), "");
    }

    #[test]
    fn test_manual_commands() {
        let mut s = state();
        s.apply(Action::Command(Command::Start));
        s.apply(Action::Command(Command::Pause));
        s.apply(Action::Command(Command::Resume));
        s.apply(Action::Command(Command::Stop));
        assert_eq!(codes(&s), "i,e,d,e,d,f");
        assert!(s.status_message.is_none());
    }

    #[test]
    fn test_speed_crossings_drive_automatic_sessions() {
        let mut s = automatic_state();
        for _ in 0..8 {
            s.apply(Action::SpeedUp);
        }
        assert_eq!(s.speed_knots, 40.0);
        assert_eq!(
            s.control.state(),
            SessionState::Active {
                started_by_user: false
            }
        );

        // 35 knots sits in the hysteresis band
        s.apply(Action::SpeedDown);
        assert!(s.control.state().is_open());

        s.apply(Action::SpeedDown);
        assert_eq!(s.control.state(), SessionState::NotLogging);
        assert_eq!(codes(&s), "i,e,d,f");
    }

    #[test]
    fn test_speed_crossings_ignored_in_manual_mode() {
        let mut s = state();
        s.update_speed(100.0);
        s.update_speed(0.0);
        assert_eq!(codes(&s), "");
    }

    #[test]
    fn test_speed_never_negative() {
        let mut s = state();
        s.apply(Action::SpeedDown);
        assert_eq!(s.speed_knots, 0.0);
    }

    #[test]
    fn test_toggle_automatic_mid_flight() {
        let mut s = automatic_state();
        s.update_speed(60.0);
        s.apply(Action::ToggleAutomatic);
        assert!(!s.control.automatic_mode());
        s.update_speed(0.0);
        assert!(s.control.state().is_open());
        assert_eq!(codes(&s), "i,e");
    }

    #[test]
    fn test_toggles() {
        let mut s = state();
        s.apply(Action::PauseToggle);
        assert!(s.status_message.is_some());

        s.status_message = None;
        s.apply(Action::LoggingToggle);
        s.apply(Action::PauseToggle);
        s.apply(Action::LoggingToggle);
        assert_eq!(codes(&s), "i,e,d,d,f");
        assert_eq!(s.control.sink().source_codes(), "0,0,1,0,0");
        assert!(s.status_message.is_none());
    }

    #[test]
    fn test_shutdown_closes_open_session() {
        let mut s = state();
        s.apply(Action::Command(Command::Start));
        s.apply(Action::Command(Command::Pause));
        s.shutdown();
        assert_eq!(s.control.state(), SessionState::NotLogging);
        assert_eq!(codes(&s), "i,e,d,d,f");

        // Nothing left to close
        s.shutdown();
        assert_eq!(codes(&s), "i,e,d,d,f");
    }

    #[test]
    fn test_quit() {
        let mut s = state();
        s.apply(Action::Quit);
        assert!(s.should_quit);
    }
}
