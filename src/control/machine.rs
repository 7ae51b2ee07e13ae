//! The logging control state machine

use super::{Command, Control, ControlError, Controls, LoggingSink, Origin, SessionState, Source};

/// Controls when a logging session is open
///
/// User commands require their control to be enabled and return
/// [`ControlError::ControlDisabled`] otherwise, leaving the state untouched and invoking no
/// side effect. Threshold events never fail; they degrade to no-ops when their guards are
/// not met.
///
/// All operations run synchronously on the caller's thread. The host must invoke them
/// serially from one dispatch loop.
#[derive(Debug)]
pub struct LoggingControl<S> {
    /// Whether threshold events may open and close sessions
    automatic_mode: bool,
    /// Current session lifecycle state
    state: SessionState,
    /// Host side effects
    sink: S,
}

impl<S: LoggingSink> LoggingControl<S> {
    /// Create a machine with no open session and automatic mode off
    pub fn new(sink: S) -> Self {
        Self {
            automatic_mode: false,
            state: SessionState::NotLogging,
            sink,
        }
    }

    /// Set the initial automatic mode
    pub fn with_automatic_mode(mut self, automatic_mode: bool) -> Self {
        self.automatic_mode = automatic_mode;
        self
    }

    /// Check if automatic mode is on
    pub fn automatic_mode(&self) -> bool {
        self.automatic_mode
    }

    /// Turn automatic mode on or off
    ///
    /// Only gates future threshold events. An open session keeps running either way.
    pub fn set_automatic_mode(&mut self, automatic_mode: bool) {
        if self.automatic_mode != automatic_mode {
            tracing::debug!(automatic_mode, "Automatic mode changed");
        }
        self.automatic_mode = automatic_mode;
    }

    /// Get the current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the enabled flags of the four controls
    pub fn controls(&self) -> Controls {
        Controls::for_state(&self.state)
    }

    /// Get the host sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get the host sink mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the machine and return the host sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Open a session on behalf of the user
    pub fn start(&mut self) -> Result<Controls, ControlError> {
        self.start_with_origin(Origin::User)
    }

    /// Open a session, recording who opened it
    ///
    /// Invokes `initialize` then `enable`, both tagged [`Source::StartStop`].
    pub fn start_with_origin(&mut self, origin: Origin) -> Result<Controls, ControlError> {
        self.require(Control::Start)?;

        self.sink.initialize(Source::StartStop);
        self.sink.enable(Source::StartStop);
        self.state = SessionState::Active {
            started_by_user: origin == Origin::User,
        };

        tracing::debug!(?origin, "Logging session started");
        Ok(self.controls())
    }

    /// Close the open session, active or paused
    ///
    /// Always invokes `disable` then `flush`, tagged [`Source::StartStop`]. Stopping a paused
    /// session therefore disables twice over the session's lifetime.
    pub fn stop(&mut self) -> Result<Controls, ControlError> {
        self.require(Control::Stop)?;

        let was = self.state;
        self.sink.disable(Source::StartStop);
        self.sink.flush(Source::StartStop);
        self.state = SessionState::NotLogging;

        tracing::debug!(from = %was, "Logging session stopped");
        Ok(self.controls())
    }

    /// Suspend writing in the active session
    pub fn pause(&mut self) -> Result<Controls, ControlError> {
        self.require(Control::Pause)?;

        if let SessionState::Active { started_by_user } = self.state {
            self.sink.disable(Source::PauseResume);
            self.state = SessionState::Paused { started_by_user };
        }

        tracing::debug!("Logging session paused");
        Ok(self.controls())
    }

    /// Resume writing in the paused session
    pub fn resume(&mut self) -> Result<Controls, ControlError> {
        self.require(Control::Resume)?;

        if let SessionState::Paused { started_by_user } = self.state {
            self.sink.enable(Source::PauseResume);
            self.state = SessionState::Active { started_by_user };
        }

        tracing::debug!("Logging session resumed");
        Ok(self.controls())
    }

    /// Run a user command
    pub fn dispatch(&mut self, command: Command) -> Result<Controls, ControlError> {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
        }
    }

    /// Handle the speed rising above the threshold
    ///
    /// Opens an automatic session when automatic mode is on and no session is open.
    /// Returns whether a session was opened.
    pub fn threshold_reached(&mut self) -> bool {
        if !self.automatic_mode || self.state.is_open() {
            tracing::debug!(
                automatic_mode = self.automatic_mode,
                state = %self.state,
                "Threshold reached ignored"
            );
            return false;
        }
        self.start_with_origin(Origin::Automatic).is_ok()
    }

    /// Handle the speed falling below the threshold
    ///
    /// Closes the session only when automatic mode is on right now, the session was opened
    /// automatically, and it is active. Returns whether the session was closed.
    pub fn threshold_missed(&mut self) -> bool {
        let auto_owned_and_active = matches!(
            self.state,
            SessionState::Active {
                started_by_user: false
            }
        );
        if !self.automatic_mode || !auto_owned_and_active {
            tracing::debug!(
                automatic_mode = self.automatic_mode,
                state = %self.state,
                started_by_user = ?self.state.started_by_user(),
                "Threshold missed ignored"
            );
            return false;
        }
        self.stop().is_ok()
    }

    fn require(&self, control: Control) -> Result<(), ControlError> {
        if self.controls().is_enabled(control) {
            Ok(())
        } else {
            Err(ControlError::ControlDisabled {
                control,
                state: self.state,
            })
        }
    }
}
