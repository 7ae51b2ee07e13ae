//! Application and main event loop
//!
//! Ties the console state to the terminal UI. Key presses are the only input: user
//! commands and simulated speed changes both arrive through the same loop, so the session
//! controller is only ever driven from one thread.

mod state;

pub use state::AppState;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use crate::config::Config;
use crate::input::action_for_key;
use crate::logging::LogFileInfo;
use crate::tui::views::render_console;
use crate::tui::Tui;

/// Main application struct
pub struct App {
    /// Application configuration
    pub(crate) config: Config,
    /// Console state
    pub(crate) state: AppState,
    /// Terminal UI
    pub(crate) tui: Tui,
    /// Information about the current log file
    pub(crate) log_file_info: LogFileInfo,
}

impl App {
    /// Create a new application instance
    pub async fn new(config: Config, log_file_info: LogFileInfo) -> Result<Self> {
        let state = AppState::new(&config)?;
        tracing::debug!(
            threshold = config.threshold_knots,
            hysteresis = config.hysteresis_knots,
            automatic = config.automatic_mode,
            "Console configured"
        );

        let tui = Tui::new()?;

        Ok(Self {
            config,
            state,
            tui,
            log_file_info,
        })
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        tracing::info!("flightlog started. Press 's' to start logging, 'q' to quit.");

        let result = self.event_loop().await;

        // Never leave a session open behind us
        self.state.shutdown();

        self.tui.exit()?;

        tracing::info!(
            opened = self.state.control.sink().sessions_opened(),
            closed = self.state.control.sink().sessions_closed(),
            "flightlog stopped"
        );
        result
    }

    /// Main event loop
    async fn event_loop(&mut self) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.tick_rate_ms.max(1));

        self.state.needs_render = true;

        loop {
            if self.state.needs_render {
                self.render()?;
                self.state.needs_render = false;
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(action) = action_for_key(key) {
                            // Clear status message on any handled keypress
                            self.state.status_message = None;
                            self.state.apply(action);
                        }
                    }
                    Event::Resize(_, _) => {
                        self.state.needs_render = true;
                    }
                    _ => {}
                }
            }

            if self.state.should_quit {
                return Ok(());
            }
        }
    }

    /// Render the console
    fn render(&mut self) -> Result<()> {
        let state = &self.state;
        let log_file_info = &self.log_file_info;

        self.tui.draw(|frame| {
            let area = frame.size();
            render_console(frame, area, state, log_file_info);
        })
    }
}
