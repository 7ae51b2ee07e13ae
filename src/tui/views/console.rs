//! Logging console view
//!
//! One screen: session header, the four controls, the two toggles with the simulated
//! ground speed, the recent journal, and a footer with key hints or the status message.

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};

use crate::app::AppState;
use crate::control::{Control, SessionState, ToggleState};
use crate::input::KEY_HINTS;
use crate::logging::LogFileInfo;
use crate::tui::theme::theme;

/// Header text describing the session and mode
pub fn session_summary(state: &SessionState, automatic_mode: bool) -> String {
    let mode = if automatic_mode { "automatic" } else { "manual" };
    match state.started_by_user() {
        None => format!("Not logging ({} mode)", mode),
        Some(true) => format!("Session {} - opened by user ({} mode)", state, mode),
        Some(false) => format!("Session {} - opened automatically ({} mode)", state, mode),
    }
}

/// Gauge fill for a speed, with the threshold at the midpoint
pub fn speed_ratio(speed: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 || !speed.is_finite() {
        return 0.0;
    }
    (speed / (threshold * 2.0)).clamp(0.0, 1.0)
}

fn control_key(control: Control) -> &'static str {
    match control {
        Control::Start => "s",
        Control::Stop => "x",
        Control::Pause => "p",
        Control::Resume => "r",
    }
}

fn toggle_label(state: ToggleState) -> &'static str {
    match state {
        ToggleState::In => "[■] in",
        ToggleState::Out => "[ ] out",
    }
}

/// Render the whole console
pub fn render_console(frame: &mut Frame, area: Rect, state: &AppState, log_file: &LogFileInfo) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, chunks[0], state);
    render_controls(frame, chunks[1], state);
    render_toggles_and_speed(frame, chunks[2], state);
    render_journal(frame, chunks[3], state, log_file);
    render_footer(frame, chunks[4], state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = theme();
    let session = state.control.state();
    let journal = state.control.sink();

    let line = Line::from(vec![
        Span::styled("flightlog", t.header_style()),
        Span::styled("  │  ", t.muted_style()),
        Span::styled(
            session_summary(&session, state.control.automatic_mode()),
            Style::default().fg(t.session_state_color(&session)),
        ),
        Span::styled(
            format!(
                "  │  {} opened, {} closed",
                journal.sessions_opened(),
                journal.sessions_closed()
            ),
            t.muted_style(),
        ),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_controls(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = theme();
    let controls = state.control.controls();

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (control, cell) in Control::ALL.iter().zip(cells.iter()) {
        let enabled = controls.is_enabled(*control);
        let style = t.control_style(enabled);
        let button = Paragraph::new(format!("{} [{}]", control, control_key(*control)))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(button, *cell);
    }
}

fn render_toggles_and_speed(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = theme();
    let toggles = state.control.toggles();

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let pause_style = t.control_style(toggles.pause_enabled);
    let line = Line::from(vec![
        Span::styled("Logging ", Style::default().fg(t.text)),
        Span::styled(toggle_label(toggles.logging), t.control_style(true)),
        Span::styled("   Pause ", Style::default().fg(t.text)),
        Span::styled(toggle_label(toggles.pause), pause_style),
    ]);
    let toggle_row = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Toggles [Enter/Space]"),
    );
    frame.render_widget(toggle_row, cells[0]);

    let threshold = state.detector.threshold();
    let color = if state.detector.is_above() {
        t.speed_above
    } else {
        t.speed_below
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ground speed [↑/↓]"),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(speed_ratio(state.speed_knots, threshold))
        .label(format!(
            "{:.0} kt (threshold {:.0} kt)",
            state.speed_knots, threshold
        ));
    frame.render_widget(gauge, cells[1]);
}

fn render_journal(frame: &mut Frame, area: Rect, state: &AppState, log_file: &LogFileInfo) {
    let t = theme();
    let visible = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = state
        .control
        .sink()
        .recent(visible)
        .into_iter()
        .rev()
        .map(|entry| {
            let time = entry.timestamp.with_timezone(&Local).format("%H:%M:%S");
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", time), t.muted_style()),
                Span::styled(
                    format!("{:<10}", entry.action.display_name()),
                    Style::default().fg(t.text),
                ),
                Span::styled(
                    format!("{:?}", entry.source),
                    Style::default().fg(t.source_color(entry.source)),
                ),
            ]))
        })
        .collect();

    let title = format!("Journal (diagnostics: {})", log_file.path.display());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = theme();
    let footer = match &state.status_message {
        Some(message) => Paragraph::new(message.as_str()).style(t.warning_banner_style()),
        None => Paragraph::new(KEY_HINTS).style(t.muted_style()),
    };
    frame.render_widget(footer.block(Block::default().borders(Borders::TOP)), area);
}
