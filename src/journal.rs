//! In-memory session journal
//!
//! The host's side-effect channel. Records every initialize/enable/disable/flush call the
//! session controller makes, in a bounded ring for display in the TUI.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::control::{LoggingSink, Source};

/// Side effect invoked by the session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkAction {
    Initialize,
    Enable,
    Disable,
    Flush,
}

impl SinkAction {
    /// Single-letter code (`i`, `e`, `d`, `f`)
    pub fn code(&self) -> &'static str {
        match self {
            SinkAction::Initialize => "i",
            SinkAction::Enable => "e",
            SinkAction::Disable => "d",
            SinkAction::Flush => "f",
        }
    }

    /// Get the display name for this action
    pub fn display_name(&self) -> &'static str {
        match self {
            SinkAction::Initialize => "initialize",
            SinkAction::Enable => "enable",
            SinkAction::Disable => "disable",
            SinkAction::Flush => "flush",
        }
    }
}

/// A single journal entry
#[derive(Debug, Clone)]
pub struct JournalEntry {
    /// When the side effect was invoked
    pub timestamp: DateTime<Utc>,
    pub action: SinkAction,
    pub source: Source,
}

/// Bounded record of session side effects
#[derive(Debug)]
pub struct SessionJournal {
    entries: VecDeque<JournalEntry>,
    /// Maximum entries to keep
    max_entries: usize,
    /// Whether active writing is currently on
    writing: bool,
    /// Sessions opened over the journal's lifetime
    sessions_opened: u64,
    /// Sessions flushed over the journal's lifetime
    sessions_closed: u64,
}

impl SessionJournal {
    /// Create a journal keeping at most `max_entries` entries
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1024)),
            max_entries,
            writing: false,
            sessions_opened: 0,
            sessions_closed: 0,
        }
    }

    fn push(&mut self, action: SinkAction, source: Source) {
        tracing::info!(
            action = action.display_name(),
            source = ?source,
            "Logging side effect"
        );

        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(JournalEntry {
            timestamp: Utc::now(),
            action,
            source,
        });
    }

    /// Get the most recent `count` entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<JournalEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Get the number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the journal is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if active writing is on
    pub fn is_writing(&self) -> bool {
        self.writing
    }

    /// Number of sessions opened
    pub fn sessions_opened(&self) -> u64 {
        self.sessions_opened
    }

    /// Number of sessions flushed
    pub fn sessions_closed(&self) -> u64 {
        self.sessions_closed
    }

    /// Retained actions as comma-separated codes, e.g. `i,e,d,f`
    pub fn action_codes(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.action.code())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Retained sources as comma-separated codes, e.g. `0,0,1,1`
    pub fn source_codes(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.source.code().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for SessionJournal {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl LoggingSink for SessionJournal {
    fn initialize(&mut self, source: Source) {
        self.sessions_opened += 1;
        self.push(SinkAction::Initialize, source);
    }

    fn enable(&mut self, source: Source) {
        self.writing = true;
        self.push(SinkAction::Enable, source);
    }

    fn disable(&mut self, source: Source) {
        self.writing = false;
        self.push(SinkAction::Disable, source);
    }

    fn flush(&mut self, source: Source) {
        self.writing = false;
        self.sessions_closed += 1;
        self.push(SinkAction::Flush, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::LoggingControl;

    #[test]
    fn test_journal_records_machine_side_effects() {
        let mut control = LoggingControl::new(SessionJournal::new(100));
        control.start().unwrap();
        assert!(control.sink().is_writing());
        control.pause().unwrap();
        assert!(!control.sink().is_writing());
        control.resume().unwrap();
        control.stop().unwrap();

        let journal = control.into_sink();
        assert_eq!(journal.action_codes(), "i,e,d,e,d,f");
        assert_eq!(journal.source_codes(), "0,0,1,1,0,0");
        assert_eq!(journal.sessions_opened(), 1);
        assert_eq!(journal.sessions_closed(), 1);
        assert!(!journal.is_writing());
    }

    #[test]
    fn test_journal_capacity() {
        let mut journal = SessionJournal::new(3);
        journal.initialize(Source::StartStop);
        journal.enable(Source::StartStop);
        journal.disable(Source::PauseResume);
        journal.enable(Source::PauseResume);
        journal.disable(Source::StartStop);

        assert_eq!(journal.len(), 3);
        assert_eq!(journal.action_codes(), "d,e,d");
        assert_eq!(journal.sessions_opened(), 1);
    }

    #[test]
    fn test_recent_entries() {
        let mut journal = SessionJournal::new(10);
        assert!(journal.recent(5).is_empty());

        journal.initialize(Source::StartStop);
        journal.enable(Source::StartStop);
        journal.disable(Source::StartStop);

        let recent = journal.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action, SinkAction::Enable);
        assert_eq!(recent[1].action, SinkAction::Disable);
        assert_eq!(journal.recent(10).len(), 3);
    }

    #[test]
    fn test_zero_capacity_keeps_one_entry() {
        let mut journal = SessionJournal::new(0);
        journal.initialize(Source::StartStop);
        journal.enable(Source::StartStop);
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.action_codes(), "e");
    }
}
