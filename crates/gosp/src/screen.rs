//! The presentation model: what the user currently sees.
//!
//! A front-end (the terminal REPL, a test) renders a [`Screen`]; the
//! [`SessionClient`](crate::SessionClient) is the only thing that changes
//! it.

use gosp_history::HistoryLog;

/// Placeholder shown in the output panel while an evaluation is in flight.
pub const RUNNING: &str = "Running...";

/// Everything visible about the session, in one place.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub(crate) output: String,
    pub(crate) status: String,
    pub(crate) authenticated_views_visible: bool,
    pub(crate) history: HistoryLog,
    pub(crate) history_notice: Option<String>,
}

impl Screen {
    /// Result panel: the outcome of the latest evaluation.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Auth status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the REPL and history sections are shown.
    pub fn authenticated_views_visible(&self) -> bool {
        self.authenticated_views_visible
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Shown in place of (or above) the history log: a prompt to log in,
    /// the empty-history indicator, or a load error.
    pub fn history_notice(&self) -> Option<&str> {
        self.history_notice.as_deref()
    }

    /// Resets everything tied to an authenticated session.
    pub(crate) fn tear_down(&mut self) {
        self.authenticated_views_visible = false;
        self.output.clear();
        self.history.clear();
        self.history_notice = None;
    }
}
