//! History entries and how they are shown.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use gosp_protocol::HistoryItem;

/// `strftime` pattern for entry timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The single outcome recorded for a command, carrying the text the user
/// saw (`Result: 2`, `Error: ...`, `Fetch error: ...`).
///
/// One enum value per entry means an entry can never have both a result
/// and an error, or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server evaluated the command.
    Success(String),

    /// The server rejected the command (bad syntax, runtime error).
    EvaluationError(String),

    /// No usable response came back.
    TransportError(String),
}

impl Outcome {
    /// A successful evaluation, shown as `Result: <value>`.
    pub fn result(value: impl fmt::Display) -> Self {
        Self::Success(format!("Result: {value}"))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Success(t) | Self::EvaluationError(t) | Self::TransportError(t) => t,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

// ---------------------------------------------------------------------------
// HistoryEntry
// ---------------------------------------------------------------------------

/// One (command, outcome, timestamp) record.
///
/// Fields are private: once created, an entry is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    command: String,
    outcome: Outcome,
    at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(command: impl Into<String>, outcome: Outcome, at: DateTime<Utc>) -> Self {
        Self {
            command: command.into(),
            outcome,
            at,
        }
    }

    /// Stamps a new entry with the current time.
    pub fn now(command: impl Into<String>, outcome: Outcome) -> Self {
        Self::new(command, outcome, Utc::now())
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// Renders `[<time>] <command> => <outcome>` in the given time zone.
    pub fn render_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!(
            "[{}] {} => {}",
            format_timestamp(&self.at, tz),
            self.command,
            self.outcome
        )
    }

    /// Renders the entry in the machine's local time zone.
    pub fn render(&self) -> String {
        self.render_in(&Local)
    }
}

/// The server only persists successful evaluations, so every item
/// becomes a `Success` entry, worded like a local one.
impl From<HistoryItem> for HistoryEntry {
    fn from(item: HistoryItem) -> Self {
        Self::new(item.expr, Outcome::result(item.result), item.at)
    }
}

/// Formats a UTC instant in `tz` using [`TIMESTAMP_FORMAT`].
pub fn format_timestamp<Tz>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}
