//! Journal entry data structures
//!
//! Defines severity levels, the run phases a backup pass moves through, and
//! the entry format itself.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Severity of a journal entry
///
/// Ordered so that a minimum threshold can be compared directly:
/// `Debug < Info < Warning < Error < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-file detail (every copy, every archive entry)
    Debug,
    /// Run milestones (start, archive created, run complete)
    #[default]
    Info,
    /// Recoverable per-file problems (copy or prune failures)
    Warning,
    /// Fatal run problems
    Error,
    /// Problems that likely need operator attention before the next run
    Critical,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Phase of a backup run
///
/// A run moves `Init -> Validating -> Staging -> Archiving -> Pruning ->
/// Done`, with `Failed` reachable from any phase on a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    Init,
    Validating,
    Staging,
    Archiving,
    Pruning,
    Done,
    Failed,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::Init => write!(f, "init"),
            RunPhase::Validating => write!(f, "validating"),
            RunPhase::Staging => write!(f, "staging"),
            RunPhase::Archiving => write!(f, "archiving"),
            RunPhase::Pruning => write!(f, "pruning"),
            RunPhase::Done => write!(f, "done"),
            RunPhase::Failed => write!(f, "failed"),
        }
    }
}

/// A single journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Severity of the event
    pub level: LogLevel,

    /// Run phase the event occurred in
    pub phase: RunPhase,

    /// Human-readable event description
    pub message: String,
}

impl JournalEntry {
    /// Create a new entry stamped with the current time
    pub fn new(level: LogLevel, phase: RunPhase, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            phase,
            message: message.into(),
        }
    }
}
