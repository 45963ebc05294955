//! Run journal for itemvault
//!
//! Records one line per significant event of a backup run (run start/end,
//! file copied, archive created, archive pruned) in an append-only JSONL
//! file, filtered by a minimum severity threshold.
//!
//! A `RunJournal` is constructed per run and passed into the orchestrator,
//! so there is no process-global logger state.

mod entry;
mod logger;

pub use entry::{JournalEntry, LogLevel, RunPhase};
pub use logger::RunJournal;
