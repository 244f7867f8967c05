//! Run statistics: counters, level timer, completion history, formatting.

pub mod format;
pub mod timer;
pub mod tracker;

pub use format::format_time;
pub use timer::LevelTimer;
pub use tracker::{CompletionRecord, CompletionSummary, RunTracker, StatsSnapshot};
