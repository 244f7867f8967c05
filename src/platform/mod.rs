//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (`Date.now()` on web, system clock elsewhere)
//! - Storage (LocalStorage on web, in-memory elsewhere)
//!
//! Both are traits so the run tracker can be driven in tests with a manual
//! clock and a throwaway store.

pub mod storage;
pub mod time;

pub use storage::{KvStore, MemoryStore};
pub use time::{Clock, SystemClock};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
