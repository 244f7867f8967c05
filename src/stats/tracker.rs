//! Run statistics tracker
//!
//! Owns the attempt/death/jump counters, the level timer and the completion
//! history, and persists all of it through an injected [`KvStore`] on every
//! mutating operation.
//!
//! Counter policy, which the rest of the game treats as ground truth:
//! `deaths` counts attempts on the active level and is seeded to 1 the moment
//! a level starts (the running attempt occupies the first slot).
//! `total_deaths` counts attempts across every level ever started, so every
//! operation that begins a fresh attempt adds 1 - and the ones that supersede
//! an unfinished attempt (reset, resume) first subtract the superseded
//! level's counters. Completion finalizes an attempt, so it never touches the
//! totals. `jumps` accumulates across deaths within a level and only resets
//! when the level (re)starts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::timer::LevelTimer;
use crate::persistence::{SAVE_KEY, SaveData};
use crate::platform::storage::KvStore;
use crate::platform::time::Clock;

/// One successful completion. Append-only: replaying a level appends another
/// record with the same `level_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionRecord {
    pub level_id: u32,
    pub name: String,
    pub deaths: u32,
    pub jumps: u32,
    /// Level time in milliseconds
    pub time: f64,
    /// Epoch milliseconds at completion
    pub completed_at: f64,
    pub collected_bonus: bool,
}

/// Summary returned by [`RunTracker::complete_level`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionSummary {
    pub level_id: u32,
    pub deaths: u32,
    pub jumps: u32,
    pub time: f64,
}

/// Aggregate view for stats screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub current_level: u32,
    pub deaths: u32,
    pub jumps: u32,
    pub total_deaths: u32,
    pub total_jumps: u32,
    /// Count of distinct completed level ids (replays do not inflate this)
    pub completed_levels: usize,
    /// Sum of recorded level times plus the running attempt (ms)
    pub total_time: f64,
    /// Mean recorded level time (ms, rounded), 0 with no completions
    pub average_time: f64,
    /// Percent of attempts that ended in a first completion, rounded
    pub success_rate: u32,
    pub elapsed_ms: f64,
    pub level_history: Vec<CompletionRecord>,
}

#[derive(Debug, Clone, Default)]
struct RunState {
    current_level: u32,
    deaths: u32,
    jumps: u32,
    total_deaths: u32,
    total_jumps: u32,
    level_times: Vec<f64>,
    completed_levels: Vec<CompletionRecord>,
}

/// Lifecycle tracker for a play session.
///
/// Single-threaded by design: the host drives it synchronously, and the
/// timer is advanced by [`tick_timer`](Self::tick_timer) calls rather than a
/// background task, so there is never a second writer.
pub struct RunTracker<S: KvStore, C: Clock> {
    store: S,
    clock: C,
    state: RunState,
    timer: LevelTimer,
}

impl<S: KvStore, C: Clock> RunTracker<S, C> {
    /// Build a tracker and restore any persisted save.
    ///
    /// A broken store degrades to a fully functional in-memory session.
    pub fn new(store: S, clock: C) -> Self {
        let mut tracker = Self {
            store,
            clock,
            state: RunState {
                current_level: 1,
                ..RunState::default()
            },
            timer: LevelTimer::new(),
        };
        tracker.load();
        tracker
    }

    pub fn current_level(&self) -> u32 {
        self.state.current_level
    }

    pub fn deaths(&self) -> u32 {
        self.state.deaths
    }

    pub fn jumps(&self) -> u32 {
        self.state.jumps
    }

    pub fn total_deaths(&self) -> u32 {
        self.state.total_deaths
    }

    pub fn total_jumps(&self) -> u32 {
        self.state.total_jumps
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.timer.elapsed_ms()
    }

    pub fn completed_levels(&self) -> &[CompletionRecord] {
        &self.state.completed_levels
    }

    /// Begin a level: the running attempt occupies the first `deaths` slot
    /// and is counted into the session total immediately.
    pub fn start_level(&mut self, level_id: u32) {
        self.state.current_level = level_id;
        self.state.deaths = 1;
        self.state.jumps = 0;
        self.state.total_deaths += 1;
        self.timer.restart(self.clock.now_ms());
        self.save_progress();
    }

    /// A failed attempt: the next one starts immediately.
    ///
    /// Jumps deliberately survive the death - they accumulate for the whole
    /// level, not per attempt.
    pub fn record_death(&mut self) {
        self.state.deaths += 1;
        self.state.total_deaths += 1;
        self.save_progress();
    }

    pub fn record_jump(&mut self) {
        self.state.jumps += 1;
        self.state.total_jumps += 1;
        self.save_progress();
    }

    /// Finish the current level.
    ///
    /// The level time is measured straight from the timer anchor and pinned
    /// as the elapsed value before the timer stops, so the result does not
    /// depend on whether the periodic sampling tick has fired recently.
    /// The attempt was already counted at start, so totals are untouched.
    pub fn complete_level(&mut self, name: &str, collected_bonus: bool) -> CompletionSummary {
        let now = self.clock.now_ms();
        let level_time = self.timer.measure(now);
        self.timer.stop_at(level_time);

        self.state.level_times.push(level_time);
        self.state.completed_levels.push(CompletionRecord {
            level_id: self.state.current_level,
            name: name.to_string(),
            deaths: self.state.deaths,
            jumps: self.state.jumps,
            time: level_time,
            completed_at: now,
            collected_bonus,
        });

        self.save_progress();

        CompletionSummary {
            level_id: self.state.current_level,
            deaths: self.state.deaths,
            jumps: self.state.jumps,
            time: level_time,
        }
    }

    /// Restart the current level from scratch, superseding the unfinished
    /// attempt: its counters leave the totals, then the fresh attempt is
    /// counted.
    pub fn reset_level(&mut self) {
        self.supersede_attempt();
        self.save_progress();
    }

    /// Restore a persisted session into a fresh attempt. Same arithmetic as
    /// [`reset_level`](Self::reset_level): the interrupted attempt is
    /// superseded, not continued.
    pub fn resume_level(&mut self) {
        self.supersede_attempt();
        self.save_progress();
    }

    /// Start another attempt right after a completion. The finished attempt
    /// is already finalized in the history, so nothing is subtracted.
    pub fn continue_current_level(&mut self) {
        self.state.deaths = 1;
        self.state.jumps = 0;
        self.state.total_deaths += 1;
        self.timer.restart(self.clock.now_ms());
        self.save_progress();
    }

    fn supersede_attempt(&mut self) {
        self.state.total_deaths = self.state.total_deaths.saturating_sub(self.state.deaths);
        self.state.total_jumps = self.state.total_jumps.saturating_sub(self.state.jumps);
        self.state.deaths = 1;
        self.state.jumps = 0;
        self.state.total_deaths += 1;
        self.timer.restart(self.clock.now_ms());
    }

    /// Wipe the whole session and erase the persisted save.
    pub fn reset_stats(&mut self) {
        self.state = RunState {
            current_level: 1,
            deaths: 1,
            ..RunState::default()
        };
        self.timer.clear();
        self.clear_saved_game();
    }

    /// Periodic sampling tick; the host calls this on a ~100 ms cadence.
    pub fn tick_timer(&mut self) {
        self.timer.sample(self.clock.now_ms());
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn resume_timer(&mut self) {
        self.timer.resume(self.clock.now_ms());
    }

    /// Aggregate stats for the UI.
    pub fn get_stats(&self) -> StatsSnapshot {
        let recorded: f64 = self.state.level_times.iter().sum();
        let records = self.state.completed_levels.len();

        let distinct: HashSet<u32> = self
            .state
            .completed_levels
            .iter()
            .map(|r| r.level_id)
            .collect();

        let average_time = if records == 0 {
            0.0
        } else {
            (recorded / records as f64).round()
        };

        let success_rate = if self.state.total_deaths == 0 {
            0
        } else {
            (distinct.len() as f64 / self.state.total_deaths as f64 * 100.0).round() as u32
        };

        StatsSnapshot {
            current_level: self.state.current_level,
            deaths: self.state.deaths,
            jumps: self.state.jumps,
            total_deaths: self.state.total_deaths,
            total_jumps: self.state.total_jumps,
            completed_levels: distinct.len(),
            total_time: recorded + self.timer.elapsed_ms(),
            average_time,
            success_rate,
            elapsed_ms: self.timer.elapsed_ms(),
            level_history: self.state.completed_levels.clone(),
        }
    }

    /// Serialize the full run state to the store. Failures are logged and
    /// swallowed: the in-memory session stays authoritative.
    pub fn save_progress(&self) {
        let data = SaveData {
            current_level: self.state.current_level,
            deaths: self.state.deaths,
            jumps: self.state.jumps,
            total_deaths: self.state.total_deaths,
            total_jumps: self.state.total_jumps,
            level_times: self.state.level_times.clone(),
            completed_levels: self.state.completed_levels.clone(),
            elapsed_ms: self.timer.elapsed_ms(),
            saved_at: self.clock.now_ms(),
        };

        match data.encode() {
            Ok(json) => {
                if let Err(e) = self.store.set(SAVE_KEY, &json) {
                    log::error!("Failed to save game: {e}");
                }
            }
            Err(e) => log::error!("Failed to serialize save: {e}"),
        }
    }

    fn load(&mut self) {
        let json = match self.store.get(SAVE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return,
            Err(e) => {
                log::warn!("Failed to load game: {e}");
                return;
            }
        };

        match SaveData::decode(&json) {
            Some(data) => {
                self.state.current_level = data.current_level.max(1);
                // The active attempt always occupies the first slot
                self.state.deaths = data.deaths.max(1);
                self.state.jumps = data.jumps;
                self.state.total_deaths = data.total_deaths;
                self.state.total_jumps = data.total_jumps;
                self.state.level_times = data.level_times;
                self.state.completed_levels = data.completed_levels;
                self.timer.stop_at(data.elapsed_ms);
                log::info!(
                    "Restored save: level {}, {} completions",
                    self.state.current_level,
                    self.state.completed_levels.len()
                );
            }
            None => log::warn!("Ignoring corrupt save data"),
        }
    }

    pub fn has_saved_game(&self) -> bool {
        matches!(self.store.get(SAVE_KEY), Ok(Some(_)))
    }

    pub fn clear_saved_game(&self) {
        if let Err(e) = self.store.remove(SAVE_KEY) {
            log::error!("Failed to clear saved game: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;
    use crate::platform::time::ManualClock;
    use std::rc::Rc;

    fn tracker() -> RunTracker<Rc<MemoryStore>, Rc<ManualClock>> {
        RunTracker::new(Rc::new(MemoryStore::new()), Rc::new(ManualClock::new(0.0)))
    }

    #[test]
    fn start_level_seeds_the_first_attempt() {
        let mut t = tracker();
        t.start_level(5);
        assert_eq!(t.current_level(), 5);
        assert_eq!(t.deaths(), 1);
        assert_eq!(t.jumps(), 0);
        assert_eq!(t.total_deaths(), 1);
    }

    #[test]
    fn deaths_accumulate_and_jumps_survive_them() {
        let mut t = tracker();
        t.start_level(5);
        t.record_jump();
        t.record_jump();
        t.record_jump();

        t.record_death();
        t.record_death();

        assert_eq!(t.deaths(), 3);
        assert_eq!(t.total_deaths(), 3);
        // Jumps accumulate across attempts within the level
        assert_eq!(t.jumps(), 3);
        assert_eq!(t.total_jumps(), 3);
    }

    #[test]
    fn reset_level_supersedes_the_unfinished_attempt() {
        let mut t = tracker();
        // Build total_deaths = 10 with deaths = 3 on the active level
        t.start_level(1);
        for _ in 0..6 {
            t.record_death();
        }
        t.complete_level("one", false);
        t.continue_current_level();
        t.record_death();
        t.record_death();
        assert_eq!(t.total_deaths(), 10);
        assert_eq!(t.deaths(), 3);

        t.record_jump();
        let jumps_before = t.total_jumps();

        t.reset_level();

        assert_eq!(t.total_deaths(), 10 - 3 + 1);
        assert_eq!(t.deaths(), 1);
        assert_eq!(t.jumps(), 0);
        assert_eq!(t.total_jumps(), jumps_before - 1);
    }

    #[test]
    fn resume_level_uses_the_same_arithmetic_as_reset() {
        let mut t1 = tracker();
        let mut t2 = tracker();
        for t in [&mut t1, &mut t2] {
            t.start_level(2);
            t.record_death();
            t.record_jump();
        }
        t1.reset_level();
        t2.resume_level();

        assert_eq!(t1.deaths(), t2.deaths());
        assert_eq!(t1.total_deaths(), t2.total_deaths());
        assert_eq!(t1.total_jumps(), t2.total_jumps());
    }

    #[test]
    fn subtraction_is_clamped_at_zero() {
        let store = Rc::new(MemoryStore::new());
        // A hand-edited save where deaths exceeds total_deaths
        store
            .set(SAVE_KEY, r#"{"current_level": 1, "deaths": 5, "total_deaths": 2}"#)
            .unwrap();
        let mut t = RunTracker::new(store, Rc::new(ManualClock::new(0.0)));
        t.reset_level();
        assert_eq!(t.total_deaths(), 1);
    }

    #[test]
    fn continue_current_level_does_not_subtract() {
        let mut t = tracker();
        t.start_level(3);
        t.record_death();
        t.record_jump();
        t.complete_level("three", false);
        let totals = (t.total_deaths(), t.total_jumps());

        t.continue_current_level();

        assert_eq!(t.deaths(), 1);
        assert_eq!(t.jumps(), 0);
        assert_eq!(t.total_deaths(), totals.0 + 1);
        assert_eq!(t.total_jumps(), totals.1);
    }

    #[test]
    fn complete_level_pins_the_measured_time() {
        let clock = Rc::new(ManualClock::new(10_000.0));
        let mut t = RunTracker::new(Rc::new(MemoryStore::new()), clock.clone());
        t.start_level(1);
        clock.advance(61_234.0);
        // Note: no tick_timer() fired since the start
        let summary = t.complete_level("one", true);

        assert_eq!(summary.level_id, 1);
        assert_eq!(summary.deaths, 1);
        assert_eq!(summary.time, 61_234.0);
        assert_eq!(t.elapsed_ms(), 61_234.0);

        let record = &t.completed_levels()[0];
        assert_eq!(record.name, "one");
        assert!(record.collected_bonus);
        assert_eq!(record.time, 61_234.0);
        assert_eq!(record.completed_at, 71_234.0);

        // Timer stopped: later samples must not move the pinned value
        clock.advance(5_000.0);
        t.tick_timer();
        assert_eq!(t.elapsed_ms(), 61_234.0);
    }

    #[test]
    fn replays_append_records_but_count_distinct_levels() {
        let mut t = tracker();
        t.start_level(1);
        t.complete_level("one", false);
        t.start_level(1);
        t.complete_level("one", true);
        t.start_level(2);
        t.complete_level("two", false);

        let stats = t.get_stats();
        assert_eq!(stats.level_history.len(), 3);
        assert_eq!(stats.completed_levels, 2);
    }

    #[test]
    fn stats_aggregates() {
        let clock = Rc::new(ManualClock::new(0.0));
        let mut t = RunTracker::new(Rc::new(MemoryStore::new()), clock.clone());

        t.start_level(1);
        clock.advance(10_000.0);
        t.complete_level("one", false);

        t.start_level(2);
        clock.advance(20_000.0);
        t.complete_level("two", false);

        t.start_level(3);
        t.record_death();
        clock.advance(5_000.0);
        t.tick_timer();

        let stats = t.get_stats();
        assert_eq!(stats.total_time, 35_000.0);
        assert_eq!(stats.average_time, 15_000.0);
        // 2 distinct completions over 4 attempts
        assert_eq!(stats.success_rate, 50);
        assert_eq!(stats.elapsed_ms, 5_000.0);
    }

    #[test]
    fn success_rate_is_zero_without_attempts() {
        let t = tracker();
        assert_eq!(t.get_stats().success_rate, 0);
        assert_eq!(t.get_stats().average_time, 0.0);
    }

    #[test]
    fn timer_pause_excludes_the_paused_span() {
        let clock = Rc::new(ManualClock::new(0.0));
        let mut t = RunTracker::new(Rc::new(MemoryStore::new()), clock.clone());
        t.start_level(1);
        clock.advance(2_000.0);
        t.tick_timer();
        t.pause_timer();
        clock.advance(60_000.0);
        t.resume_timer();
        clock.advance(1_000.0);
        t.tick_timer();
        assert_eq!(t.elapsed_ms(), 3_000.0);
    }

    #[test]
    fn save_round_trips_into_a_fresh_tracker() {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::new(1_000.0));

        let mut t = RunTracker::new(store.clone(), clock.clone());
        t.start_level(1);
        t.record_jump();
        t.record_death();
        clock.advance(9_000.0);
        t.complete_level("one", true);
        t.start_level(4);
        t.record_jump();
        t.record_jump();

        let restored = RunTracker::new(store, clock);
        assert_eq!(restored.current_level(), 4);
        assert_eq!(restored.deaths(), 1);
        assert_eq!(restored.jumps(), 2);
        assert_eq!(restored.total_deaths(), t.total_deaths());
        assert_eq!(restored.total_jumps(), t.total_jumps());
        assert_eq!(restored.completed_levels(), t.completed_levels());
    }

    #[test]
    fn loaded_deaths_are_clamped_to_one() {
        let store = Rc::new(MemoryStore::new());
        store
            .set(SAVE_KEY, r#"{"current_level": 2, "deaths": 0, "total_deaths": 4}"#)
            .unwrap();
        let t = RunTracker::new(store, Rc::new(ManualClock::new(0.0)));
        assert_eq!(t.deaths(), 1);
        assert_eq!(t.current_level(), 2);
        assert_eq!(t.total_deaths(), 4);
    }

    #[test]
    fn corrupt_save_is_ignored() {
        let store = Rc::new(MemoryStore::new());
        store.set(SAVE_KEY, "{ not json").unwrap();
        let t = RunTracker::new(store, Rc::new(ManualClock::new(0.0)));
        assert_eq!(t.current_level(), 1);
        assert_eq!(t.total_deaths(), 0);
    }

    #[test]
    fn reset_stats_clears_everything_and_erases_the_save() {
        let mut t = tracker();
        t.start_level(2);
        t.record_jump();
        t.record_death();
        t.complete_level("two", false);
        assert!(t.has_saved_game());

        t.reset_stats();

        assert_eq!(t.current_level(), 1);
        assert_eq!(t.deaths(), 1);
        assert_eq!(t.jumps(), 0);
        assert_eq!(t.total_deaths(), 0);
        assert_eq!(t.total_jumps(), 0);
        assert_eq!(t.elapsed_ms(), 0.0);
        assert!(t.completed_levels().is_empty());
        assert!(!t.has_saved_game());
    }

    #[test]
    fn has_and_clear_saved_game() {
        let mut t = tracker();
        assert!(!t.has_saved_game());
        t.start_level(1);
        assert!(t.has_saved_game());
        t.clear_saved_game();
        assert!(!t.has_saved_game());
    }

    #[test]
    fn broken_store_leaves_the_tracker_usable() {
        struct BrokenStore;
        impl KvStore for BrokenStore {
            fn get(&self, _key: &str) -> Result<Option<String>, String> {
                Err("quota exceeded".to_string())
            }
            fn set(&self, _key: &str, _value: &str) -> Result<(), String> {
                Err("quota exceeded".to_string())
            }
            fn remove(&self, _key: &str) -> Result<(), String> {
                Err("quota exceeded".to_string())
            }
        }

        let mut t = RunTracker::new(BrokenStore, Rc::new(ManualClock::new(0.0)));
        t.start_level(1);
        t.record_jump();
        t.record_death();
        let summary = t.complete_level("one", false);
        assert_eq!(summary.deaths, 2);
        assert_eq!(summary.jumps, 1);
        assert!(!t.has_saved_game());
    }
}
