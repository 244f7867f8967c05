//! Jumping Up - a drag-to-launch vertical platformer core
//!
//! Core modules:
//! - `sim`: Deterministic physics (player kinematics, platform collisions)
//! - `stats`: Run tracker (attempts, jumps, level timer, completion history)
//! - `persistence`: Save/load of run state as a JSON envelope
//! - `platform`: Browser/native abstraction for storage and time
//!
//! Rendering, input capture and level data are host concerns: the host reads
//! a drag gesture, calls [`sim::PhysicsEngine::jump`], ticks
//! [`sim::PhysicsEngine::update`] once per frame, and routes the outcomes
//! (`Fell`, goal overlap) into the [`stats::RunTracker`] lifecycle.

pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod stats;

pub use settings::GameSettings;
pub use sim::{PhysicsEngine, StepOutcome};
pub use stats::RunTracker;

/// Install the browser panic/logging hooks. The wasm host calls this once
/// before constructing the engine or tracker.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = initHooks)]
pub fn init_hooks() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Game configuration constants
pub mod consts {
    /// Horizontal velocity retained on landing
    pub const FRICTION: f32 = 0.95;
    /// Horizontal velocity scale on a side bounce (applied with a sign flip)
    pub const SIDE_BOUNCE: f32 = 0.3;
    /// Cadence at which the host should sample the level timer (ms)
    pub const TIMER_SAMPLE_MS: f64 = 100.0;
}
