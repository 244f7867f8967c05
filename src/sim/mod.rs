//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and
//! deterministic: advanced only by explicit host ticks, stable platform
//! iteration order, no rendering or platform dependencies.

pub mod collision;
pub mod engine;
pub mod state;

pub use collision::{overlaps_goal, resolve_platform_collisions};
pub use engine::PhysicsEngine;
pub use state::{PlayerState, Rect, StepOutcome};
