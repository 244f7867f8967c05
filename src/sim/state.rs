//! Player state and level geometry types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas coordinates (y grows downward).
///
/// Platforms and the goal region both arrive from the level data owner as
/// rectangles in the same space as the player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// The player's kinematic state.
///
/// Owned exclusively by [`PhysicsEngine`](super::PhysicsEngine) and mutated
/// only through its operations. `is_jumping` doubles as the Idle/Airborne
/// state flag: the update step is a no-op while grounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left corner of the player AABB
    pub position: Vec2,
    /// Velocity in canvas pixels per tick
    pub velocity: Vec2,
    /// Airborne flag; gravity applies only while set
    pub is_jumping: bool,
    /// Landed on a platform during the last collision pass
    pub is_on_platform: bool,
}

/// Outcome of one physics tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Player still in play
    Playing,
    /// Player's bottom edge passed the canvas bottom
    Fell,
}
