//! Tick-driven physics engine
//!
//! Advances the player only when the host loop calls [`PhysicsEngine::update`]
//! - there is no internal timer. Integration is semi-implicit Euler: gravity
//! is applied to velocity before velocity is applied to position.

use super::collision::{overlaps_goal, resolve_platform_collisions};
use super::state::{PlayerState, Rect, StepOutcome};
use crate::settings::GameSettings;

/// Owns the player's kinematic state and resolves it against level geometry.
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    settings: GameSettings,
    player: PlayerState,
}

impl PhysicsEngine {
    /// Engine with a zeroed, grounded player.
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            player: PlayerState::default(),
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Swap in rescaled settings (e.g. after a viewport resize).
    pub fn set_settings(&mut self, settings: GameSettings) {
        self.settings = settings;
    }

    /// Launch the player from a drag gesture.
    ///
    /// Power grows linearly with drag distance and is hard-capped at
    /// `max_jump_power`. The engine does not refuse a mid-air launch; the
    /// caller decides when the player may jump.
    pub fn jump(&mut self, drag_distance: f32, drag_angle: f32) {
        let power = (drag_distance * self.settings.drag_multiplier).min(self.settings.max_jump_power);

        self.player.velocity.x = drag_angle.cos() * power;
        self.player.velocity.y = drag_angle.sin() * power;

        self.player.is_jumping = true;
        self.player.is_on_platform = false;
    }

    /// Advance one tick. No-op while grounded.
    ///
    /// Order matters: gravity, integration, platform collisions, fall check
    /// (early return, skipping the clamp), horizontal clamp.
    pub fn update(&mut self, platforms: &[Rect], canvas_height: f32) -> StepOutcome {
        if !self.player.is_jumping {
            return StepOutcome::Playing;
        }

        self.player.velocity.y += self.settings.gravity;

        self.player.position.x += self.player.velocity.x;
        self.player.position.y += self.player.velocity.y;

        resolve_platform_collisions(&mut self.player, platforms, &self.settings);

        if self.player.position.y + self.settings.player_height > canvas_height {
            return StepOutcome::Fell;
        }

        if self.player.position.x < 0.0 {
            self.player.position.x = 0.0;
            self.player.velocity.x = 0.0;
        }
        if self.player.position.x + self.settings.player_width > self.settings.canvas_width {
            self.player.position.x = self.settings.canvas_width - self.settings.player_width;
            self.player.velocity.x = 0.0;
        }

        StepOutcome::Playing
    }

    /// Strict AABB overlap with the goal region.
    pub fn check_goal_collision(&self, goal: &Rect) -> bool {
        overlaps_goal(&self.player, goal, &self.settings)
    }

    /// Teleport to a spawn point: zero velocity, grounded.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.player.position.x = x;
        self.player.position.y = y;
        self.player.velocity.x = 0.0;
        self.player.velocity.y = 0.0;
        self.player.is_jumping = false;
        self.player.is_on_platform = true;
    }

    /// Zero velocity and ground the player without moving it.
    pub fn reset(&mut self) {
        self.player.velocity.x = 0.0;
        self.player.velocity.y = 0.0;
        self.player.is_jumping = false;
        self.player.is_on_platform = true;
    }

    /// Force the airborne state without a launch, e.g. when the platform
    /// under the player disappears. Velocity is left untouched.
    pub fn start_falling(&mut self) {
        self.player.is_jumping = true;
        self.player.is_on_platform = false;
    }
}
