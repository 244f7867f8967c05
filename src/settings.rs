//! Game settings
//!
//! Produced by the host's responsive-scaling layer and handed to the physics
//! engine per call, so a window resize can swap in rescaled values between
//! ticks without touching engine state.

use serde::{Deserialize, Serialize};

/// Tuning and geometry inputs for the physics engine.
///
/// All values are trusted as-is: the engine performs no validation, and
/// nonsensical inputs (negative gravity, zero player size) produce
/// mathematically consistent but unplayable motion rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Playfield width in canvas pixels
    pub canvas_width: f32,
    /// Playfield height in canvas pixels
    pub canvas_height: f32,
    /// Player AABB width
    pub player_width: f32,
    /// Player AABB height
    pub player_height: f32,
    /// Downward acceleration per tick (canvas y grows downward)
    pub gravity: f32,
    /// Launch power per pixel of drag distance
    pub drag_multiplier: f32,
    /// Hard cap on launch power
    pub max_jump_power: f32,
    /// Drag length the input layer stops extending the aim guide at
    pub max_drag_distance: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        // Base design dimensions; the host scales these for the real viewport
        Self {
            canvas_width: 1000.0,
            canvas_height: 750.0,
            player_width: 40.0,
            player_height: 40.0,
            gravity: 0.5,
            drag_multiplier: 0.15,
            max_jump_power: 25.0,
            max_drag_distance: 200.0,
        }
    }
}

impl GameSettings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "jumping_up_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
