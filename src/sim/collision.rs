//! Platform collision resolution
//!
//! The tricky part of Jumping Up: a fast-falling player can cross an entire
//! platform in one tick, so every check is swept - it compares the edge
//! position a tick ago (current minus velocity) against the boundary instead
//! of testing only the current overlap.
//!
//! Three categories are evaluated per platform inside one loop body:
//! - landing (from above): player center-x over the platform span, `vy >= 0`;
//!   first match wins and ends the scan
//! - head hit (from below): `vy < 0`; corrects y only, scan continues
//! - side hit: full vertical overlap, nonzero `vx`; damped bounce, scan
//!   continues
//!
//! The player's edge coordinates are captured once at pass entry. Corrections
//! applied mid-scan move the player but later platforms are still tested
//! against the captured edges (velocity is read live). A platform can
//! therefore apply both a head and a side correction in the same tick before
//! a later platform claims the landing.

use super::state::{PlayerState, Rect};
use crate::consts::{FRICTION, SIDE_BOUNCE};
use crate::settings::GameSettings;

/// Resolve the player against every platform for one tick.
///
/// Returns true if the player landed on a platform. `is_on_platform` and
/// `is_jumping` are updated accordingly.
pub fn resolve_platform_collisions(
    player: &mut PlayerState,
    platforms: &[Rect],
    settings: &GameSettings,
) -> bool {
    let player_bottom = player.position.y + settings.player_height;
    let player_left = player.position.x;
    let player_right = player.position.x + settings.player_width;
    let player_top = player.position.y;
    let player_center_x = player.position.x + settings.player_width / 2.0;

    let mut on_platform = false;

    for platform in platforms {
        // Center-x over the span reads as a fair landing; full-AABB overlap
        // makes toe-catches on the very edge feel unfair
        let horizontal_overlap =
            player_center_x > platform.left() && player_center_x < platform.right();
        let vertical_overlap =
            player_bottom > platform.top() && player_top < platform.bottom();

        // Landing from above, swept across the platform top
        if horizontal_overlap && player.velocity.y >= 0.0 {
            let previous_bottom = player_bottom - player.velocity.y;
            if previous_bottom <= platform.top() && player_bottom >= platform.top() {
                player.position.y = platform.top() - settings.player_height;
                player.velocity.y = 0.0;
                player.velocity.x *= FRICTION;
                player.is_jumping = false;
                on_platform = true;
                break;
            }
        }

        // Head hit from below, swept across the platform bottom
        if horizontal_overlap && player.velocity.y < 0.0 {
            let previous_top = player_top - player.velocity.y;
            if previous_top >= platform.bottom() && player_top <= platform.bottom() {
                player.position.y = platform.bottom();
                player.velocity.y = 0.0;
            }
        }

        // Side hit on whichever horizontal edge is advancing
        if vertical_overlap && player.velocity.x != 0.0 {
            if player.velocity.x > 0.0 {
                let previous_right = player_right - player.velocity.x;
                if previous_right <= platform.left() && player_right >= platform.left() {
                    player.position.x = platform.left() - settings.player_width;
                    player.velocity.x = -player.velocity.x * SIDE_BOUNCE;
                }
            } else {
                let previous_left = player_left - player.velocity.x;
                if previous_left >= platform.right() && player_left <= platform.right() {
                    player.position.x = platform.right();
                    player.velocity.x = -player.velocity.x * SIDE_BOUNCE;
                }
            }
        }
    }

    player.is_on_platform = on_platform;
    on_platform
}

/// Strict AABB overlap between the player and the goal region.
///
/// Touching edges do not count: a player flush against the goal boundary has
/// not reached it yet.
pub fn overlaps_goal(player: &PlayerState, goal: &Rect, settings: &GameSettings) -> bool {
    let player_bottom = player.position.y + settings.player_height;
    let player_left = player.position.x;
    let player_right = player.position.x + settings.player_width;
    let player_top = player.position.y;

    player_right > goal.left()
        && player_left < goal.right()
        && player_bottom > goal.top()
        && player_top < goal.bottom()
}
