//! Jumping Up entry point
//!
//! The real game shell (canvas rendering, drag capture, level data) is the
//! host application; this binary runs a headless scripted session natively to
//! exercise the physics and the run tracker end to end.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use jumping_up::platform::storage::MemoryStore;
    use jumping_up::platform::time::SystemClock;
    use jumping_up::sim::{PhysicsEngine, Rect, StepOutcome};
    use jumping_up::stats::{RunTracker, format_time};
    use jumping_up::{GameSettings, consts};

    env_logger::init();
    log::info!("Jumping Up (headless) starting...");

    let settings = GameSettings::default();
    let mut engine = PhysicsEngine::new(settings);
    let mut tracker = RunTracker::new(MemoryStore::new(), SystemClock::new());

    // A small three-step level in base coordinates
    let platforms = [
        Rect::new(0.0, 700.0, 1000.0, 50.0),
        Rect::new(250.0, 560.0, 180.0, 20.0),
        Rect::new(520.0, 430.0, 180.0, 20.0),
        Rect::new(780.0, 300.0, 180.0, 20.0),
    ];
    let goal = Rect::new(840.0, 230.0, 60.0, 70.0);
    let spawn = (80.0, 700.0 - settings.player_height);

    tracker.start_level(1);
    engine.set_position(spawn.0, spawn.1);

    // Scripted drag gestures (distance, angle); up is negative y
    let drags = [
        (170.0, -1.05_f32),
        (165.0, -1.10),
        (160.0, -1.00),
        (150.0, -1.15),
        (140.0, -0.95),
    ];

    'session: for (distance, angle) in drags {
        engine.jump(distance, angle);
        tracker.record_jump();

        for _ in 0..600 {
            tracker.tick_timer();
            match engine.update(&platforms, settings.canvas_height) {
                StepOutcome::Fell => {
                    log::info!("Fell off the level, respawning");
                    tracker.record_death();
                    engine.reset();
                    engine.set_position(spawn.0, spawn.1);
                    break;
                }
                StepOutcome::Playing => {}
            }

            if engine.check_goal_collision(&goal) {
                let summary = tracker.complete_level("First Ascent", true);
                log::info!(
                    "Level {} complete in {} ({} attempts, {} jumps)",
                    summary.level_id,
                    format_time(summary.time),
                    summary.deaths,
                    summary.jumps,
                );
                break 'session;
            }

            if !engine.player().is_jumping {
                break;
            }
        }
    }

    let stats = tracker.get_stats();
    println!(
        "level {} | attempts {} | jumps {} | completed {} | time {} | success {}%",
        stats.current_level,
        stats.deaths,
        stats.jumps,
        stats.completed_levels,
        format_time(stats.total_time),
        stats.success_rate,
    );
    println!(
        "friction {} | side bounce {} | timer cadence {} ms",
        consts::FRICTION,
        consts::SIDE_BOUNCE,
        consts::TIMER_SAMPLE_MS,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm host drives the library directly; no binary entry point
}
