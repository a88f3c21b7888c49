//! Per-frame simulation tick
//!
//! The host calls [`GameState::advance_frame`] once per animation frame. The
//! order of steps below matters: collisions see this frame's movement, the
//! CRS meter sees what survived collisions and escapes, and the failure check
//! runs before anything else can change the meter.

use super::collision::{collect_power_ups, cull_escaped_clots, resolve_projectile_hits};
use super::state::{Disturbance, GamePhase, GameState, Snapshot};
use crate::consts::MAX_FRAME_DT_MS;

/// Clamp a host-supplied frame time to `[0, MAX_FRAME_DT_MS]`
pub fn clamp_frame_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() {
        dt_ms.clamp(0.0, MAX_FRAME_DT_MS)
    } else {
        0.0
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, dt_ms: f32) {
    state.disturbances.clear();

    // Only live play simulates
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = clamp_frame_dt(dt_ms);
    let width = state.config.width;
    let height = state.config.height;
    state.stats.elapsed_ms += dt;

    // Difficulty ramp
    if let Some(level) = state.difficulty.tick(dt) {
        log::debug!(
            "Difficulty level {} (x{:.1})",
            level,
            state.difficulty.multiplier()
        );
        state.disturbances.push(Disturbance::LevelUp { level });
    }

    state.player.update(width);

    // Auto-fire
    state.fire_timer_ms += dt;
    if state.fire_timer_ms > state.fire_interval_ms() {
        state.fire_timer_ms = 0.0;
        state.fire();
    }

    state.projectiles.retain_mut(|p| p.update());

    // Spawning
    state.spawn_timer_ms += dt;
    let spawn_interval = state
        .difficulty
        .spawn_interval_ms(state.level_spawn_interval_ms());
    if state.spawn_timer_ms >= spawn_interval {
        state.spawn_timer_ms = 0.0;
        let count = state.difficulty.spawn_count(&mut state.rng);
        for _ in 0..count {
            state.spawn_clot();
        }
    }

    for clot in state.clots.iter_mut() {
        clot.update(dt, width);
    }

    resolve_projectile_hits(state);
    cull_escaped_clots(state);

    state.crs.update(&state.clots, dt);
    if check_crs(state) {
        return;
    }

    state.power_ups.retain_mut(|p| p.update(height));
    collect_power_ups(state);

    state.combo.decay(dt);
    state.active_power_ups.decay(dt);
    state.particles.update(dt);
}

/// Raise critical feedback on entry and end the session on saturation.
/// Returns true once the game is over.
fn check_crs(state: &mut GameState) -> bool {
    let critical = state.crs.is_critical();
    if critical && !state.was_critical {
        log::info!("CRS critical ({:.1}%)", state.crs.percentage());
        state.disturbances.push(Disturbance::CriticalEntered);
    }
    state.was_critical = critical;

    if state.crs.is_failed() {
        state.phase = GamePhase::GameOver;
        state.disturbances.push(Disturbance::GameOver);
        log::info!(
            "Game over: score {}, max combo {}, {} clots destroyed, {} escaped, survived {:.1}s",
            state.score,
            state.combo.max,
            state.stats.clots_destroyed,
            state.stats.clots_escaped,
            state.stats.elapsed_ms / 1000.0
        );
        return true;
    }
    false
}

impl GameState {
    /// Run one frame and return what the renderer should draw
    pub fn advance_frame(&mut self, dt_ms: f32) -> Snapshot {
        tick(self, dt_ms);
        self.snapshot()
    }
}
