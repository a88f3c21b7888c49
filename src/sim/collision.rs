//! Projectile/clot collision scan and scoring
//!
//! Every live projectile is tested against every live clot. A projectile is
//! consumed by the first clot it overlaps in collection order. Removals are
//! staged and applied once the whole scan is done, so a clot can take several
//! hits in one frame, but a clot staged as destroyed is skipped by every later
//! projectile and can only pay out its destruction bonus once.

use glam::Vec2;

use super::crs::HasScale;
use super::entities::HitOutcome;
use super::geom::circles_intersect;
use super::particles::ParticleKind;
use super::scoring::{destroy_score, hit_score};
use super::state::{Disturbance, GameState};
use crate::consts::*;

/// What one scan did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub hits: u32,
    pub destroyed: u32,
}

/// Resolve all projectile hits for this frame
pub fn resolve_projectile_hits(state: &mut GameState) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let mut spent = vec![false; state.projectiles.len()];
    let mut destroyed = vec![false; state.clots.len()];
    let mut drops: Vec<Vec2> = Vec::new();

    for (pi, projectile) in state.projectiles.iter().enumerate() {
        for (ci, clot) in state.clots.iter_mut().enumerate() {
            if destroyed[ci] {
                continue;
            }
            if !circles_intersect(projectile.pos, projectile.radius, clot.pos, clot.radius) {
                continue;
            }

            spent[pi] = true;
            outcome.hits += 1;
            state.stats.hits += 1;

            state
                .particles
                .burst(&mut state.rng, projectile.pos, HIT_BURST, 150.0, ParticleKind::Hit);

            let combo = state.combo.register_hit();
            state.score += hit_score(combo);

            if clot.hit() == HitOutcome::Destroyed {
                destroyed[ci] = true;
                outcome.destroyed += 1;
                state.stats.clots_destroyed += 1;

                let scale = clot.scale();
                state.score += destroy_score(combo);
                state.crs.on_destroyed(scale);
                if clot.drops_power_up {
                    drops.push(clot.pos);
                }
                state
                    .particles
                    .burst(&mut state.rng, clot.pos, DESTROY_BURST, 260.0, ParticleKind::Burst);
                state.disturbances.push(Disturbance::ClotDestroyed {
                    x: clot.pos.x,
                    y: clot.pos.y,
                    scale,
                });
            }
            break;
        }
    }

    let mut i = 0;
    state.projectiles.retain(|_| {
        let keep = !spent[i];
        i += 1;
        keep
    });
    let mut i = 0;
    state.clots.retain(|_| {
        let keep = !destroyed[i];
        i += 1;
        keep
    });

    for pos in drops {
        state.spawn_power_up(pos);
    }

    outcome
}

/// Remove clots that slipped past the bottom edge and charge the CRS penalty
/// (absorbed while a shield is up). Returns how many escaped.
pub fn cull_escaped_clots(state: &mut GameState) -> usize {
    let height = state.config.height;
    let mut escaped: Vec<(f32, f32)> = Vec::new();
    state.clots.retain(|clot| {
        if clot.has_escaped(height) {
            escaped.push((clot.pos.x, clot.scale()));
            false
        } else {
            true
        }
    });

    for &(x, scale) in &escaped {
        state.stats.clots_escaped += 1;
        if state.active_power_ups.shield() {
            state.disturbances.push(Disturbance::ShieldAbsorbed { x });
            continue;
        }
        let penalty = state.crs.on_escaped(scale);
        state
            .disturbances
            .push(Disturbance::ClotEscaped { x, penalty });
    }
    escaped.len()
}

/// Collect any power-ups touching the player
pub fn collect_power_ups(state: &mut GameState) -> usize {
    let center = state.player.pos;
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        if p.touches(center) {
            collected.push((p.kind, p.pos));
            false
        } else {
            true
        }
    });
    for &(kind, pos) in &collected {
        state.apply_power_up(kind, pos);
    }
    collected.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entities::{Clot, PowerUp, PowerUpKind, Projectile};

    fn playing_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 77);
        state.start_session().unwrap();
        state
    }

    fn clot_at(state: &mut GameState, pos: Vec2, base: f32, shrink: f32) {
        let id = state.next_entity_id();
        state.clots.push(Clot::new(id, pos, base, shrink, Vec2::ZERO));
    }

    fn projectile_at(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(id, pos));
    }

    #[test]
    fn test_single_hit_scores_and_consumes_projectile() {
        let mut state = playing_state();
        clot_at(&mut state, Vec2::new(200.0, 200.0), 30.0, 5.0);
        projectile_at(&mut state, Vec2::new(200.0, 220.0));
        projectile_at(&mut state, Vec2::new(600.0, 220.0));

        let outcome = resolve_projectile_hits(&mut state);
        assert_eq!(outcome, ScanOutcome { hits: 1, destroyed: 0 });
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos.x, 600.0);
        assert_eq!(state.clots[0].radius, 25.0);
        assert_eq!(state.combo.count, 1);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_projectile_hits_first_clot_only() {
        let mut state = playing_state();
        clot_at(&mut state, Vec2::new(200.0, 200.0), 30.0, 5.0);
        clot_at(&mut state, Vec2::new(210.0, 200.0), 30.0, 5.0);
        projectile_at(&mut state, Vec2::new(205.0, 200.0));

        resolve_projectile_hits(&mut state);
        assert_eq!(state.clots[0].radius, 25.0);
        assert_eq!(state.clots[1].radius, 30.0);
    }

    #[test]
    fn test_destroyed_clot_pays_out_once() {
        let mut state = playing_state();
        // One hit destroys it: 12 - 5 = 7 <= 10
        clot_at(&mut state, Vec2::new(200.0, 200.0), 12.0, 5.0);
        state.crs.current = 50.0;
        for _ in 0..3 {
            projectile_at(&mut state, Vec2::new(200.0, 205.0));
        }

        let outcome = resolve_projectile_hits(&mut state);
        assert_eq!(outcome, ScanOutcome { hits: 1, destroyed: 1 });
        assert!(state.clots.is_empty());
        // Only the first projectile was consumed
        assert_eq!(state.projectiles.len(), 2);
        // hit 5 + destroy 50 at combo 1
        assert_eq!(state.score, 55);
        let scale = 7.0 / 12.0;
        assert!((state.crs.current - (50.0 - 5.0 * scale)).abs() < 1e-4);
        let destroyed_events = state
            .disturbances
            .iter()
            .filter(|d| matches!(d, Disturbance::ClotDestroyed { .. }))
            .count();
        assert_eq!(destroyed_events, 1);
    }

    #[test]
    fn test_multiple_hits_in_one_scan_build_combo() {
        let mut state = playing_state();
        clot_at(&mut state, Vec2::new(300.0, 200.0), 40.0, 5.0);
        for _ in 0..3 {
            projectile_at(&mut state, Vec2::new(300.0, 230.0));
        }
        let outcome = resolve_projectile_hits(&mut state);
        assert_eq!(outcome.hits, 3);
        assert_eq!(state.clots[0].radius, 25.0);
        assert_eq!(state.combo.count, 3);
        // 5*1 + 5*2 + 5*3
        assert_eq!(state.score, 30);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_drop_flag_spawns_power_up() {
        let mut state = playing_state();
        clot_at(&mut state, Vec2::new(200.0, 200.0), 12.0, 5.0);
        state.clots[0].drops_power_up = true;
        projectile_at(&mut state, Vec2::new(200.0, 200.0));
        resolve_projectile_hits(&mut state);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_escape_penalty_and_shield() {
        let mut state = playing_state();
        clot_at(&mut state, Vec2::new(200.0, 700.0), 30.0, 5.0);
        clot_at(&mut state, Vec2::new(300.0, 590.0), 30.0, 5.0);
        assert_eq!(cull_escaped_clots(&mut state), 1);
        assert_eq!(state.clots.len(), 1);
        assert_eq!(state.crs.current, 40.0);
        assert!(matches!(
            state.disturbances[0],
            Disturbance::ClotEscaped { penalty, .. } if penalty == 40.0
        ));

        state.active_power_ups.activate(PowerUpKind::Shield);
        state.clots[0].pos.y = 700.0;
        assert_eq!(cull_escaped_clots(&mut state), 1);
        assert_eq!(state.crs.current, 40.0);
        assert_eq!(state.stats.clots_escaped, 2);
    }

    #[test]
    fn test_collect_power_up_near_player_center() {
        let mut state = playing_state();
        let center = state.player.pos;
        let id = state.next_entity_id();
        state
            .power_ups
            .push(PowerUp::new(id, PowerUpKind::MultiShot, center + Vec2::new(40.0, 0.0)));
        let id = state.next_entity_id();
        state
            .power_ups
            .push(PowerUp::new(id, PowerUpKind::Shield, center + Vec2::new(0.0, -100.0)));
        assert_eq!(collect_power_ups(&mut state), 1);
        assert!(state.active_power_ups.multi_shot());
        assert_eq!(state.power_ups.len(), 1);
    }
}
