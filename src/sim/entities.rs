//! Entity types: player, projectiles, clots and power-ups
//!
//! Each entity owns its own per-frame physics. Collections and cross-entity
//! interactions live in [`super::state::GameState`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::crs::HasScale;
use super::geom::{ease_out_cubic, lerp, reflect_between};
use crate::consts::*;

/// The player's emitter, sliding along a fixed row near the bottom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal position the player is easing toward
    pub target_x: f32,
    pub radius: f32,
    pub lerp_factor: f32,
}

impl Player {
    /// Centered on the bottom row of a `width` x `height` playfield
    pub fn new(width: f32, height: f32) -> Self {
        let x = width / 2.0;
        Self {
            pos: Vec2::new(x, height - PLAYER_BOTTOM_OFFSET),
            target_x: x,
            radius: PLAYER_RADIUS,
            lerp_factor: PLAYER_LERP,
        }
    }

    /// Ease toward the target once. The step is per frame, not per ms.
    pub fn update(&mut self, width: f32) {
        self.pos.x = lerp(self.pos.x, self.target_x, self.lerp_factor);
        self.pos.x = self.pos.x.clamp(0.0, width);
    }

    pub fn set_target(&mut self, x: f32, width: f32) {
        if x.is_finite() {
            self.target_x = x.clamp(0.0, width);
        }
    }

    /// Where new projectiles appear
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.radius)
    }
}

/// Trail point for projectile rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub opacity: f32,
}

/// A player-fired pulse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Upward speed (px per frame)
    pub speed: f32,
    /// Newest first, at most [`TRAIL_LENGTH`]
    pub trail: Vec<TrailPoint>,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: PROJECTILE_RADIUS,
            speed: PROJECTILE_SPEED,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Move one frame; returns false once fully above the playfield
    pub fn update(&mut self) -> bool {
        for point in self.trail.iter_mut() {
            point.opacity = (point.opacity - TRAIL_FADE_PER_FRAME).max(0.0);
        }
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                opacity: 1.0,
            },
        );
        self.trail.truncate(TRAIL_LENGTH);

        self.pos.y -= self.speed;
        self.pos.y + self.radius >= 0.0
    }
}

/// Cosmetic fibrin strand radiating from a clot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Strand {
    pub angle: f32,
    /// Length relative to the clot's current radius
    pub length: f32,
}

/// Cosmetic platelet stuck to a clot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platelet {
    /// Offset relative to the clot's current radius
    pub offset: Vec2,
    pub size: f32,
}

/// Result of hitting a clot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Shrunk,
    Destroyed,
}

/// A descending clot. Shrinks on every hit until it is gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clot {
    pub id: u32,
    pub pos: Vec2,
    /// x = horizontal drift, y = downward speed (px per frame)
    pub vel: Vec2,
    pub base_radius: f32,
    pub radius: f32,
    pub min_radius: f32,
    pub shrink_per_hit: f32,
    /// Time alive in ms
    pub residence_ms: f32,
    /// Whether destroying this clot drops a power-up
    pub drops_power_up: bool,
    /// Hit flash (0-1, decays over time)
    pub flash: f32,
    pub strands: Vec<Strand>,
    pub platelets: Vec<Platelet>,
}

impl Clot {
    /// Fully deterministic clot, mainly for hosts and tests that script waves
    pub fn new(id: u32, pos: Vec2, base_radius: f32, shrink_per_hit: f32, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            base_radius,
            radius: base_radius,
            min_radius: CLOT_MIN_RADIUS,
            shrink_per_hit,
            residence_ms: 0.0,
            drops_power_up: false,
            flash: 0.0,
            strands: Vec::new(),
            platelets: Vec::new(),
        }
    }

    /// Roll a new clot just above the playfield
    pub fn spawn<R: Rng>(rng: &mut R, id: u32, width: f32, speed_multiplier: f32) -> Self {
        let base_radius = rng.random_range(CLOT_MIN_BASE_RADIUS..=CLOT_MAX_BASE_RADIUS);
        let x = if width > 2.0 * base_radius {
            rng.random_range(base_radius..=width - base_radius)
        } else {
            width / 2.0
        };
        let speed = rng.random_range(CLOT_MIN_SPEED..=CLOT_MAX_SPEED) * speed_multiplier;
        let drift = rng.random_range(-CLOT_MAX_DRIFT..=CLOT_MAX_DRIFT);
        let shrink = rng.random_range(CLOT_MIN_SHRINK..=CLOT_MAX_SHRINK);

        let mut clot = Self::new(
            id,
            Vec2::new(x, -base_radius),
            base_radius,
            shrink,
            Vec2::new(drift, speed),
        );
        clot.drops_power_up = rng.random_bool(CLOT_DROP_CHANCE);

        let strand_count = rng.random_range(3..=5);
        clot.strands = (0..strand_count)
            .map(|_| Strand {
                angle: rng.random_range(0.0..std::f32::consts::TAU),
                length: rng.random_range(0.3..0.6),
            })
            .collect();
        let platelet_count = rng.random_range(2..=4);
        clot.platelets = (0..platelet_count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let dist = rng.random_range(0.2..0.7);
                Platelet {
                    offset: Vec2::new(angle.cos(), angle.sin()) * dist,
                    size: rng.random_range(0.1..0.2),
                }
            })
            .collect();
        clot
    }

    /// Advance one frame, reflecting off the side walls
    pub fn update(&mut self, dt_ms: f32, width: f32) {
        self.pos += self.vel;
        let (x, drift) = reflect_between(self.pos.x, self.vel.x, self.radius, width - self.radius);
        self.pos.x = x;
        self.vel.x = drift;
        self.residence_ms += dt_ms;
        if self.flash > 0.0 {
            self.flash = (self.flash - dt_ms / HIT_FLASH_MS).max(0.0);
        }
    }

    /// Shrink by one hit
    pub fn hit(&mut self) -> HitOutcome {
        self.radius = (self.radius - self.shrink_per_hit.max(0.0)).max(0.0);
        self.flash = 1.0;
        if self.radius <= self.min_radius {
            HitOutcome::Destroyed
        } else {
            HitOutcome::Shrunk
        }
    }

    /// Hits needed to destroy this clot from its current radius
    pub fn hits_remaining(&self) -> u32 {
        if self.radius <= self.min_radius {
            return 0;
        }
        if self.shrink_per_hit <= 0.0 {
            return u32::MAX;
        }
        ((self.radius - self.min_radius) / self.shrink_per_hit).ceil() as u32
    }

    /// Fully below the playfield
    pub fn has_escaped(&self, height: f32) -> bool {
        self.pos.y - self.radius > height
    }

    /// Flash intensity for rendering
    pub fn flash_intensity(&self) -> f32 {
        ease_out_cubic(self.flash)
    }
}

impl HasScale for Clot {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn scale(&self) -> f32 {
        if self.base_radius > 0.0 {
            self.radius / self.base_radius
        } else {
            self.radius / REFERENCE_RADIUS
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    Heal,
    MultiShot,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Heal,
        PowerUpKind::MultiShot,
        PowerUpKind::Shield,
    ];

    /// Effect duration; `None` for instantaneous effects
    pub fn duration_ms(&self) -> Option<f32> {
        match self {
            PowerUpKind::RapidFire => Some(RAPID_FIRE_DURATION_MS),
            PowerUpKind::Heal => None,
            PowerUpKind::MultiShot => Some(MULTI_SHOT_DURATION_MS),
            PowerUpKind::Shield => Some(SHIELD_DURATION_MS),
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Downward speed (px per frame)
    pub speed: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: POWERUP_RADIUS,
            speed: POWERUP_SPEED,
        }
    }

    /// Fall one frame; returns false once well past the bottom edge
    pub fn update(&mut self, height: f32) -> bool {
        self.pos.y += self.speed;
        self.pos.y <= height + POWERUP_OFFSCREEN_MARGIN
    }

    /// Pickup test against the player's center
    pub fn touches(&self, player_center: Vec2) -> bool {
        self.pos.distance(player_center) < self.radius + POWERUP_PICKUP_MARGIN
    }
}

/// Remaining time on each timed power-up (ms, never negative)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUps {
    pub rapid_fire_ms: f32,
    pub multi_shot_ms: f32,
    pub shield_ms: f32,
}

impl ActivePowerUps {
    /// Start (or restart) a timed effect. Instantaneous kinds are ignored.
    pub fn activate(&mut self, kind: PowerUpKind) {
        let Some(duration) = kind.duration_ms() else {
            return;
        };
        match kind {
            PowerUpKind::RapidFire => self.rapid_fire_ms = duration,
            PowerUpKind::MultiShot => self.multi_shot_ms = duration,
            PowerUpKind::Shield => self.shield_ms = duration,
            PowerUpKind::Heal => {}
        }
    }

    pub fn decay(&mut self, dt_ms: f32) {
        self.rapid_fire_ms = (self.rapid_fire_ms - dt_ms).max(0.0);
        self.multi_shot_ms = (self.multi_shot_ms - dt_ms).max(0.0);
        self.shield_ms = (self.shield_ms - dt_ms).max(0.0);
    }

    pub fn rapid_fire(&self) -> bool {
        self.rapid_fire_ms > 0.0
    }

    pub fn multi_shot(&self) -> bool {
        self.multi_shot_ms > 0.0
    }

    pub fn shield(&self) -> bool {
        self.shield_ms > 0.0
    }

    pub fn remaining(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::RapidFire => self.rapid_fire_ms,
            PowerUpKind::MultiShot => self.multi_shot_ms,
            PowerUpKind::Shield => self.shield_ms,
            PowerUpKind::Heal => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_player_eases_and_clamps() {
        let mut player = Player::new(800.0, 600.0);
        assert_eq!(player.pos, Vec2::new(400.0, 530.0));
        player.set_target(500.0, 800.0);
        player.update(800.0);
        assert!((player.pos.x - 412.0).abs() < 1e-4);

        player.set_target(5000.0, 800.0);
        assert_eq!(player.target_x, 800.0);
        for _ in 0..500 {
            player.update(800.0);
        }
        assert!(player.pos.x <= 800.0);
        assert!((player.pos.x - 800.0).abs() < 0.01);

        player.set_target(f32::NAN, 800.0);
        assert_eq!(player.target_x, 800.0);
    }

    #[test]
    fn test_projectile_moves_up_and_keeps_short_trail() {
        let mut p = Projectile::new(1, Vec2::new(100.0, 100.0));
        for _ in 0..9 {
            assert!(p.update());
        }
        assert_eq!(p.pos.y, 10.0);
        assert_eq!(p.trail.len(), 9);
        for _ in 0..3 {
            p.update();
        }
        assert_eq!(p.trail.len(), TRAIL_LENGTH);
        assert_eq!(p.trail[0].opacity, 1.0);
        assert!(p.trail[TRAIL_LENGTH - 1].opacity < 0.2);
        while p.update() {}
        assert!(p.pos.y + p.radius < 0.0);
    }

    #[test]
    fn test_clot_bounces_off_walls() {
        let mut clot = Clot::new(1, Vec2::new(795.0, 0.0), 30.0, 5.0, Vec2::new(1.0, 1.0));
        clot.update(16.0, 800.0);
        assert_eq!(clot.pos.x, 770.0);
        assert_eq!(clot.vel.x, -1.0);
        assert_eq!(clot.pos.y, 1.0);
        assert_eq!(clot.residence_ms, 16.0);

        let mut clot = Clot::new(2, Vec2::new(20.0, 0.0), 30.0, 5.0, Vec2::new(-1.0, 1.0));
        clot.update(16.0, 800.0);
        assert_eq!(clot.pos.x, 30.0);
        assert_eq!(clot.vel.x, 1.0);
    }

    #[test]
    fn test_clot_hits_until_destroyed() {
        let mut clot = Clot::new(1, Vec2::ZERO, 30.0, 6.0, Vec2::ZERO);
        assert_eq!(clot.hits_remaining(), 4);
        assert_eq!(clot.hit(), HitOutcome::Shrunk); // 24
        assert_eq!(clot.flash, 1.0);
        assert_eq!(clot.hit(), HitOutcome::Shrunk); // 18
        assert_eq!(clot.hit(), HitOutcome::Shrunk); // 12
        assert_eq!(clot.hit(), HitOutcome::Destroyed); // 6
        assert!((clot.scale() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_flash_decays() {
        let mut clot = Clot::new(1, Vec2::new(100.0, 0.0), 30.0, 6.0, Vec2::ZERO);
        clot.hit();
        clot.update(100.0, 800.0);
        assert!((clot.flash - 0.5).abs() < 1e-5);
        clot.update(150.0, 800.0);
        assert_eq!(clot.flash, 0.0);
        assert_eq!(clot.flash_intensity(), 0.0);
    }

    #[test]
    fn test_spawned_clot_is_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..200 {
            let clot = Clot::spawn(&mut rng, id, 800.0, 1.8);
            assert!(clot.pos.x >= clot.base_radius && clot.pos.x <= 800.0 - clot.base_radius);
            assert_eq!(clot.pos.y, -clot.base_radius);
            assert!(clot.vel.y >= CLOT_MIN_SPEED * 1.8 - 1e-4);
            assert!(clot.vel.y <= CLOT_MAX_SPEED * 1.8 + 1e-4);
            assert!((3..=5).contains(&clot.strands.len()));
            assert!((2..=4).contains(&clot.platelets.len()));
            assert_eq!(clot.scale(), 1.0);
            assert!(clot.hits_remaining() >= 3);
        }
    }

    #[test]
    fn test_scale_fallback() {
        let mut clot = Clot::new(1, Vec2::ZERO, 0.0, 5.0, Vec2::ZERO);
        clot.radius = 25.0;
        assert_eq!(clot.scale(), 0.5);
    }

    #[test]
    fn test_power_up_pickup_uses_margin() {
        let p = PowerUp::new(1, PowerUpKind::Shield, Vec2::new(0.0, 0.0));
        assert!(p.touches(Vec2::new(43.0, 0.0)));
        assert!(!p.touches(Vec2::new(44.0, 0.0)));
    }

    #[test]
    fn test_power_up_leaves_field() {
        let mut p = PowerUp::new(1, PowerUpKind::Heal, Vec2::new(0.0, 648.0));
        assert!(p.update(600.0));
        assert!(!p.update(600.0));
    }

    #[test]
    fn test_active_power_ups() {
        let mut active = ActivePowerUps::default();
        active.activate(PowerUpKind::RapidFire);
        active.activate(PowerUpKind::Heal);
        assert!(active.rapid_fire());
        assert!(!active.multi_shot());
        active.decay(RAPID_FIRE_DURATION_MS - 10.0);
        assert_eq!(active.remaining(PowerUpKind::RapidFire), 10.0);
        active.activate(PowerUpKind::RapidFire);
        assert_eq!(active.rapid_fire_ms, RAPID_FIRE_DURATION_MS);
        active.decay(1.0e6);
        assert_eq!(active, ActivePowerUps::default());
    }

    proptest! {
        #[test]
        fn clot_radius_never_grows(
            base in 20.0f32..60.0,
            shrink in 0.5f32..10.0,
            hits in 1usize..40,
        ) {
            let mut clot = Clot::new(1, Vec2::ZERO, base, shrink, Vec2::ZERO);
            let mut last = clot.radius;
            for _ in 0..hits {
                let outcome = clot.hit();
                prop_assert!(clot.radius <= last);
                prop_assert_eq!(
                    outcome == HitOutcome::Destroyed,
                    clot.radius <= clot.min_radius
                );
                last = clot.radius;
            }
        }
    }
}
