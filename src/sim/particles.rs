//! Decorative particles
//!
//! Particles never affect gameplay; they only need to advance with the frame
//! so the host has something to draw.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::ease_out_cubic;

/// What spawned a particle (host picks the color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Hit,
    Burst,
    Pickup,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity in px/s
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// 0-1, decreases over time
    pub life: f32,
    /// Full lifetime in ms
    pub lifetime_ms: f32,
    pub size: f32,
}

impl Particle {
    /// Size after easing out with age
    pub fn display_size(&self) -> f32 {
        self.size * ease_out_cubic(self.life)
    }
}

/// Bounded particle pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub max: usize,
}

impl ParticleSystem {
    pub fn new(max: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max),
            max,
        }
    }

    /// Emit `count` particles radiating from `origin`. Drops the oldest
    /// particles when the pool is full.
    pub fn burst<R: Rng>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        count: usize,
        speed: f32,
        kind: ParticleKind,
    ) {
        if self.max == 0 {
            return;
        }
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let magnitude = speed * rng.random_range(0.4..1.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * magnitude,
                kind,
                life: 1.0,
                lifetime_ms: rng.random_range(300.0..700.0),
                size: rng.random_range(2.0..5.0),
            });
        }
        let overflow = self.particles.len().saturating_sub(self.max);
        if overflow > 0 {
            self.particles.drain(..overflow);
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        let dt = dt_ms / 1000.0;
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel *= 0.95;
            particle.life -= dt_ms / particle.lifetime_ms;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::new(8);
        system.burst(&mut rng, Vec2::ZERO, 6, 100.0, ParticleKind::Hit);
        system.burst(&mut rng, Vec2::ZERO, 6, 100.0, ParticleKind::Burst);
        assert_eq!(system.len(), 8);
        // Oldest were dropped
        assert_eq!(system.particles[0].kind, ParticleKind::Hit);
        assert_eq!(system.particles[7].kind, ParticleKind::Burst);
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut system = ParticleSystem::new(50);
        system.burst(&mut rng, Vec2::new(10.0, 10.0), 10, 200.0, ParticleKind::Pickup);
        system.update(16.0);
        assert_eq!(system.len(), 10);
        assert!(system.particles.iter().all(|p| p.pos != Vec2::new(10.0, 10.0)));
        for _ in 0..50 {
            system.update(16.0);
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_disabled_pool() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new(0);
        system.burst(&mut rng, Vec2::ZERO, 20, 100.0, ParticleKind::Burst);
        assert!(system.is_empty());
    }
}
