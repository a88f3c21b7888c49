//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod crs;
pub mod difficulty;
pub mod entities;
pub mod geom;
pub mod particles;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{ScanOutcome, collect_power_ups, cull_escaped_clots, resolve_projectile_hits};
pub use crs::{CrsModel, CrsReading, HasScale};
pub use difficulty::Difficulty;
pub use entities::{
    ActivePowerUps, Clot, HitOutcome, Platelet, Player, PowerUp, PowerUpKind, Projectile, Strand,
    TrailPoint,
};
pub use particles::{Particle, ParticleKind, ParticleSystem};
pub use scoring::Combo;
pub use state::{Disturbance, GamePhase, GameState, SessionStats, Snapshot};
pub use tick::{clamp_frame_dt, tick};
