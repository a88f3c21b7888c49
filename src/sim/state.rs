//! Game state and session lifecycle
//!
//! [`GameState`] owns every entity collection, the CRS meter, combo and
//! power-up timers. Only the frame tick and the input methods here mutate it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::crs::{CrsModel, CrsReading};
use super::difficulty::Difficulty;
use super::entities::{ActivePowerUps, Clot, Player, PowerUp, PowerUpKind, Projectile};
use super::particles::{Particle, ParticleKind, ParticleSystem};
use super::scoring::Combo;
use crate::config::{ConfigError, GameConfig};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulates
    Menu,
    /// Active gameplay
    Playing,
    /// Declared for hosts; the frame loop never enters it
    Paused,
    /// CRS saturated
    GameOver,
    /// Informational overlay opened by the host
    ScienceModal,
}

/// Feedback events raised during a frame (the host turns these into shake)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Disturbance {
    LevelUp { level: u32 },
    ClotDestroyed { x: f32, y: f32, scale: f32 },
    ClotEscaped { x: f32, penalty: f32 },
    ShieldAbsorbed { x: f32 },
    CriticalEntered,
    GameOver,
}

impl Disturbance {
    /// Screen shake strength (0-1)
    pub fn intensity(&self) -> f32 {
        match self {
            Disturbance::LevelUp { .. } => 0.5,
            Disturbance::ClotDestroyed { .. } => 0.3,
            Disturbance::ClotEscaped { .. } => 0.6,
            Disturbance::ShieldAbsorbed { .. } => 0.2,
            Disturbance::CriticalEntered => 0.4,
            Disturbance::GameOver => 1.0,
        }
    }
}

/// Running counters for the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub elapsed_ms: f32,
    pub shots_fired: u32,
    pub hits: u32,
    pub clots_destroyed: u32,
    pub clots_escaped: u32,
    pub power_ups_collected: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level_name: String,
    pub difficulty_level: u32,
    pub difficulty_multiplier: f32,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub clots: Vec<Clot>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub crs: CrsReading,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub active_power_ups: ActivePowerUps,
    pub disturbances: Vec<Disturbance>,
    pub stats: SessionStats,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Index into `config.levels`
    pub level_index: usize,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub clots: Vec<Clot>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub crs: CrsModel,
    pub combo: Combo,
    pub score: u64,
    pub active_power_ups: ActivePowerUps,
    pub difficulty: Difficulty,
    pub fire_timer_ms: f32,
    pub spawn_timer_ms: f32,
    /// Latched so critical feedback fires once per excursion
    pub was_critical: bool,
    /// Raised during the most recent frame
    pub disturbances: Vec<Disturbance>,
    pub stats: SessionStats,
    next_id: u32,
}

impl GameState {
    /// Create a game sitting at the menu
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let player = Player::new(config.width, config.height);
        let particles = ParticleSystem::new(config.max_particles());
        let crs = CrsModel::new(config.crs);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level_index: 0,
            player,
            projectiles: Vec::new(),
            clots: Vec::new(),
            power_ups: Vec::new(),
            particles,
            crs,
            combo: Combo::default(),
            score: 0,
            active_power_ups: ActivePowerUps::default(),
            difficulty: Difficulty::default(),
            fire_timer_ms: 0.0,
            spawn_timer_ms: 0.0,
            was_critical: false,
            disturbances: Vec::new(),
            stats: SessionStats::default(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything and enter `Playing`. A malformed config refuses to
    /// start and leaves the state untouched.
    pub fn start_session(&mut self) -> Result<(), ConfigError> {
        let level_name = self.config.validate()?.name.clone();

        self.level_index = self.config.start_level;
        self.player = Player::new(self.config.width, self.config.height);
        self.projectiles.clear();
        self.clots.clear();
        self.power_ups.clear();
        self.particles = ParticleSystem::new(self.config.max_particles());
        self.crs = CrsModel::new(self.config.crs);
        self.combo.reset();
        self.score = 0;
        self.active_power_ups = ActivePowerUps::default();
        self.difficulty.reset();
        self.fire_timer_ms = 0.0;
        self.spawn_timer_ms = 0.0;
        self.was_critical = false;
        self.disturbances.clear();
        self.stats = SessionStats::default();
        self.next_id = 1;
        self.phase = GamePhase::Playing;

        log::info!("Session started (seed {}, level {})", self.seed, level_name);
        Ok(())
    }

    /// Open the informational overlay. Nothing simulates while it is up.
    pub fn show_science_modal(&mut self) {
        log::debug!("Science modal opened from {:?}", self.phase);
        self.phase = GamePhase::ScienceModal;
    }

    /// Pointer/touch moved. Ignored outside `Playing`.
    pub fn set_player_target(&mut self, x: f32) {
        if self.phase == GamePhase::Playing {
            self.player.set_target(x, self.config.width);
        }
    }

    /// Click/tap fire. Ignored outside `Playing`; leaves the auto-fire timer alone.
    pub fn fire_intent(&mut self) {
        if self.phase == GamePhase::Playing {
            self.fire();
        }
    }

    /// Spawn projectiles from the player's muzzle
    pub(crate) fn fire(&mut self) {
        let muzzle = self.player.muzzle();
        if self.active_power_ups.multi_shot() {
            for offset in [-MULTI_SHOT_SPREAD, 0.0, MULTI_SHOT_SPREAD] {
                let id = self.next_entity_id();
                self.projectiles
                    .push(Projectile::new(id, muzzle + Vec2::new(offset, 0.0)));
            }
        } else {
            let id = self.next_entity_id();
            self.projectiles.push(Projectile::new(id, muzzle));
        }
        self.stats.shots_fired += 1;
    }

    /// Roll a clot at the top of the playfield using the current speed scaling
    pub fn spawn_clot(&mut self) {
        let id = self.next_entity_id();
        let speed = self.difficulty.multiplier() * self.level_speed_multiplier();
        let clot = Clot::spawn(&mut self.rng, id, self.config.width, speed);
        self.clots.push(clot);
    }

    /// Drop a random power-up at `pos`
    pub fn spawn_power_up(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        let kind = PowerUpKind::random(&mut self.rng);
        self.power_ups.push(PowerUp::new(id, kind, pos));
    }

    /// Apply a collected power-up
    pub fn apply_power_up(&mut self, kind: PowerUpKind, pos: Vec2) {
        match kind {
            PowerUpKind::Heal => self.crs.relieve(HEAL_AMOUNT),
            _ => self.active_power_ups.activate(kind),
        }
        self.particles
            .burst(&mut self.rng, pos, PICKUP_BURST, 180.0, ParticleKind::Pickup);
        self.stats.power_ups_collected += 1;
        log::trace!("Power-up collected: {:?}", kind);
    }

    /// Base spawn interval for the active level
    pub fn level_spawn_interval_ms(&self) -> f32 {
        self.config
            .levels
            .get(self.level_index)
            .map(|l| l.spawn_rate_ms)
            .unwrap_or(BASE_SPAWN_INTERVAL_MS)
    }

    pub fn level_speed_multiplier(&self) -> f32 {
        self.config
            .levels
            .get(self.level_index)
            .map(|l| l.clot_speed_multiplier)
            .unwrap_or(1.0)
    }

    pub fn level_name(&self) -> &str {
        self.config
            .levels
            .get(self.level_index)
            .map(|l| l.name.as_str())
            .unwrap_or("Endless")
    }

    /// Current fire interval (rapid-fire aware)
    pub fn fire_interval_ms(&self) -> f32 {
        if self.active_power_ups.rapid_fire() {
            RAPID_FIRE_INTERVAL_MS
        } else {
            FIRE_INTERVAL_MS
        }
    }

    /// Read-only copy of everything the renderer draws
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            level_name: self.level_name().to_string(),
            difficulty_level: self.difficulty.level,
            difficulty_multiplier: self.difficulty.multiplier(),
            player: self.player.clone(),
            projectiles: self.projectiles.clone(),
            clots: self.clots.clone(),
            power_ups: self.power_ups.clone(),
            particles: self.particles.particles.clone(),
            crs: self.crs.reading(),
            score: self.score,
            combo: self.combo.count,
            max_combo: self.combo.max,
            active_power_ups: self.active_power_ups,
            disturbances: self.disturbances.clone(),
            stats: self.stats,
        }
    }
}
