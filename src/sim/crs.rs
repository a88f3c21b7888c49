//! CRS stress meter
//!
//! A single scalar in `[0, max]`. Live hazards push it up in proportion to
//! their squared scale, destroying them pulls it down, and a hazard that
//! escapes the playfield adds a flat penalty. Shrunken clots contribute very
//! little, so killing big clots early is what keeps the meter low.

use serde::{Deserialize, Serialize};

use crate::config::CrsConfig;
use crate::consts::{ESCAPE_PENALTY_BASE, ESCAPE_PENALTY_PER_SCALE, REFERENCE_RADIUS};

/// Anything that loads the CRS meter while alive
pub trait HasScale {
    /// Current collision radius
    fn radius(&self) -> f32;

    /// Normalized size (1.0 = full-size). Defaults to `radius / 50`.
    fn scale(&self) -> f32 {
        self.radius() / REFERENCE_RADIUS
    }
}

/// CRS meter state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrsModel {
    pub current: f32,
    pub config: CrsConfig,
}

/// Read-only view of the meter for the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrsReading {
    pub value: f32,
    pub percentage: f32,
    pub critical: bool,
    pub failed: bool,
}

impl Default for CrsModel {
    fn default() -> Self {
        Self::new(CrsConfig::default())
    }
}

impl CrsModel {
    pub fn new(config: CrsConfig) -> Self {
        Self {
            current: 0.0,
            config,
        }
    }

    /// Accumulate load from every live hazard over `dt_ms`
    pub fn update<'a, H, I>(&mut self, hazards: I, dt_ms: f32)
    where
        H: HasScale + 'a,
        I: IntoIterator<Item = &'a H>,
    {
        let dt = dt_ms / 1000.0;
        let gain: f32 = hazards
            .into_iter()
            .map(|h| {
                let scale = h.scale();
                scale * scale * dt * self.config.accumulation_rate
            })
            .sum();
        self.add(gain);
    }

    /// A hazard of the given scale was destroyed
    pub fn on_destroyed(&mut self, scale: f32) {
        self.add(-self.config.recovery_rate * scale);
    }

    /// A hazard of the given scale left the playfield. Returns the penalty.
    pub fn on_escaped(&mut self, scale: f32) -> f32 {
        let penalty = ESCAPE_PENALTY_BASE + scale * ESCAPE_PENALTY_PER_SCALE;
        self.add(penalty);
        penalty
    }

    /// Direct relief (heal pickup)
    pub fn relieve(&mut self, amount: f32) {
        self.add(-amount.abs());
    }

    fn add(&mut self, delta: f32) {
        let next = self.current + delta;
        // NaN from a degenerate scale must not poison the meter
        self.current = if next.is_nan() {
            self.current
        } else {
            next.clamp(0.0, self.config.max)
        };
    }

    pub fn critical_threshold(&self) -> f32 {
        self.config.max * self.config.critical_fraction
    }

    pub fn is_critical(&self) -> bool {
        self.current >= self.critical_threshold()
    }

    pub fn is_failed(&self) -> bool {
        self.current >= self.config.max
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.config.max * 100.0
    }

    pub fn reset(&mut self) {
        self.current = 0.0;
    }

    pub fn reading(&self) -> CrsReading {
        CrsReading {
            value: self.current,
            percentage: self.percentage(),
            critical: self.is_critical(),
            failed: self.is_failed(),
        }
    }
}
