//! Combo streak and score formula

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Hit streak inside a rolling [`COMBO_WINDOW_MS`] window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub count: u32,
    /// Time left before the streak lapses
    pub timer_ms: f32,
    pub max: u32,
}

impl Combo {
    /// Register a hit and return the new streak length
    pub fn register_hit(&mut self) -> u32 {
        self.count += 1;
        self.timer_ms = COMBO_WINDOW_MS;
        self.max = self.max.max(self.count);
        self.count
    }

    pub fn decay(&mut self, dt_ms: f32) {
        if self.timer_ms > 0.0 {
            self.timer_ms -= dt_ms;
            if self.timer_ms <= 0.0 {
                self.timer_ms = 0.0;
                self.count = 0;
            }
        }
    }

    /// Score multiplier for the current streak
    pub fn multiplier(&self) -> u64 {
        self.count.min(COMBO_CAP) as u64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Points for a hit at the given streak length
pub fn hit_score(combo: u32) -> u64 {
    HIT_SCORE * combo.min(COMBO_CAP) as u64
}

/// Bonus for a destroying hit at the given streak length
pub fn destroy_score(combo: u32) -> u64 {
    DESTROY_SCORE * combo.min(COMBO_CAP) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_within_window_stack() {
        let mut combo = Combo::default();
        combo.register_hit();
        combo.decay(1000.0);
        assert_eq!(combo.register_hit(), 2);
        assert_eq!(combo.max, 2);
    }

    #[test]
    fn test_streak_lapses() {
        let mut combo = Combo::default();
        combo.register_hit();
        combo.decay(2000.0);
        assert_eq!(combo.count, 0);
        assert_eq!(combo.timer_ms, 0.0);
        assert_eq!(combo.register_hit(), 1);
        assert_eq!(combo.max, 1);
    }

    #[test]
    fn test_score_formula_caps_at_ten() {
        assert_eq!(hit_score(1), 5);
        assert_eq!(hit_score(4), 20);
        assert_eq!(hit_score(25), 50);
        assert_eq!(destroy_score(3), 150);
        assert_eq!(destroy_score(12), 500);

        let mut combo = Combo::default();
        for _ in 0..15 {
            combo.register_hit();
        }
        assert_eq!(combo.multiplier(), 10);
        combo.reset();
        assert_eq!(combo, Combo::default());
    }
}
