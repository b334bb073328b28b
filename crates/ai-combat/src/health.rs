#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a single hit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Alive,
    /// This hit was the killing blow. Reported exactly once per `Health`.
    Died,
    AlreadyDead,
}

/// Hit points of a damageable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Health {
    current: f32,
    max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Health-bar fill in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    /// Negative amounts are ignored; this never heals.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::AlreadyDead;
        }
        self.current -= amount.max(0.0);
        if self.is_dead() {
            DamageOutcome::Died
        } else {
            DamageOutcome::Alive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dies_exactly_once() {
        let mut health = Health::new(50.0);
        assert_eq!(health.apply_damage(30.0), DamageOutcome::Alive);
        assert_eq!(health.apply_damage(20.0), DamageOutcome::Died);
        assert_eq!(health.apply_damage(20.0), DamageOutcome::AlreadyDead);
        assert_eq!(health.fraction(), 0.0);
    }

    #[test]
    fn fraction_tracks_damage() {
        let mut health = Health::default();
        health.apply_damage(25.0);
        assert!((health.fraction() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut health = Health::new(10.0);
        health.apply_damage(-5.0);
        assert_eq!(health.current(), 10.0);
    }
}
