//! Coin flips that decide which particle of a colliding pair is removed.
//!
//! [`WallClockCoin`] is the default and reseeds from the system clock on
//! every flip. That makes consecutive flips within one clock tick correlated
//! and costs an RNG construction per collision; [`SeededCoin`] and
//! [`FixedCoin`] exist for reproducible runs and tests.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Which member of a colliding pair `(first, second)` gets removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    fn from_bool(first: bool) -> Self {
        if first {
            Side::First
        } else {
            Side::Second
        }
    }
}

/// Source of collision coin flips.
pub trait CoinFlip {
    fn flip(&mut self) -> Side;
}

/// Current wall-clock time as a seed.
pub fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

/// Unweighted coin, freshly seeded from the clock on every flip.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClockCoin;

impl CoinFlip for WallClockCoin {
    fn flip(&mut self) -> Side {
        let mut rng = SmallRng::seed_from_u64(wall_clock_seed());
        Side::from_bool(rng.gen_bool(0.5))
    }
}

/// Unweighted coin seeded once.
#[derive(Debug, Clone)]
pub struct SeededCoin {
    rng: SmallRng,
}

impl SeededCoin {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl CoinFlip for SeededCoin {
    fn flip(&mut self) -> Side {
        Side::from_bool(self.rng.gen_bool(0.5))
    }
}

/// Always lands on the same side.
#[derive(Debug, Clone, Copy)]
pub struct FixedCoin(pub Side);

impl CoinFlip for FixedCoin {
    fn flip(&mut self) -> Side {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_coin() {
        let mut coin = FixedCoin(Side::Second);
        assert!((0..10).all(|_| coin.flip() == Side::Second));
    }

    #[test]
    fn test_seeded_coin_is_reproducible() {
        let mut a = SeededCoin::new(11);
        let mut b = SeededCoin::new(11);
        let xs: Vec<Side> = (0..64).map(|_| a.flip()).collect();
        let ys: Vec<Side> = (0..64).map(|_| b.flip()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_seeded_coin_lands_both_ways() {
        let mut coin = SeededCoin::new(5);
        let firsts = (0..1000).filter(|_| coin.flip() == Side::First).count();
        assert!(firsts > 400 && firsts < 600, "biased coin: {firsts}/1000");
    }

    #[test]
    fn test_wall_clock_coin_flips() {
        let mut coin = WallClockCoin;
        let side = coin.flip();
        assert!(matches!(side, Side::First | Side::Second));
    }
}
