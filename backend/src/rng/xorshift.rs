//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG used by the arrival generator. Same seed, same
//! sequence: a scenario replayed with its seed yields the identical customer
//! population and therefore the identical event trace.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use salon_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let minute = rng.range(0, 480); // [0, 480)
/// let duration = rng.range_inclusive(20, 40); // [20, 40]
/// assert!(minute < 480);
/// assert!((20..=40).contains(&duration));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    pub fn new(seed: u64) -> Self {
        // xorshift state must never be zero
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        assert!(min < max, "min must be less than max");

        let span = (max - min) as u64;
        min + (self.next() % span) as usize
    }

    /// Generate random value in range [min, max]
    ///
    /// # Panics
    /// Panics if min > max
    pub fn range_inclusive(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "min must not exceed max");
        self.range(min, max + 1)
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        // top 53 bits scaled into the unit interval
        (self.next() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Sample an exponentially distributed value with the given mean
    ///
    /// Uses inverse transform sampling. Used for inter-arrival gaps of a
    /// Poisson arrival process.
    ///
    /// # Example
    /// ```
    /// use salon_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// let gap = rng.exponential(10.0);
    /// assert!(gap >= 0.0);
    /// ```
    pub fn exponential(&mut self, mean: f64) -> f64 {
        assert!(mean > 0.0, "mean must be positive");
        // 1 - u lies in (0, 1], keeping ln finite
        let u = 1.0 - self.next_f64();
        -u.ln() * mean
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
