//! Arrival generation for deterministic customer populations.
//!
//! The generator produces the complete customer list for a day up front; the
//! salon itself never draws random numbers. All generation is deterministic
//! based on the RNG seed.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config → same customers
//! 2. **Two-phase naming**: raw draws are stable-sorted by arrival before
//!    `Customer-1..N` names are assigned, so names follow arrival order
//! 3. **Pluggable process**: uniform arrival times or exponential
//!    inter-arrival gaps
//!
//! # Example
//!
//! ```
//! use salon_simulator_core_rs::arrivals::{ArrivalConfig, ArrivalGenerator, ArrivalProcess};
//! use salon_simulator_core_rs::rng::RngManager;
//!
//! let config = ArrivalConfig {
//!     count: 10,
//!     window: (0, 490),
//!     service_range: (20, 40),
//!     process: ArrivalProcess::Uniform,
//! };
//! let generator = ArrivalGenerator::new(config).unwrap();
//!
//! let mut rng = RngManager::new(42);
//! let customers = generator.generate(&mut rng);
//!
//! assert_eq!(customers.len(), 10);
//! assert_eq!(customers[0].name, "Customer-1");
//! assert!(customers.windows(2).all(|w| w[0].arrival_time <= w[1].arrival_time));
//! ```

use crate::orchestrator::engine::CustomerConfig;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a day's walk-ins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalConfig {
    /// Number of customers to generate (upper bound for `Exponential`)
    pub count: usize,

    /// Arrival minutes `(first, last)`, inclusive
    pub window: (usize, usize),

    /// Service duration in minutes `(min, max)`, inclusive
    pub service_range: (usize, usize),

    #[serde(default)]
    pub process: ArrivalProcess,
}

/// How arrival minutes are drawn
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ArrivalProcess {
    /// Each arrival minute drawn independently and uniformly over the window
    #[default]
    Uniform,

    /// Poisson process: exponential gaps starting at the window start;
    /// generation stops at `count` customers or at the end of the window
    Exponential { mean_interarrival: f64 },
}

/// Arrival configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ArrivalError {
    #[error("Arrival window ({0}, {1}) is inverted")]
    InvertedWindow(usize, usize),

    #[error("Service range ({0}, {1}) is inverted")]
    InvertedServiceRange(usize, usize),

    #[error("Service duration minimum must be > 0")]
    ZeroServiceMinimum,

    #[error("Mean inter-arrival time must be positive and finite, got {0}")]
    InvalidMean(f64),
}

impl ArrivalConfig {
    pub fn validate(&self) -> Result<(), ArrivalError> {
        let (first, last) = self.window;
        if first > last {
            return Err(ArrivalError::InvertedWindow(first, last));
        }

        let (min, max) = self.service_range;
        if min > max {
            return Err(ArrivalError::InvertedServiceRange(min, max));
        }
        if min == 0 {
            return Err(ArrivalError::ZeroServiceMinimum);
        }

        if let ArrivalProcess::Exponential { mean_interarrival } = self.process {
            if !(mean_interarrival.is_finite() && mean_interarrival > 0.0) {
                return Err(ArrivalError::InvalidMean(mean_interarrival));
            }
        }

        Ok(())
    }
}

/// Generator for a day's customers.
#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    config: ArrivalConfig,
}

impl ArrivalGenerator {
    /// Create a generator from a validated configuration.
    pub fn new(config: ArrivalConfig) -> Result<Self, ArrivalError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ArrivalConfig {
        &self.config
    }

    /// Generate the customer list, ordered by arrival and named
    /// `Customer-1..N` in that order.
    pub fn generate(&self, rng: &mut RngManager) -> Vec<CustomerConfig> {
        let mut draws = match self.config.process {
            ArrivalProcess::Uniform => self.draw_uniform(rng),
            ArrivalProcess::Exponential { mean_interarrival } => {
                self.draw_exponential(mean_interarrival, rng)
            }
        };

        // Stable: ties keep draw order
        draws.sort_by_key(|&(arrival, _)| arrival);

        draws
            .into_iter()
            .enumerate()
            .map(|(i, (arrival_time, service_duration))| CustomerConfig {
                name: format!("Customer-{}", i + 1),
                arrival_time,
                service_duration,
            })
            .collect()
    }

    fn draw_uniform(&self, rng: &mut RngManager) -> Vec<(usize, usize)> {
        let (first, last) = self.config.window;

        (0..self.config.count)
            .map(|_| {
                let arrival = rng.range_inclusive(first, last);
                (arrival, self.sample_service(rng))
            })
            .collect()
    }

    fn draw_exponential(&self, mean: f64, rng: &mut RngManager) -> Vec<(usize, usize)> {
        let (first, last) = self.config.window;
        let mut draws = Vec::with_capacity(self.config.count);
        let mut clock = first as f64;

        while draws.len() < self.config.count {
            clock += rng.exponential(mean);
            let arrival = clock.floor() as usize;
            if arrival > last {
                break;
            }
            draws.push((arrival, self.sample_service(rng)));
        }

        draws
    }

    fn sample_service(&self, rng: &mut RngManager) -> usize {
        let (min, max) = self.config.service_range;
        rng.range_inclusive(min, max)
    }
}
