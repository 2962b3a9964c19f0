//! Scenario configuration
//!
//! A scenario is everything needed to reproduce one run: the salon
//! parameters, the barber roster, the customer population (explicit or
//! generated from a seed) and how far to simulate. Scenarios round-trip
//! through JSON so runs can be stored and replayed.
//!
//! # Example
//!
//! ```
//! use salon_simulator_core_rs::scenario::ScenarioConfig;
//!
//! let scenario = ScenarioConfig::standard_day();
//! let mut salon = scenario.build().unwrap();
//! let report = salon.simulate(scenario.horizon).unwrap();
//!
//! // The last haircuts may run past 17:00
//! assert!(report.closed_at.unwrap() >= 480);
//! assert_eq!(report.finished() + report.never_arrived, 48);
//! ```

use crate::arrivals::{ArrivalConfig, ArrivalGenerator, ArrivalProcess};
use crate::core::time::ClockFormat;
use crate::orchestrator::engine::{
    BarberConfig, CustomerConfig, Salon, SalonConfig, SimulationError, DEFAULT_MAX_WAIT,
    DEFAULT_SALON_NAME,
};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEED: u64 = 42;

/// One reproducible run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_name")]
    pub name: String,

    pub capacity: usize,

    pub open_time: usize,

    pub close_time: usize,

    #[serde(default = "default_max_wait")]
    pub max_wait: usize,

    /// Last minute to simulate (inclusive)
    pub horizon: usize,

    /// Wall-clock hour of minute 0, for display only
    #[serde(default = "default_hour_offset")]
    pub hour_offset: usize,

    pub barbers: Vec<BarberConfig>,

    /// Explicit customers; mutually exclusive with `arrivals`
    #[serde(default)]
    pub customers: Vec<CustomerConfig>,

    /// Generated customers, drawn with `seed`
    #[serde(default)]
    pub arrivals: Option<ArrivalConfig>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_name() -> String {
    DEFAULT_SALON_NAME.to_string()
}

fn default_max_wait() -> usize {
    DEFAULT_MAX_WAIT
}

fn default_hour_offset() -> usize {
    ClockFormat::DEFAULT_HOUR_OFFSET
}

impl ScenarioConfig {
    /// An eight-hour day from 09:00 to 17:00
    ///
    /// Four barbers work the morning, four the afternoon. Roughly one
    /// customer per ten minutes walks in, some up to ten minutes after
    /// closing. The horizon leaves room for the last haircut to finish.
    pub fn standard_day() -> Self {
        let shift_change = 4 * 60;
        let close_time = 8 * 60;

        let morning = ["Anne", "Ben", "Carol", "Derek"]
            .iter()
            .map(|name| BarberConfig::new(name, 0, shift_change));
        let afternoon = ["Erin", "Frank", "Gloria", "Heber"]
            .iter()
            .map(|name| BarberConfig::new(name, shift_change, close_time));

        Self {
            seed: DEFAULT_SEED,
            name: default_name(),
            capacity: 15,
            open_time: 0,
            close_time,
            max_wait: DEFAULT_MAX_WAIT,
            horizon: close_time + 40,
            hour_offset: ClockFormat::DEFAULT_HOUR_OFFSET,
            barbers: morning.chain(afternoon).collect(),
            customers: Vec::new(),
            arrivals: Some(ArrivalConfig {
                count: close_time / 10,
                window: (0, close_time + 10),
                service_range: (20, 40),
                process: ArrivalProcess::Uniform,
            }),
        }
    }

    /// Parse a scenario from JSON
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json)
            .map_err(|e| SimulationError::Serialization(format!("Invalid scenario: {}", e)))
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimulationError::Serialization(format!("Scenario serialization failed: {}", e)))
    }

    pub fn clock(&self) -> ClockFormat {
        ClockFormat::new(self.hour_offset)
    }

    /// Resolve the customer population and produce the salon configuration
    pub fn salon_config(&self) -> Result<SalonConfig, SimulationError> {
        let customers = match &self.arrivals {
            Some(_) if !self.customers.is_empty() => {
                return Err(SimulationError::InvalidConfig(
                    "Scenario lists customers and an arrival config; use one".to_string(),
                ));
            }
            Some(arrivals) => {
                let generator = ArrivalGenerator::new(arrivals.clone())
                    .map_err(|e| SimulationError::InvalidConfig(e.to_string()))?;
                let mut rng = RngManager::new(self.seed);
                generator.generate(&mut rng)
            }
            None => self.customers.clone(),
        };

        Ok(SalonConfig {
            name: self.name.clone(),
            capacity: self.capacity,
            open_time: self.open_time,
            close_time: self.close_time,
            max_wait: self.max_wait,
            barbers: self.barbers.clone(),
            customers,
        })
    }

    /// Build a salon positioned at minute 0
    pub fn build(&self) -> Result<Salon, SimulationError> {
        Salon::new(self.salon_config()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_day_shape() {
        let scenario = ScenarioConfig::standard_day();
        let config = scenario.salon_config().unwrap();

        assert_eq!(config.capacity, 15);
        assert_eq!(config.barbers.len(), 8);
        assert_eq!(config.customers.len(), 48);
        assert_eq!(scenario.horizon, 520);
        assert!(config.customers.iter().all(|c| c.arrival_time <= 490));
    }

    #[test]
    fn test_seed_controls_population() {
        let a = ScenarioConfig::standard_day();
        let mut b = ScenarioConfig::standard_day();
        b.seed = 7;

        assert_eq!(a.salon_config().unwrap(), a.salon_config().unwrap());
        assert_ne!(
            a.salon_config().unwrap().customers,
            b.salon_config().unwrap().customers
        );
    }

    #[test]
    fn test_customers_and_arrivals_are_exclusive() {
        let mut scenario = ScenarioConfig::standard_day();
        scenario.customers = vec![CustomerConfig::new("Walk-in", 0, 20)];

        assert!(matches!(
            scenario.build(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "capacity": 1,
            "open_time": 0,
            "close_time": 60,
            "horizon": 80,
            "barbers": [{"name": "Anne", "shift_start": 0, "shift_end": 60}],
            "customers": [{"name": "Customer-1", "arrival_time": 0, "service_duration": 20}]
        }"#;
        let scenario = ScenarioConfig::from_json(json).unwrap();

        assert_eq!(scenario.seed, DEFAULT_SEED);
        assert_eq!(scenario.max_wait, DEFAULT_MAX_WAIT);
        assert_eq!(scenario.hour_offset, 9);
        assert_eq!(scenario.arrivals, None);
        assert!(scenario.build().is_ok());
    }

    #[test]
    fn test_json_rejects_negative_times() {
        let json = r#"{
            "capacity": 1,
            "open_time": -5,
            "close_time": 60,
            "horizon": 80,
            "barbers": []
        }"#;

        assert!(matches!(
            ScenarioConfig::from_json(json),
            Err(SimulationError::Serialization(_))
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_standard_day() {
        let scenario = ScenarioConfig::standard_day();
        let parsed = ScenarioConfig::from_json(&scenario.to_json().unwrap()).unwrap();

        assert_eq!(parsed, scenario);
    }
}
