//! Run summary
//!
//! A [`SimulationReport`] is computed from a salon at any point of the run
//! (usually after [`Salon::simulate`](super::Salon::simulate)). It carries
//! two SHA256 fingerprints:
//!
//! - `config_hash`: canonical JSON of the [`SalonConfig`]
//! - `trace_digest`: the rendered event trace
//!
//! Equal config hashes with different trace digests indicate
//! non-determinism.

use crate::models::customer::{CustomerOutcome, CustomerStatus};
use crate::orchestrator::engine::{Salon, SalonConfig, SimulationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Haircuts completed by one barber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarberSummary {
    pub name: String,
    pub customers_served: usize,
}

/// Summary of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub salon: String,

    /// Ticks executed (including the closing tick)
    pub minutes_simulated: usize,

    pub closed_at: Option<usize>,

    pub satisfied: usize,
    pub abandoned: usize,
    pub rejected_full: usize,
    pub rejected_closed: usize,
    pub rejected_no_server: usize,

    /// Scheduled after the last simulated minute
    pub never_arrived: usize,

    /// Admitted and not yet served (only non-zero before closing)
    pub still_waiting: usize,

    /// In a barber's chair when the report was taken
    pub in_service: usize,

    pub total_events: usize,

    pub barbers: Vec<BarberSummary>,

    pub config_hash: String,

    pub trace_digest: String,
}

impl SimulationReport {
    pub fn from_salon(salon: &Salon) -> Result<Self, SimulationError> {
        let state = salon.state();
        let count = |outcome: CustomerOutcome| {
            state.count_with_status(CustomerStatus::Finished(outcome))
        };

        let barbers = state
            .barbers()
            .iter()
            .map(|b| BarberSummary {
                name: b.name().to_string(),
                customers_served: b.customers_served(),
            })
            .collect();

        Ok(Self {
            salon: salon.name().to_string(),
            minutes_simulated: salon.closed_at().map_or(salon.current_minute(), |m| m + 1),
            closed_at: salon.closed_at(),
            satisfied: count(CustomerOutcome::Satisfied),
            abandoned: count(CustomerOutcome::Abandoned),
            rejected_full: count(CustomerOutcome::RejectedFull),
            rejected_closed: count(CustomerOutcome::RejectedClosed),
            rejected_no_server: count(CustomerOutcome::RejectedNoServer),
            never_arrived: state.count_with_status(CustomerStatus::NotStarted),
            still_waiting: state.queue_size(),
            in_service: state.customers_in_service().len(),
            total_events: salon.event_count(),
            barbers,
            config_hash: compute_config_hash(salon.config())?,
            trace_digest: salon.event_log().digest(),
        })
    }

    /// Customers who left without a haircut
    pub fn unsatisfied(&self) -> usize {
        self.abandoned + self.rejected_full + self.rejected_closed + self.rejected_no_server
    }

    /// Customers that reached a final outcome
    pub fn finished(&self) -> usize {
        self.satisfied + self.unsatisfied()
    }
}

/// Compute SHA256 hash of a configuration
///
/// Object keys are sorted recursively before hashing so that field order
/// never changes the result.
pub fn compute_config_hash(config: &SalonConfig) -> Result<String, SimulationError> {
    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
