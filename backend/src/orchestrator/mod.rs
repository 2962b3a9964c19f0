//! Orchestrator - the salon's tick loop
//!
//! See `engine.rs` for the phase order and `report.rs` for run summaries.

pub mod engine;
pub mod report;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use engine::{
    BarberConfig, CustomerConfig, Salon, SalonConfig, SimulationError, TickResult,
    DEFAULT_MAX_WAIT, DEFAULT_SALON_NAME,
};
pub use report::{compute_config_hash, BarberSummary, SimulationReport};
