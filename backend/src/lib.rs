//! Salon Simulator Core - Rust Engine
//!
//! Discrete-time simulation of a barber salon with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Time management and clock display
//! - **models**: Domain types (Customer, Barber, Event, State)
//! - **orchestrator**: Main simulation loop and run reports
//! - **arrivals**: Seeded customer population generation
//! - **scenario**: Reproducible run configuration (JSON)
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Time is a whole number of minutes (usize)
//! 2. All randomness is deterministic (seeded RNG) and stays outside the
//!    salon's tick loop
//! 3. The waiting queue never exceeds capacity at the end of a tick

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod scenario;

// Re-exports for convenience
pub use arrivals::{ArrivalConfig, ArrivalError, ArrivalGenerator, ArrivalProcess};
pub use core::time::{ClockFormat, TimeManager};
pub use models::{
    barber::{Barber, BarberError, BarberId, BarberStatus, ServiceTicket},
    customer::{Customer, CustomerError, CustomerId, CustomerOutcome, CustomerStatus},
    event::{Event, EventLog, EventRecord},
    state::SalonState,
};
pub use orchestrator::{
    BarberConfig, CustomerConfig, Salon, SalonConfig, SimulationError, SimulationReport,
    TickResult,
};
pub use rng::RngManager;
pub use scenario::ScenarioConfig;
