//! Domain models for the salon simulator

pub mod barber;
pub mod customer;
pub mod event;
pub mod state;

// Re-exports
pub use barber::{Barber, BarberError, BarberId, BarberStatus, ServiceTicket};
pub use customer::{Customer, CustomerError, CustomerId, CustomerOutcome, CustomerStatus};
pub use event::{Event, EventLog, EventRecord};
pub use state::SalonState;
