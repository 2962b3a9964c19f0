//! Barber model
//!
//! A barber works one shift `[shift_start, shift_end)` and serves one
//! customer at a time.
//!
//! Lifecycle: `NotStarted → OnShift ⇄ Serving → Finished`. `Finished` is
//! reachable from `OnShift` (shift over while idle) or straight from
//! `Serving` (the haircut that straddles the shift end completes first).
//!
//! The only way into `Serving` is [`Barber::assign`], called by the salon's
//! matching phase.

use crate::models::customer::{CustomerId, CustomerOutcome};
use crate::models::event::Event;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a barber in the simulation state (registration order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BarberId(pub usize);

/// The customer currently in the chair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTicket {
    pub customer: CustomerId,
    pub customer_name: String,
    /// Minute at which the haircut finishes
    pub ends_at: usize,
}

/// Barber status
///
/// The service ticket lives inside `Serving`, so "has a current customer"
/// and "has a service end" can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarberStatus {
    NotStarted,
    OnShift,
    Serving(ServiceTicket),
    Finished,
}

impl BarberStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BarberStatus::NotStarted => "NotStarted",
            BarberStatus::OnShift => "OnShift",
            BarberStatus::Serving(_) => "Serving",
            BarberStatus::Finished => "Finished",
        }
    }
}

/// Contract violations on barber transitions
#[derive(Debug, Error, PartialEq)]
pub enum BarberError {
    #[error("Barber {name} cannot {action} while {status}")]
    InvalidTransition {
        name: String,
        action: &'static str,
        status: &'static str,
    },

    #[error("Barber {name} still serving at minute {minute}, haircut was due at {ends_at}")]
    ServiceOverrun {
        name: String,
        minute: usize,
        ends_at: usize,
    },

    #[error("Service duration must be positive")]
    ZeroDuration,
}

/// A shift-scheduled barber
///
/// # Example
/// ```
/// use salon_simulator_core_rs::{Barber, CustomerId};
///
/// let mut barber = Barber::new("Anne".to_string(), 0, 240);
/// let events = barber.tick(0).unwrap();
/// assert_eq!(events[0].message(), "started shift");
///
/// barber.assign(0, CustomerId(0), "Customer-1", 20).unwrap();
/// assert_eq!(barber.service_ends_at(), Some(20));
///
/// let events = barber.tick(20).unwrap();
/// assert_eq!(events[0].message(), "ended cutting [Customer-1]'s hair");
/// assert!(barber.is_idle());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barber {
    name: String,
    shift_start: usize,
    shift_end: usize,
    status: BarberStatus,
    /// Haircuts completed so far
    customers_served: usize,
}

impl Barber {
    /// Create a barber whose shift has not started
    ///
    /// # Panics
    /// Panics if `shift_end <= shift_start`
    pub fn new(name: String, shift_start: usize, shift_end: usize) -> Self {
        assert!(shift_end > shift_start, "shift must end after it starts");

        Self {
            name,
            shift_start,
            shift_end,
            status: BarberStatus::NotStarted,
            customers_served: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shift_start(&self) -> usize {
        self.shift_start
    }

    pub fn shift_end(&self) -> usize {
        self.shift_end
    }

    pub fn status(&self) -> &BarberStatus {
        &self.status
    }

    pub fn customers_served(&self) -> usize {
        self.customers_served
    }

    /// On shift and not serving anyone
    pub fn is_idle(&self) -> bool {
        self.status == BarberStatus::OnShift
    }

    pub fn is_finished(&self) -> bool {
        self.status == BarberStatus::Finished
    }

    pub fn current_customer(&self) -> Option<CustomerId> {
        match &self.status {
            BarberStatus::Serving(ticket) => Some(ticket.customer),
            _ => None,
        }
    }

    pub fn service_ends_at(&self) -> Option<usize> {
        match &self.status {
            BarberStatus::Serving(ticket) => Some(ticket.ends_at),
            _ => None,
        }
    }

    /// Advance the barber by one minute
    ///
    /// - `NotStarted`: shift starts exactly at `shift_start`
    /// - `OnShift`: goes home once `minute >= shift_end`
    /// - `Serving`: finishes the haircut exactly at its end minute, then
    ///   either returns to `OnShift` or, if the shift is over, goes home in
    ///   the same minute
    pub fn tick(&mut self, minute: usize) -> Result<Vec<Event>, BarberError> {
        let mut events = Vec::new();

        match &self.status {
            BarberStatus::NotStarted if minute == self.shift_start => {
                self.status = BarberStatus::OnShift;
                events.push(Event::ShiftStarted {
                    minute,
                    barber: self.name.clone(),
                });
            }
            BarberStatus::OnShift if minute >= self.shift_end => {
                events.push(self.end_shift(minute));
            }
            BarberStatus::Serving(ticket) if minute == ticket.ends_at => {
                let customer = ticket.customer_name.clone();

                events.push(Event::HaircutEnded {
                    minute,
                    barber: self.name.clone(),
                    customer: customer.clone(),
                });
                events.push(Event::CustomerLeft {
                    minute,
                    customer,
                    outcome: CustomerOutcome::Satisfied,
                });
                self.customers_served += 1;

                if self.shift_end > minute {
                    self.status = BarberStatus::OnShift;
                } else {
                    events.push(self.end_shift(minute));
                }
            }
            BarberStatus::Serving(ticket) if minute > ticket.ends_at => {
                return Err(BarberError::ServiceOverrun {
                    name: self.name.clone(),
                    minute,
                    ends_at: ticket.ends_at,
                });
            }
            _ => {}
        }

        Ok(events)
    }

    /// Seat a customer; only an idle barber can take one
    pub fn assign(
        &mut self,
        minute: usize,
        customer: CustomerId,
        customer_name: &str,
        service_duration: usize,
    ) -> Result<Event, BarberError> {
        if !self.is_idle() {
            return Err(BarberError::InvalidTransition {
                name: self.name.clone(),
                action: "start a haircut",
                status: self.status.label(),
            });
        }
        if service_duration == 0 {
            return Err(BarberError::ZeroDuration);
        }

        self.status = BarberStatus::Serving(ServiceTicket {
            customer,
            customer_name: customer_name.to_string(),
            ends_at: minute + service_duration,
        });

        Ok(Event::HaircutStarted {
            minute,
            barber: self.name.clone(),
            customer: customer_name.to_string(),
        })
    }

    fn end_shift(&mut self, minute: usize) -> Event {
        self.status = BarberStatus::Finished;
        Event::ShiftEnded {
            minute,
            barber: self.name.clone(),
        }
    }
}
