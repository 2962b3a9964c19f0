//! Customer model
//!
//! A customer walks in at `arrival_time`, is either admitted to the waiting
//! queue or turned away on the spot, and eventually leaves with exactly one
//! [`CustomerOutcome`].
//!
//! Lifecycle: `NotStarted → Arrived → Queued → Finished`. `Arrived` is
//! transient: the salon resolves an arrived customer to `Queued` or
//! `Finished` within the tick of arrival.
//!
//! Only two transitions are self-driven by [`Customer::tick`] (arrival and
//! deadline expiry). Admission, rejection, start of service and the
//! end-of-day turn-away are triggered by the salon.

use crate::models::event::Event;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a customer in the simulation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub usize);

/// Final outcome of a customer's visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerOutcome {
    /// Matched with a barber; service always completes once started
    Satisfied,

    /// Waited until the queue deadline without being served
    Abandoned,

    /// Arrived while the waiting queue was at capacity
    RejectedFull,

    /// Arrived after closing time
    RejectedClosed,

    /// Still waiting when the last barber went home
    RejectedNoServer,
}

impl CustomerOutcome {
    /// Text logged when the customer leaves with this outcome
    pub fn departure_message(&self) -> &'static str {
        match self {
            CustomerOutcome::Satisfied => "left satisfied",
            CustomerOutcome::Abandoned => "left unfulfilled",
            CustomerOutcome::RejectedFull => "left impatiently",
            CustomerOutcome::RejectedClosed => "left cursing themselves",
            CustomerOutcome::RejectedNoServer => "left furiously",
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, CustomerOutcome::Satisfied)
    }
}

/// Customer status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    /// Not yet walked in
    NotStarted,

    /// Walked in this tick, admission pending
    Arrived,

    /// Waiting in the salon's queue
    Queued,

    /// Terminal; carries the outcome decided at the transition
    Finished(CustomerOutcome),
}

/// Contract violations on customer transitions
#[derive(Debug, Error, PartialEq)]
pub enum CustomerError {
    #[error("Customer {name} cannot {action} while {status:?}")]
    InvalidTransition {
        name: String,
        action: &'static str,
        status: CustomerStatus,
    },

    #[error("Customer {name} still queued at minute {minute}, past deadline {deadline}")]
    DeadlineOverrun {
        name: String,
        minute: usize,
        deadline: usize,
    },

    #[error("{0:?} is not an admission rejection")]
    NotARejection(CustomerOutcome),
}

/// A salon customer
///
/// # Example
/// ```
/// use salon_simulator_core_rs::{Customer, CustomerStatus};
///
/// let mut customer = Customer::new("Customer-1".to_string(), 5, 25);
/// assert!(customer.tick(4).unwrap().is_none());
///
/// let event = customer.tick(5).unwrap().unwrap();
/// assert_eq!(event.message(), "entered");
/// assert_eq!(customer.status(), CustomerStatus::Arrived);
///
/// customer.admit(5, 30).unwrap();
/// assert_eq!(customer.queue_deadline(), Some(35));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    arrival_time: usize,
    service_duration: usize,
    /// Admission minute + maximum wait; set once admitted
    queue_deadline: Option<usize>,
    status: CustomerStatus,
}

impl Customer {
    /// Create a customer that has not arrived yet
    ///
    /// # Panics
    /// Panics if `service_duration` is zero
    pub fn new(name: String, arrival_time: usize, service_duration: usize) -> Self {
        assert!(service_duration > 0, "service_duration must be positive");

        Self {
            name,
            arrival_time,
            service_duration,
            queue_deadline: None,
            status: CustomerStatus::NotStarted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    pub fn service_duration(&self) -> usize {
        self.service_duration
    }

    pub fn queue_deadline(&self) -> Option<usize> {
        self.queue_deadline
    }

    pub fn status(&self) -> CustomerStatus {
        self.status
    }

    /// Outcome, present iff the customer is finished
    pub fn outcome(&self) -> Option<CustomerOutcome> {
        match self.status {
            CustomerStatus::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Advance the self-driven part of the state machine by one minute
    ///
    /// - `NotStarted`: walks in exactly at `arrival_time`
    /// - `Queued`: abandons exactly at `queue_deadline`
    ///
    /// Returns the emitted event, if any.
    pub fn tick(&mut self, minute: usize) -> Result<Option<Event>, CustomerError> {
        match self.status {
            CustomerStatus::NotStarted if minute == self.arrival_time => {
                self.status = CustomerStatus::Arrived;
                Ok(Some(Event::CustomerEntered {
                    minute,
                    customer: self.name.clone(),
                }))
            }
            CustomerStatus::Queued => {
                let deadline = self.queue_deadline.ok_or_else(|| self.invalid("wait"))?;

                if minute == deadline {
                    Ok(Some(self.finish(minute, CustomerOutcome::Abandoned)))
                } else if minute > deadline {
                    Err(CustomerError::DeadlineOverrun {
                        name: self.name.clone(),
                        minute,
                        deadline,
                    })
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }

    /// Admit an arrived customer to the waiting queue
    pub fn admit(&mut self, minute: usize, max_wait: usize) -> Result<(), CustomerError> {
        if self.status != CustomerStatus::Arrived {
            return Err(self.invalid("be admitted"));
        }

        self.queue_deadline = Some(minute + max_wait);
        self.status = CustomerStatus::Queued;
        Ok(())
    }

    /// Turn an arrived customer away at the door
    ///
    /// Only `RejectedFull` and `RejectedClosed` are admission rejections.
    pub fn reject(
        &mut self,
        minute: usize,
        outcome: CustomerOutcome,
    ) -> Result<Event, CustomerError> {
        if !matches!(
            outcome,
            CustomerOutcome::RejectedFull | CustomerOutcome::RejectedClosed
        ) {
            return Err(CustomerError::NotARejection(outcome));
        }
        if self.status != CustomerStatus::Arrived {
            return Err(self.invalid("be rejected"));
        }

        Ok(self.finish(minute, outcome))
    }

    /// Hand a queued customer to a barber
    ///
    /// The visit is decided here: service always completes once started, so
    /// the customer is finished as satisfied immediately. The departure
    /// event is emitted later by the barber when the haircut ends.
    pub fn begin_service(&mut self) -> Result<(), CustomerError> {
        if self.status != CustomerStatus::Queued {
            return Err(self.invalid("begin service"));
        }

        self.status = CustomerStatus::Finished(CustomerOutcome::Satisfied);
        Ok(())
    }

    /// Send a queued customer home because no barber is left
    pub fn turn_away(&mut self, minute: usize) -> Result<Event, CustomerError> {
        if self.status != CustomerStatus::Queued {
            return Err(self.invalid("be turned away"));
        }

        Ok(self.finish(minute, CustomerOutcome::RejectedNoServer))
    }

    fn finish(&mut self, minute: usize, outcome: CustomerOutcome) -> Event {
        self.status = CustomerStatus::Finished(outcome);
        Event::CustomerLeft {
            minute,
            customer: self.name.clone(),
            outcome,
        }
    }

    fn invalid(&self, action: &'static str) -> CustomerError {
        CustomerError::InvalidTransition {
            name: self.name.clone(),
            action,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queued_at(minute: usize) -> Customer {
        let mut customer = Customer::new("Customer-1".to_string(), minute, 20);
        customer.tick(minute).unwrap();
        customer.admit(minute, 30).unwrap();
        customer
    }

    #[test]
    #[should_panic(expected = "service_duration must be positive")]
    fn test_zero_duration_panics() {
        Customer::new("C".to_string(), 0, 0);
    }

    #[test]
    fn test_arrival_requires_exact_minute() {
        let mut customer = Customer::new("C".to_string(), 10, 20);

        assert_eq!(customer.tick(9).unwrap(), None);
        assert_eq!(customer.tick(11).unwrap(), None);
        assert_eq!(customer.status(), CustomerStatus::NotStarted);

        assert!(customer.tick(10).unwrap().is_some());
        assert_eq!(customer.status(), CustomerStatus::Arrived);
    }

    #[test]
    fn test_arrived_is_inert_under_tick() {
        let mut customer = Customer::new("C".to_string(), 3, 20);
        customer.tick(3).unwrap();

        assert_eq!(customer.tick(3).unwrap(), None);
        assert_eq!(customer.status(), CustomerStatus::Arrived);
    }

    #[test]
    fn test_deadline_uses_equality() {
        let mut customer = queued_at(10);

        assert_eq!(customer.tick(39).unwrap(), None);
        let event = customer.tick(40).unwrap().unwrap();

        assert_eq!(event.minute(), 40);
        assert_eq!(customer.outcome(), Some(CustomerOutcome::Abandoned));
    }

    #[test]
    fn test_deadline_overrun_is_an_error() {
        let mut customer = queued_at(0);

        let err = customer.tick(31).unwrap_err();
        assert!(matches!(err, CustomerError::DeadlineOverrun { deadline: 30, .. }));
    }

    #[test]
    fn test_admit_twice_fails() {
        let mut customer = queued_at(0);

        let err = customer.admit(1, 30).unwrap_err();
        assert!(matches!(
            err,
            CustomerError::InvalidTransition {
                status: CustomerStatus::Queued,
                ..
            }
        ));
        assert_eq!(customer.queue_deadline(), Some(30));
    }

    #[test]
    fn test_reject_rejects_non_rejection_outcomes() {
        let mut customer = Customer::new("C".to_string(), 0, 20);
        customer.tick(0).unwrap();

        assert_eq!(
            customer.reject(0, CustomerOutcome::Satisfied),
            Err(CustomerError::NotARejection(CustomerOutcome::Satisfied))
        );
        assert_eq!(customer.status(), CustomerStatus::Arrived);
    }

    #[test]
    fn test_finished_is_terminal() {
        let mut customer = queued_at(0);
        customer.begin_service().unwrap();

        assert_eq!(customer.tick(30).unwrap(), None);
        assert!(customer.turn_away(30).is_err());
        assert!(customer.begin_service().is_err());
        assert_eq!(customer.outcome(), Some(CustomerOutcome::Satisfied));
    }
}
