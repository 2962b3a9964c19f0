//! Simulation State
//!
//! Owns every customer and barber of a run and the containers that
//! partition them.
//!
//! Entities live in arenas (`Vec`) and are addressed by [`CustomerId`] /
//! [`BarberId`]; containers hold ids only, so "references" between entities
//! (a barber serving a customer) never alias mutable state.
//!
//! # Critical Invariants
//!
//! 1. Every customer is in exactly one of: `pending_customers`,
//!    `waiting_queue`, a barber's service ticket, or finished (no container)
//! 2. Every barber is in exactly one of: `pending_barbers`,
//!    `active_barbers`, or finished (no container)
//! 3. `waiting_queue` is FIFO in admission order
//! 4. `pending_barbers` keeps configuration order; `active_barbers` is in
//!    activation order (same-minute starts keep configuration order)

use crate::models::barber::{Barber, BarberId};
use crate::models::customer::{Customer, CustomerId, CustomerStatus};
use std::collections::VecDeque;

/// Complete simulation state
///
/// # Example
///
/// ```rust
/// use salon_simulator_core_rs::{Barber, Customer, SalonState};
///
/// let state = SalonState::new(
///     vec![Barber::new("Anne".to_string(), 0, 240)],
///     vec![Customer::new("Customer-1".to_string(), 0, 20)],
/// );
/// assert_eq!(state.num_customers(), 1);
/// assert_eq!(state.pending_barbers().len(), 1);
/// assert_eq!(state.queue_size(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SalonState {
    customers: Vec<Customer>,
    barbers: Vec<Barber>,

    /// Customers that have not walked in yet, in registration order
    pending_customers: Vec<CustomerId>,

    /// Admitted customers waiting for a barber (FIFO)
    waiting_queue: VecDeque<CustomerId>,

    /// Barbers whose shift has not started, in registration order
    pending_barbers: Vec<BarberId>,

    /// Barbers on shift (idle or serving), in activation order
    active_barbers: Vec<BarberId>,
}

impl SalonState {
    /// Create a state where every barber and customer is still pending
    pub fn new(barbers: Vec<Barber>, customers: Vec<Customer>) -> Self {
        let pending_customers = (0..customers.len()).map(CustomerId).collect();
        let pending_barbers = (0..barbers.len()).map(BarberId).collect();

        Self {
            customers,
            barbers,
            pending_customers,
            waiting_queue: VecDeque::new(),
            pending_barbers,
            active_barbers: Vec::new(),
        }
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(id.0)
    }

    pub fn customer_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        self.customers.get_mut(id.0)
    }

    pub fn barber(&self, id: BarberId) -> Option<&Barber> {
        self.barbers.get(id.0)
    }

    pub fn barber_mut(&mut self, id: BarberId) -> Option<&mut Barber> {
        self.barbers.get_mut(id.0)
    }

    /// Look a customer up by display name
    pub fn customer_by_name(&self, name: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.name() == name)
    }

    pub fn barber_by_name(&self, name: &str) -> Option<&Barber> {
        self.barbers.iter().find(|b| b.name() == name)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn barbers(&self) -> &[Barber] {
        &self.barbers
    }

    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    pub fn num_barbers(&self) -> usize {
        self.barbers.len()
    }

    pub fn pending_customers(&self) -> &[CustomerId] {
        &self.pending_customers
    }

    pub fn pending_customers_mut(&mut self) -> &mut Vec<CustomerId> {
        &mut self.pending_customers
    }

    pub fn waiting_queue(&self) -> &VecDeque<CustomerId> {
        &self.waiting_queue
    }

    pub fn waiting_queue_mut(&mut self) -> &mut VecDeque<CustomerId> {
        &mut self.waiting_queue
    }

    pub fn queue_size(&self) -> usize {
        self.waiting_queue.len()
    }

    pub fn pending_barbers(&self) -> &[BarberId] {
        &self.pending_barbers
    }

    pub fn pending_barbers_mut(&mut self) -> &mut Vec<BarberId> {
        &mut self.pending_barbers
    }

    pub fn active_barbers(&self) -> &[BarberId] {
        &self.active_barbers
    }

    pub fn active_barbers_mut(&mut self) -> &mut Vec<BarberId> {
        &mut self.active_barbers
    }

    /// Customers currently in a barber's chair
    pub fn customers_in_service(&self) -> Vec<CustomerId> {
        self.active_barbers
            .iter()
            .filter_map(|id| self.barbers[id.0].current_customer())
            .collect()
    }

    /// Number of customers with the given status
    pub fn count_with_status(&self, status: CustomerStatus) -> usize {
        self.customers.iter().filter(|c| c.status() == status).count()
    }

    /// Check the container partition invariants
    ///
    /// Returns a description of the first violation found. Customers that
    /// are being served are already `Finished(Satisfied)`, so they are
    /// accounted for by the service tickets rather than by status.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut customer_slots = vec![0usize; self.customers.len()];

        for id in &self.pending_customers {
            customer_slots[id.0] += 1;
            if self.customers[id.0].status() != CustomerStatus::NotStarted {
                return Err(format!(
                    "pending customer {} has status {:?}",
                    self.customers[id.0].name(),
                    self.customers[id.0].status()
                ));
            }
        }
        for id in &self.waiting_queue {
            customer_slots[id.0] += 1;
            if self.customers[id.0].status() != CustomerStatus::Queued {
                return Err(format!(
                    "queued customer {} has status {:?}",
                    self.customers[id.0].name(),
                    self.customers[id.0].status()
                ));
            }
        }
        for id in self.customers_in_service() {
            customer_slots[id.0] += 1;
        }

        for (index, slots) in customer_slots.iter().enumerate() {
            let customer = &self.customers[index];
            let expected = if customer.is_finished() { 0..=1 } else { 1..=1 };
            if !expected.contains(slots) {
                return Err(format!(
                    "customer {} appears in {} containers",
                    customer.name(),
                    slots
                ));
            }
        }

        let mut barber_slots = vec![0usize; self.barbers.len()];
        for id in self.pending_barbers.iter().chain(self.active_barbers.iter()) {
            barber_slots[id.0] += 1;
        }
        for (index, slots) in barber_slots.iter().enumerate() {
            let barber = &self.barbers[index];
            let expected = usize::from(!barber.is_finished());
            if *slots != expected {
                return Err(format!(
                    "barber {} appears in {} containers",
                    barber.name(),
                    slots
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> SalonState {
        SalonState::new(
            vec![
                Barber::new("Anne".to_string(), 0, 240),
                Barber::new("Erin".to_string(), 240, 480),
            ],
            vec![
                Customer::new("Customer-1".to_string(), 0, 20),
                Customer::new("Customer-2".to_string(), 5, 30),
            ],
        )
    }

    #[test]
    fn test_new_state_is_all_pending() {
        let state = sample_state();

        assert_eq!(state.pending_customers(), &[CustomerId(0), CustomerId(1)]);
        assert_eq!(state.pending_barbers(), &[BarberId(0), BarberId(1)]);
        assert!(state.active_barbers().is_empty());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_lookup_by_name() {
        let state = sample_state();

        assert_eq!(state.customer_by_name("Customer-2").unwrap().arrival_time(), 5);
        assert_eq!(state.barber_by_name("Erin").unwrap().shift_start(), 240);
        assert!(state.barber_by_name("Zed").is_none());
    }

    #[test]
    fn test_invariants_detect_double_membership() {
        let mut state = sample_state();
        state.active_barbers_mut().push(BarberId(0));

        let err = state.check_invariants().unwrap_err();
        assert!(err.contains("Anne"));
    }
}
