//! Orchestrator Engine
//!
//! The [`Salon`] owns all simulation state and advances it one minute per
//! tick.
//!
//! # Architecture
//!
//! ```text
//! For each minute t (until closed):
//! 0. Announce opening if t == open_time
//! 1. End haircuts / shifts of active barbers
//! 2. Start shifts of pending barbers (shift_start == t)
//! 3. If no barber is active: turn away the queue, close, stop
//! 4. Arrivals: walk-ins resolve to rejected-closed, rejected-full or queued
//! 5. Matching: FIFO queue against idle barbers; unmatched customers may
//!    hit their deadline
//! 6. Advance time
//! ```
//!
//! Phase order is load-bearing: a barber freed in phase 1 is available to
//! customers arriving in phase 4 of the same minute, and a barber whose
//! shift starts at t can serve at t.
//!
//! # Example
//!
//! ```rust
//! use salon_simulator_core_rs::orchestrator::{BarberConfig, CustomerConfig, Salon, SalonConfig};
//!
//! let config = SalonConfig {
//!     capacity: 1,
//!     open_time: 0,
//!     close_time: 60,
//!     barbers: vec![BarberConfig::new("Anne", 0, 60)],
//!     customers: vec![CustomerConfig::new("Customer-1", 0, 20)],
//!     ..SalonConfig::default()
//! };
//!
//! let mut salon = Salon::new(config).unwrap();
//! let report = salon.simulate(120).unwrap();
//!
//! assert_eq!(report.satisfied, 1);
//! assert_eq!(salon.closed_at(), Some(60));
//! ```

use crate::core::time::TimeManager;
use crate::models::barber::{Barber, BarberError, BarberId};
use crate::models::customer::{Customer, CustomerError, CustomerId, CustomerOutcome};
use crate::models::event::{Event, EventLog};
use crate::models::state::SalonState;
use crate::orchestrator::report::SimulationReport;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Minutes an admitted customer is willing to wait for a barber
pub const DEFAULT_MAX_WAIT: usize = 30;

/// Actor name used for salon-level events unless configured otherwise
pub const DEFAULT_SALON_NAME: &str = "Hair Salon";

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete salon configuration
///
/// Barbers and customers may be listed in any order; processing order is
/// fixed by the tick phases. When several barbers are idle at once, the one
/// whose shift started first takes the customer; barbers starting in the
/// same minute keep their list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalonConfig {
    /// Actor name for "opened" / "closed" events
    #[serde(default = "default_salon_name")]
    pub name: String,

    /// Maximum number of customers waiting (the chairs in use do not count)
    pub capacity: usize,

    /// Minute the salon opens
    pub open_time: usize,

    /// Last minute at which walk-ins are admitted
    pub close_time: usize,

    /// Minutes from admission until a waiting customer gives up
    #[serde(default = "default_max_wait")]
    pub max_wait: usize,

    pub barbers: Vec<BarberConfig>,

    pub customers: Vec<CustomerConfig>,
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self {
            name: default_salon_name(),
            capacity: 0,
            open_time: 0,
            close_time: 0,
            max_wait: DEFAULT_MAX_WAIT,
            barbers: Vec::new(),
            customers: Vec::new(),
        }
    }
}

fn default_salon_name() -> String {
    DEFAULT_SALON_NAME.to_string()
}

fn default_max_wait() -> usize {
    DEFAULT_MAX_WAIT
}

/// One barber's shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarberConfig {
    pub name: String,
    pub shift_start: usize,
    pub shift_end: usize,
}

impl BarberConfig {
    pub fn new(name: &str, shift_start: usize, shift_end: usize) -> Self {
        Self {
            name: name.to_string(),
            shift_start,
            shift_end,
        }
    }
}

/// One customer's visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerConfig {
    pub name: String,
    pub arrival_time: usize,
    pub service_duration: usize,
}

impl CustomerConfig {
    pub fn new(name: &str, arrival_time: usize, service_duration: usize) -> Self {
        Self {
            name: name.to_string(),
            arrival_time,
            service_duration,
        }
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Summary of a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Minute this tick simulated
    pub minute: usize,

    /// Customers that walked in
    pub num_arrivals: usize,

    /// Walk-ins admitted to the queue
    pub num_admitted: usize,

    /// Walk-ins turned away at the door (full or closed)
    pub num_rejected: usize,

    /// Customers matched with a barber
    pub num_matched: usize,

    /// Haircuts that finished
    pub num_completed: usize,

    /// Queued customers whose deadline expired
    pub num_abandoned: usize,

    /// Queued customers sent home at closing
    pub num_turned_away: usize,

    /// Waiting queue length at the end of the tick
    pub queue_size: usize,

    /// Events appended by this tick
    pub num_events: usize,

    /// Salon is closed (closed during this tick or earlier)
    pub closed: bool,
}

/// Simulation error types
///
/// Configuration errors surface from [`Salon::new`]. Every other variant is
/// a broken internal contract: the run is aborted, never retried.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Barber(#[from] BarberError),

    #[error("Invariant violated at minute {minute}: {detail}")]
    InvariantViolation { minute: usize, detail: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ============================================================================
// Salon
// ============================================================================

/// Main orchestrator managing simulation state and the tick loop
///
/// # Determinism
///
/// The salon draws no random numbers. The same configuration always yields
/// the same event log.
#[derive(Debug, Clone)]
pub struct Salon {
    config: SalonConfig,

    /// Customers, barbers and their containers
    state: SalonState,

    time_manager: TimeManager,

    /// Every event of this run, in emission order
    event_log: EventLog,

    /// Minute at which the salon closed
    closed_at: Option<usize>,
}

impl Salon {
    /// Create a new salon from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Salon)` - positioned at minute 0, nothing simulated yet
    /// * `Err(SimulationError::InvalidConfig)` - validation failed
    pub fn new(config: SalonConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let barbers = config
            .barbers
            .iter()
            .map(|b| Barber::new(b.name.clone(), b.shift_start, b.shift_end))
            .collect();
        let customers = config
            .customers
            .iter()
            .map(|c| Customer::new(c.name.clone(), c.arrival_time, c.service_duration))
            .collect();

        Ok(Self {
            state: SalonState::new(barbers, customers),
            time_manager: TimeManager::new(),
            event_log: EventLog::new(),
            closed_at: None,
            config,
        })
    }

    /// Validate configuration
    fn validate_config(config: &SalonConfig) -> Result<(), SimulationError> {
        let invalid =
            |msg: String| -> Result<(), SimulationError> { Err(SimulationError::InvalidConfig(msg)) };

        if config.close_time < config.open_time {
            return invalid(format!(
                "close_time {} is before open_time {}",
                config.close_time, config.open_time
            ));
        }

        if config.max_wait == 0 {
            return invalid("max_wait must be > 0".to_string());
        }

        if config.barbers.is_empty() {
            return invalid("Must have at least one barber".to_string());
        }

        let mut barber_names = HashSet::new();
        for barber in &config.barbers {
            if barber.name.is_empty() {
                return invalid("Barber name must not be empty".to_string());
            }
            if !barber_names.insert(&barber.name) {
                return invalid(format!("Duplicate barber name: {}", barber.name));
            }
            if barber.shift_end <= barber.shift_start {
                return invalid(format!(
                    "Barber {} has an empty shift ({}..{})",
                    barber.name, barber.shift_start, barber.shift_end
                ));
            }
        }

        let mut customer_names = HashSet::new();
        for customer in &config.customers {
            if customer.name.is_empty() {
                return invalid("Customer name must not be empty".to_string());
            }
            if !customer_names.insert(&customer.name) {
                return invalid(format!("Duplicate customer name: {}", customer.name));
            }
            if customer.service_duration == 0 {
                return invalid(format!(
                    "Customer {} has a zero service duration",
                    customer.name
                ));
            }
            if customer.arrival_time < config.open_time {
                return invalid(format!(
                    "Customer {} arrives at {} before opening at {}",
                    customer.name, customer.arrival_time, config.open_time
                ));
            }
            // Latest possible service end: served right at the queue deadline
            let latest_end = customer
                .arrival_time
                .checked_add(config.max_wait)
                .and_then(|deadline| deadline.checked_add(customer.service_duration));
            if latest_end.is_none() {
                return invalid(format!(
                    "Customer {} times overflow the clock (arrival {}, max_wait {}, service {})",
                    customer.name, customer.arrival_time, config.max_wait, customer.service_duration
                ));
            }
        }

        // The salon may only run out of barbers at or after closing time
        let mut shifts: Vec<(usize, usize)> = config
            .barbers
            .iter()
            .map(|b| (b.shift_start, b.shift_end))
            .collect();
        shifts.sort_unstable();

        let mut covered_until = 0;
        for (start, end) in shifts {
            if start > covered_until {
                break;
            }
            covered_until = covered_until.max(end);
        }
        if covered_until < config.close_time {
            return invalid(format!(
                "No barber on shift at minute {} (closing time is {})",
                covered_until, config.close_time
            ));
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Minute the next tick will simulate
    pub fn current_minute(&self) -> usize {
        self.time_manager.current_minute()
    }

    pub fn config(&self) -> &SalonConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn state(&self) -> &SalonState {
        &self.state
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn event_count(&self) -> usize {
        self.event_log.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    pub fn closed_at(&self) -> Option<usize> {
        self.closed_at
    }

    /// Summarise the run so far
    pub fn report(&self) -> Result<SimulationReport, SimulationError> {
        SimulationReport::from_salon(self)
    }

    // ========================================================================
    // Run Loop
    // ========================================================================

    /// Run ticks from the current minute through `horizon` inclusive
    ///
    /// Stops early once the salon closes. Calling it again after closing is
    /// a no-op that returns the same report.
    pub fn simulate(&mut self, horizon: usize) -> Result<SimulationReport, SimulationError> {
        while !self.is_closed() && self.current_minute() <= horizon {
            self.tick()?;
        }

        let report = self.report()?;
        info!(
            "{}: simulated {} minutes, {} events, {} satisfied, {} unsatisfied",
            self.name(),
            report.minutes_simulated,
            report.total_events,
            report.satisfied,
            report.unsatisfied()
        );
        Ok(report)
    }

    /// Execute one simulation minute
    ///
    /// After the salon has closed, ticks still advance the clock but change
    /// nothing and log nothing.
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        let minute = self.current_minute();
        let mut result = TickResult {
            minute,
            ..TickResult::default()
        };

        if self.is_closed() {
            result.closed = true;
            self.time_manager.advance_minute();
            return Ok(result);
        }

        let events_before = self.event_log.len();

        if minute == self.config.open_time {
            info!("{} opened at minute {}", self.name(), minute);
            self.event_log.log(Event::SalonOpened {
                minute,
                salon: self.config.name.clone(),
            });
        }

        // PHASE 1: HAIRCUT AND SHIFT ENDS
        self.finish_services_and_shifts(minute, &mut result)?;

        // PHASE 2: SHIFT STARTS
        self.start_shifts(minute)?;

        // PHASE 3: CLOSING CHECK
        if self.state.active_barbers().is_empty() {
            self.close(minute, &mut result)?;
        } else {
            // PHASE 4: ARRIVALS AND ADMISSION
            self.admit_arrivals(minute, &mut result)?;

            // PHASE 5: MATCHING
            self.serve_queue(minute, &mut result)?;
        }

        self.check_invariants(minute)?;

        result.queue_size = self.state.queue_size();
        result.num_events = self.event_log.len() - events_before;
        result.closed = self.is_closed();

        if result.num_events > 0 {
            debug!(
                "minute {}: {} arrivals ({} admitted, {} rejected), {} matched, {} completed, {} abandoned, queue {}",
                minute,
                result.num_arrivals,
                result.num_admitted,
                result.num_rejected,
                result.num_matched,
                result.num_completed,
                result.num_abandoned,
                result.queue_size
            );
        }

        self.time_manager.advance_minute();
        Ok(result)
    }

    // ========================================================================
    // Tick Phases
    // ========================================================================

    /// Phase 1: advance every active barber; drop those who went home
    fn finish_services_and_shifts(
        &mut self,
        minute: usize,
        result: &mut TickResult,
    ) -> Result<(), SimulationError> {
        let mut went_home = Vec::new();

        for barber_id in self.state.active_barbers().to_vec() {
            let barber = barber_mut(&mut self.state, barber_id, minute)?;
            let was_serving = barber.current_customer().is_some();

            let events = barber.tick(minute)?;

            if was_serving && barber.current_customer().is_none() {
                result.num_completed += 1;
            }
            if barber.is_finished() {
                went_home.push(barber_id);
            }
            self.event_log.extend(events);
        }

        if !went_home.is_empty() {
            self.state
                .active_barbers_mut()
                .retain(|id| !went_home.contains(id));
        }

        Ok(())
    }

    /// Phase 2: append barbers whose shift starts now to the active list
    fn start_shifts(&mut self, minute: usize) -> Result<(), SimulationError> {
        let mut started = Vec::new();

        for barber_id in self.state.pending_barbers().to_vec() {
            let barber = barber_mut(&mut self.state, barber_id, minute)?;
            if barber.shift_start() != minute {
                continue;
            }

            let events = barber.tick(minute)?;
            self.event_log.extend(events);
            started.push(barber_id);
        }

        if !started.is_empty() {
            self.state
                .pending_barbers_mut()
                .retain(|id| !started.contains(id));

            // Activation order; ties keep pending order
            self.state.active_barbers_mut().extend(started);
        }

        Ok(())
    }

    /// Phase 3: no barber left, send the queue home and close for good
    fn close(&mut self, minute: usize, result: &mut TickResult) -> Result<(), SimulationError> {
        if minute < self.config.close_time {
            return Err(SimulationError::InvariantViolation {
                minute,
                detail: format!(
                    "no barber on shift before closing time {}",
                    self.config.close_time
                ),
            });
        }

        let waiting: Vec<CustomerId> = self.state.waiting_queue_mut().drain(..).collect();
        for customer_id in waiting {
            let event = customer_mut(&mut self.state, customer_id, minute)?.turn_away(minute)?;
            self.event_log.log(event);
            result.num_turned_away += 1;
        }

        self.event_log.log(Event::SalonClosed {
            minute,
            salon: self.config.name.clone(),
        });
        self.closed_at = Some(minute);

        info!(
            "{} closed at minute {} ({} customers turned away)",
            self.name(),
            minute,
            result.num_turned_away
        );
        Ok(())
    }

    /// Phase 4: resolve every walk-in of this minute to queued or rejected
    fn admit_arrivals(
        &mut self,
        minute: usize,
        result: &mut TickResult,
    ) -> Result<(), SimulationError> {
        let mut arrived = HashSet::new();

        for customer_id in self.state.pending_customers().to_vec() {
            let entered = customer_mut(&mut self.state, customer_id, minute)?.tick(minute)?;
            let Some(event) = entered else {
                continue;
            };
            self.event_log.log(event);
            arrived.insert(customer_id);
            result.num_arrivals += 1;

            let rejection = if minute > self.config.close_time {
                Some(CustomerOutcome::RejectedClosed)
            } else if self.state.queue_size() == self.config.capacity {
                Some(CustomerOutcome::RejectedFull)
            } else {
                None
            };

            let customer = customer_mut(&mut self.state, customer_id, minute)?;
            match rejection {
                Some(outcome) => {
                    let event = customer.reject(minute, outcome)?;
                    self.event_log.log(event);
                    result.num_rejected += 1;
                }
                None => {
                    customer.admit(minute, self.config.max_wait)?;
                    self.state.waiting_queue_mut().push_back(customer_id);
                    result.num_admitted += 1;
                }
            }
        }

        if !arrived.is_empty() {
            self.state
                .pending_customers_mut()
                .retain(|id| !arrived.contains(id));
        }

        Ok(())
    }

    /// Phase 5: offer each waiting customer, in FIFO order, the first idle
    /// barber in activation order; customers left waiting check their deadline
    fn serve_queue(&mut self, minute: usize, result: &mut TickResult) -> Result<(), SimulationError> {
        let mut leaving = HashSet::new();

        for customer_id in self.state.waiting_queue().iter().copied().collect::<Vec<_>>() {
            match self.first_idle_barber() {
                Some(barber_id) => {
                    let customer = customer_mut(&mut self.state, customer_id, minute)?;
                    customer.begin_service()?;
                    let name = customer.name().to_string();
                    let duration = customer.service_duration();

                    let barber = barber_mut(&mut self.state, barber_id, minute)?;
                    let event = barber.assign(minute, customer_id, &name, duration)?;
                    trace!("minute {}: {} -> {}", minute, name, barber.name());

                    self.event_log.log(event);
                    leaving.insert(customer_id);
                    result.num_matched += 1;
                }
                None => {
                    let expired = customer_mut(&mut self.state, customer_id, minute)?.tick(minute)?;
                    if let Some(event) = expired {
                        self.event_log.log(event);
                        leaving.insert(customer_id);
                        result.num_abandoned += 1;
                    }
                }
            }
        }

        if !leaving.is_empty() {
            self.state
                .waiting_queue_mut()
                .retain(|id| !leaving.contains(id));
        }

        Ok(())
    }

    fn first_idle_barber(&self) -> Option<BarberId> {
        self.state
            .active_barbers()
            .iter()
            .copied()
            .find(|id| self.state.barber(*id).map_or(false, Barber::is_idle))
    }

    fn check_invariants(&self, minute: usize) -> Result<(), SimulationError> {
        if self.state.queue_size() > self.config.capacity {
            return Err(SimulationError::InvariantViolation {
                minute,
                detail: format!(
                    "waiting queue holds {} customers, capacity is {}",
                    self.state.queue_size(),
                    self.config.capacity
                ),
            });
        }

        if cfg!(debug_assertions) {
            self.state
                .check_invariants()
                .map_err(|detail| SimulationError::InvariantViolation { minute, detail })?;
        }

        Ok(())
    }
}

fn customer_mut(
    state: &mut SalonState,
    id: CustomerId,
    minute: usize,
) -> Result<&mut Customer, SimulationError> {
    state
        .customer_mut(id)
        .ok_or_else(|| SimulationError::InvariantViolation {
            minute,
            detail: format!("unknown customer {:?}", id),
        })
}

fn barber_mut(
    state: &mut SalonState,
    id: BarberId,
    minute: usize,
) -> Result<&mut Barber, SimulationError> {
    state
        .barber_mut(id)
        .ok_or_else(|| SimulationError::InvariantViolation {
            minute,
            detail: format!("unknown barber {:?}", id),
        })
}
