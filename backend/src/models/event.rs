//! Event logging for the salon simulation.
//!
//! The event log is the only externally observed output of a run. Every
//! state change of a customer, barber or the salon itself appends one
//! [`Event`], in the exact order the tick phases produce them, so the log
//! is a deterministic, causally ordered trace.
//!
//! # Event Types
//!
//! - **Salon**: opened, closed
//! - **Barber**: shift started/ended, haircut started/ended
//! - **Customer**: entered, left (with an outcome)
//!
//! # Example
//!
//! ```rust
//! use salon_simulator_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::CustomerEntered {
//!     minute: 10,
//!     customer: "Customer-1".to_string(),
//! });
//!
//! let record = log.events()[0].to_record();
//! assert_eq!(record.actor, "Customer-1");
//! assert_eq!(record.message, "entered");
//! ```

use crate::core::time::ClockFormat;
use crate::models::customer::CustomerOutcome;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Simulation event capturing a state change.
///
/// All events carry the minute at which they occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The salon reached its opening minute
    SalonOpened { minute: usize, salon: String },

    /// No barber remains on shift; the run is over
    SalonClosed { minute: usize, salon: String },

    ShiftStarted { minute: usize, barber: String },

    ShiftEnded { minute: usize, barber: String },

    /// Customer walked in (before the admission decision)
    CustomerEntered { minute: usize, customer: String },

    HaircutStarted {
        minute: usize,
        barber: String,
        customer: String,
    },

    HaircutEnded {
        minute: usize,
        barber: String,
        customer: String,
    },

    /// Customer departed with a final outcome
    CustomerLeft {
        minute: usize,
        customer: String,
        outcome: CustomerOutcome,
    },
}

impl Event {
    /// Get the minute when this event occurred
    pub fn minute(&self) -> usize {
        match self {
            Event::SalonOpened { minute, .. } => *minute,
            Event::SalonClosed { minute, .. } => *minute,
            Event::ShiftStarted { minute, .. } => *minute,
            Event::ShiftEnded { minute, .. } => *minute,
            Event::CustomerEntered { minute, .. } => *minute,
            Event::HaircutStarted { minute, .. } => *minute,
            Event::HaircutEnded { minute, .. } => *minute,
            Event::CustomerLeft { minute, .. } => *minute,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::SalonOpened { .. } => "SalonOpened",
            Event::SalonClosed { .. } => "SalonClosed",
            Event::ShiftStarted { .. } => "ShiftStarted",
            Event::ShiftEnded { .. } => "ShiftEnded",
            Event::CustomerEntered { .. } => "CustomerEntered",
            Event::HaircutStarted { .. } => "HaircutStarted",
            Event::HaircutEnded { .. } => "HaircutEnded",
            Event::CustomerLeft { .. } => "CustomerLeft",
        }
    }

    /// Name of the entity the event is attributed to
    pub fn actor(&self) -> &str {
        match self {
            Event::SalonOpened { salon, .. } | Event::SalonClosed { salon, .. } => salon,
            Event::ShiftStarted { barber, .. }
            | Event::ShiftEnded { barber, .. }
            | Event::HaircutStarted { barber, .. }
            | Event::HaircutEnded { barber, .. } => barber,
            Event::CustomerEntered { customer, .. } | Event::CustomerLeft { customer, .. } => {
                customer
            }
        }
    }

    /// Customer name if the event concerns a specific customer
    pub fn customer(&self) -> Option<&str> {
        match self {
            Event::CustomerEntered { customer, .. }
            | Event::HaircutStarted { customer, .. }
            | Event::HaircutEnded { customer, .. }
            | Event::CustomerLeft { customer, .. } => Some(customer),
            _ => None,
        }
    }

    /// Barber name if the event concerns a specific barber
    pub fn barber(&self) -> Option<&str> {
        match self {
            Event::ShiftStarted { barber, .. }
            | Event::ShiftEnded { barber, .. }
            | Event::HaircutStarted { barber, .. }
            | Event::HaircutEnded { barber, .. } => Some(barber),
            _ => None,
        }
    }

    /// Human-readable description, as it appears in the rendered trace
    pub fn message(&self) -> String {
        match self {
            Event::SalonOpened { .. } => "opened".to_string(),
            Event::SalonClosed { .. } => "closed".to_string(),
            Event::ShiftStarted { .. } => "started shift".to_string(),
            Event::ShiftEnded { .. } => "ended shift".to_string(),
            Event::CustomerEntered { .. } => "entered".to_string(),
            Event::HaircutStarted { customer, .. } => {
                format!("started cutting [{}]'s hair", customer)
            }
            Event::HaircutEnded { customer, .. } => format!("ended cutting [{}]'s hair", customer),
            Event::CustomerLeft { outcome, .. } => outcome.departure_message().to_string(),
        }
    }

    /// Flatten into the `{minute, actor, message}` record consumed by sinks
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            minute: self.minute(),
            actor: self.actor().to_string(),
            message: self.message(),
        }
    }
}

/// Display-level view of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub minute: usize,
    pub actor: String,
    pub message: String,
}

impl EventRecord {
    /// Render as `[HH:MM] [actor] message`
    ///
    /// # Example
    /// ```
    /// use salon_simulator_core_rs::{ClockFormat, EventRecord};
    ///
    /// let record = EventRecord {
    ///     minute: 65,
    ///     actor: "Anne".to_string(),
    ///     message: "started shift".to_string(),
    /// };
    /// assert_eq!(record.render(&ClockFormat::default()), "[10:05] [Anne] started shift");
    /// ```
    pub fn render(&self, clock: &ClockFormat) -> String {
        format!("[{}] [{}] {}", clock.format(self.minute), self.actor, self.message)
    }
}

/// Append-only event log for one simulation run.
///
/// A thin wrapper around `Vec<Event>` with query helpers.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Append a batch of events, preserving their order
    pub fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// All events as display records, in log order
    pub fn records(&self) -> Vec<EventRecord> {
        self.events.iter().map(Event::to_record).collect()
    }

    pub fn events_at_minute(&self, minute: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.minute() == minute).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events attributed to the named actor
    pub fn events_for_actor(&self, actor: &str) -> Vec<&Event> {
        self.events.iter().filter(|e| e.actor() == actor).collect()
    }

    /// Events concerning a customer, including the haircut events emitted by
    /// the barber serving them
    pub fn events_for_customer(&self, customer: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.customer() == Some(customer))
            .collect()
    }

    /// Minute of the most recent event
    pub fn last_minute(&self) -> Option<usize> {
        self.events.last().map(Event::minute)
    }

    /// SHA256 over the rendered `{minute, actor, message}` records
    ///
    /// Two runs produced the same trace iff their digests match.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for record in self.records() {
            hasher.update(record.minute.to_le_bytes());
            hasher.update(record.actor.as_bytes());
            hasher.update([0u8]);
            hasher.update(record.message.as_bytes());
            hasher.update([b'\n']);
        }
        format!("{:x}", hasher.finalize())
    }
}
