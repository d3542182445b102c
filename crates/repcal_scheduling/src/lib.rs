// --- File: crates/repcal_scheduling/src/lib.rs ---
//! Availability and booking engine.
//!
//! Computes conflict-free slots for a rep from the local appointment store
//! and an optional external calendar, and books appointments as a local
//! write followed by a best-effort calendar mirror.

pub mod aggregator;
pub mod booking;
pub mod doc;
pub mod engine;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod interval;
#[cfg(test)]
mod interval_test;
pub mod routes;
pub mod slots;
#[cfg(test)]
mod slots_proptest;
#[cfg(test)]
mod slots_test;
pub mod validation;

pub use aggregator::{BusyIntervalAggregator, ExternalSourceStatus};
pub use booking::{BookingCoordinator, BookingOutcome, BookingState, BookingStatus, SyncIssue};
pub use engine::{AvailabilityEngine, AvailabilityRequest, AvailabilityResult};
pub use error::SchedulingError;
pub use gate::{RequestGate, RequestTicket};
pub use interval::TimeInterval;
pub use slots::calculate_free_slots;
pub use validation::AppointmentFields;
