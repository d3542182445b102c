// --- File: crates/repcal_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod mapping;
#[cfg(test)]
mod mapping_test;
pub mod service;

pub use service::{GcalSourceError, GoogleCalendarSource};
