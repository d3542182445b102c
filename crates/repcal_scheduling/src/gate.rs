// --- File: crates/repcal_scheduling/src/gate.rs ---
//! "Latest request wins" for one caller.
//!
//! A caller owns a [`RequestGate`] and takes a ticket per request. When a
//! result arrives, it is kept only if no newer ticket was issued meanwhile.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::SchedulingError;

/// Sequence counter shared by the tickets of one caller.
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    latest: Arc<AtomicU64>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes every earlier one.
    pub fn issue(&self) -> RequestTicket {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            sequence,
            latest: self.latest.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestTicket {
    sequence: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.sequence
    }

    /// `Err(Superseded)` once a newer ticket exists.
    pub fn ensure_current(&self) -> Result<(), SchedulingError> {
        let latest = self.latest.load(Ordering::SeqCst);
        if latest == self.sequence {
            Ok(())
        } else {
            Err(SchedulingError::Superseded {
                ticket: self.sequence,
                latest,
            })
        }
    }
}
