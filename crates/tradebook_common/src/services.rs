// --- File: crates/tradebook_common/src/services.rs ---
//! Abstractions for the two outbound collaborators of the availability check.
//!
//! The resolver only talks to these traits, so tests can hand it deterministic fakes
//! while production wires in the Google Distance Matrix and Google Calendar clients.
//!
//! Travel time has no error channel: an implementation that cannot produce an estimate
//! returns `0.0`. A failed busy-interval lookup is returned as an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

use crate::error::TradebookError;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Type alias for a boxed future that always yields a value
pub type InfallibleFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One existing commitment on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Open-interval overlap with `[start, end)`: an interval that ends exactly when the
    /// window starts, or starts exactly when it ends, does not overlap.
    pub fn overlaps<Tz: chrono::TimeZone>(&self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> bool {
        self.start < *end && self.end > *start
    }
}

/// Estimates driving time between two free-form addresses.
pub trait TravelTimeEstimator: Send + Sync {
    /// Travel time in minutes, or `0.0` when no estimate could be obtained.
    fn travel_minutes<'a>(
        &'a self,
        origin: &'a str,
        destination: &'a str,
    ) -> InfallibleFuture<'a, f64>;
}

/// Source of already-scheduled intervals.
pub trait BusyIntervalSource: Send + Sync {
    /// Intervals overlapping `[range_start, range_end]`, ordered by start time.
    fn busy_intervals(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, TradebookError>;
}
