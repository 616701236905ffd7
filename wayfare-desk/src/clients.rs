use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use uuid::Uuid;
use wayfare_core::{
    BookingClient, BookingReference, BookingSubmission, CoreError, CoreResult, FlightSource,
    FlightSummary,
};

use crate::error::DeskError;

/// Flight catalogue backed by a fixture list
pub struct InMemoryFlightSource {
    flights: HashMap<String, FlightSummary>,
}

impl InMemoryFlightSource {
    pub fn new(flights: Vec<FlightSummary>) -> Self {
        Self {
            flights: flights.into_iter().map(|f| (f.id.clone(), f)).collect(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, DeskError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DeskError::Io {
            path: path.to_string(),
            source,
        })?;
        let flights: Vec<FlightSummary> =
            serde_json::from_str(&raw).map_err(|source| DeskError::Json {
                path: path.to_string(),
                source,
            })?;
        tracing::debug!("Loaded {} flight(s) from {}", flights.len(), path);
        Ok(Self::new(flights))
    }
}

#[async_trait]
impl FlightSource for InMemoryFlightSource {
    async fn fetch_flight(&self, flight_id: &str) -> CoreResult<FlightSummary> {
        self.flights
            .get(flight_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("flight {}", flight_id)))
    }
}

/// Booking API stand-in: records payloads and issues references.
///
/// Can be told to fail a number of calls first to exercise the retry path.
pub struct MockBookingClient {
    remaining_failures: AtomicU32,
    received: Mutex<Vec<BookingSubmission>>,
}

impl MockBookingClient {
    pub fn new() -> Self {
        Self {
            remaining_failures: AtomicU32::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_first(self, failures: u32) -> Self {
        self.remaining_failures.store(failures, Ordering::SeqCst);
        self
    }

    /// Payloads received so far, failed attempts included
    pub fn received(&self) -> Vec<BookingSubmission> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn generate_reference(&self) -> String {
        // Format: WF-{timestamp}-{short_uuid}
        let timestamp = chrono::Utc::now().timestamp();
        let short_id = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        format!("WF-{}-{}", timestamp, short_id)
    }
}

impl Default for MockBookingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingClient for MockBookingClient {
    async fn submit_booking(&self, submission: &BookingSubmission) -> CoreResult<BookingReference> {
        if let Ok(mut received) = self.received.lock() {
            received.push(submission.clone());
        }

        let should_fail = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(CoreError::Submission("Simulated booking API failure".to_string()));
        }

        Ok(BookingReference(self.generate_reference()))
    }
}
