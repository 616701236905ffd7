pub mod flights;
pub mod submission;
pub mod client;

pub use client::BookingClient;
pub use flights::{CabinClass, FetchState, FlightSource, FlightSummary, TripType};
pub use submission::{BookingReference, BookingSubmission, PassengerSubmission};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
    #[error("Booking submission failed: {0}")]
    Submission(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
