use async_trait::async_trait;

use crate::submission::{BookingReference, BookingSubmission};
use crate::CoreResult;

/// Boundary to the backend booking API.
///
/// Implementations post the payload and hand back the booking reference;
/// transport and wire format are their concern.
#[async_trait]
pub trait BookingClient: Send + Sync {
    async fn submit_booking(&self, submission: &BookingSubmission) -> CoreResult<BookingReference>;
}
