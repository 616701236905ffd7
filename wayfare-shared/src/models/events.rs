use uuid::Uuid;

/// The passenger list was rebuilt with fresh defaults
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PassengersResetEvent {
    pub session_id: Uuid,
    pub passenger_count: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingSubmittedEvent {
    pub session_id: Uuid,
    pub flight_id: String,
    pub booking_reference: String,
    pub passenger_count: usize,
    pub total_price: i64,
    pub currency: String,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingRejectedEvent {
    pub session_id: Uuid,
    pub flight_id: String,
    pub reason: String,
    pub timestamp: i64,
}

impl BookingSubmittedEvent {
    pub fn new(
        session_id: Uuid,
        flight_id: String,
        booking_reference: String,
        passenger_count: usize,
        total_price: i64,
        currency: String,
    ) -> Self {
        Self {
            session_id,
            flight_id,
            booking_reference,
            passenger_count,
            total_price,
            currency,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl BookingRejectedEvent {
    pub fn new(session_id: Uuid, flight_id: String, reason: String) -> Self {
        Self {
            session_id,
            flight_id,
            reason,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
