use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;
use wayfare_catalog::{Amount, PricingTable};
use wayfare_core::{
    BookingClient, BookingReference, BookingSubmission, CabinClass, FetchState, FlightSource,
    FlightSummary, TripType,
};

use crate::addons::{AddOn, AddOnOutcome, AddOnRuleEngine};
use crate::aggregator::{PriceAggregator, PriceBreakdown};
use crate::passenger::{PassengerDetails, PassengerRecord, RequiredField};

pub const DEFAULT_MAX_PASSENGERS: usize = 9;

/// Largest per-passenger base fare the wizard accepts
pub const MAX_BASE_FARE: Amount = 10_000_000;

/// Booking wizard steps, in order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    PassengerDetails = 1,
    AddOns = 2,
    Payment = 3,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    fn following(&self) -> Option<WizardStep> {
        match self {
            WizardStep::PassengerDetails => Some(WizardStep::AddOns),
            WizardStep::AddOns => Some(WizardStep::Payment),
            WizardStep::Payment => None,
        }
    }

    fn preceding(&self) -> Option<WizardStep> {
        match self {
            WizardStep::PassengerDetails => None,
            WizardStep::AddOns => Some(WizardStep::PassengerDetails),
            WizardStep::Payment => Some(WizardStep::AddOns),
        }
    }
}

/// Where the last submit attempt left the booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Failed(String),
    Submitted(BookingReference),
}

/// A passenger that failed submit-time validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassengerValidationError {
    /// Zero-based position in the passenger list
    pub index: usize,
    pub missing: Vec<RequiredField>,
}

impl fmt::Display for PassengerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.missing.iter().map(|m| m.to_string()).collect();
        write!(f, "Passenger {}: missing {}", self.index + 1, fields.join(", "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Booking can only be submitted from the payment step (currently on step {0})")]
    NotOnPaymentStep(u8),

    #[error("Passenger details incomplete: {}", describe(.0))]
    Validation(Vec<PassengerValidationError>),

    #[error("Booking submission failed: {0}")]
    Submission(String),

    #[error("Fare unavailable: {0}")]
    FareUnavailable(String),

    #[error("Base fare {0} is outside 0..={max}", max = MAX_BASE_FARE)]
    InvalidBaseFare(Amount),
}

fn check_base_fare(amount: Amount) -> Result<Amount, WizardError> {
    if (0..=MAX_BASE_FARE).contains(&amount) {
        Ok(amount)
    } else {
        Err(WizardError::InvalidBaseFare(amount))
    }
}

fn describe(errors: &[PassengerValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Options a booking flow starts from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WizardOptions {
    pub trip_type: TripType,
    pub cabin_class: CabinClass,
    pub passenger_count: usize,
    pub max_passengers: usize,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            trip_type: TripType::OneWay,
            cabin_class: CabinClass::Economy,
            passenger_count: 1,
            max_passengers: DEFAULT_MAX_PASSENGERS,
        }
    }
}

/// Flight booking flow: Passenger Details → Add-Ons → Payment.
///
/// Owns the passenger list. The total price is never stored; every read
/// recomputes it from the passengers and the base fare.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    session_id: Uuid,
    flight: FlightSummary,
    trip_type: TripType,
    selected_class: CabinClass,
    current_step: WizardStep,
    passengers: Vec<PassengerRecord>,
    base_price_per_passenger: Amount,
    max_passengers: usize,
    pricing: Arc<PricingTable>,
    submission: SubmissionStatus,
}

impl BookingWizard {
    pub fn new(
        flight: FlightSummary,
        options: WizardOptions,
        pricing: Arc<PricingTable>,
    ) -> Result<Self, WizardError> {
        let base_price_per_passenger = flight
            .require_fare(options.cabin_class)
            .map_err(|e| WizardError::FareUnavailable(e.to_string()))
            .and_then(check_base_fare)?;
        let max_passengers = options.max_passengers.max(1);

        let mut wizard = Self {
            session_id: Uuid::new_v4(),
            flight,
            trip_type: options.trip_type,
            selected_class: options.cabin_class,
            current_step: WizardStep::PassengerDetails,
            passengers: Vec::new(),
            base_price_per_passenger,
            max_passengers,
            pricing,
            submission: SubmissionStatus::Idle,
        };
        wizard.set_passenger_count(options.passenger_count);
        Ok(wizard)
    }

    /// One-shot fetch of the flight, then a wizard for it.
    ///
    /// There is no cancellation: a caller that goes away simply drops the result.
    pub async fn load(
        source: &dyn FlightSource,
        flight_id: &str,
        options: WizardOptions,
        pricing: Arc<PricingTable>,
    ) -> FetchState<BookingWizard> {
        tracing::debug!("Fetching flight {}", flight_id);
        match source.fetch_flight(flight_id).await {
            Ok(flight) => match Self::new(flight, options, pricing) {
                Ok(wizard) => FetchState::Ready(wizard),
                Err(e) => FetchState::Failed(e.to_string()),
            },
            Err(e) => {
                tracing::warn!("Failed to load flight {}: {}", flight_id, e);
                FetchState::Failed(e.to_string())
            }
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn flight(&self) -> &FlightSummary {
        &self.flight
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn passengers(&self) -> &[PassengerRecord] {
        &self.passengers
    }

    pub fn base_price_per_passenger(&self) -> Amount {
        self.base_price_per_passenger
    }

    pub fn selected_class(&self) -> CabinClass {
        self.selected_class
    }

    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.flight.departure_date
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// Advance one step; no validation gate before payment
    pub fn next(&mut self) -> WizardStep {
        if let Some(step) = self.current_step.following() {
            tracing::info!("Booking {} moved to step {}", self.session_id, step.number());
            self.current_step = step;
        }
        self.current_step
    }

    pub fn previous(&mut self) -> WizardStep {
        if let Some(step) = self.current_step.preceding() {
            tracing::info!("Booking {} moved back to step {}", self.session_id, step.number());
            self.current_step = step;
        }
        self.current_step
    }

    /// Replace the passenger list with `count` fresh records.
    ///
    /// Existing selections are discarded even when the count grows.
    /// `count` is clamped to `1..=max_passengers`.
    pub fn set_passenger_count(&mut self, count: usize) -> usize {
        let count = count.clamp(1, self.max_passengers);
        self.passengers = (0..count).map(|_| PassengerRecord::new()).collect();
        tracing::info!("Booking {} reset to {} passenger(s)", self.session_id, count);
        count
    }

    /// Override the per-passenger fare; negative or oversized fares are rejected
    pub fn set_base_price(&mut self, amount: Amount) -> Result<(), WizardError> {
        self.base_price_per_passenger = check_base_fare(amount)?;
        Ok(())
    }

    /// Switch cabin; the base fare follows the flight's fare for that cabin
    pub fn set_class(&mut self, class: CabinClass) -> Result<(), WizardError> {
        let fare = self
            .flight
            .require_fare(class)
            .map_err(|e| WizardError::FareUnavailable(e.to_string()))
            .and_then(check_base_fare)?;
        self.selected_class = class;
        self.base_price_per_passenger = fare;
        Ok(())
    }

    pub fn set_trip_type(&mut self, trip_type: TripType) {
        self.trip_type = trip_type;
    }

    /// Replace one passenger's identity fields; false for an unknown index
    pub fn update_passenger_details(&mut self, index: usize, details: PassengerDetails) -> bool {
        match self.passengers.get_mut(index) {
            Some(passenger) => {
                passenger.details = details;
                true
            }
            None => false,
        }
    }

    pub fn apply_add_on(&mut self, index: usize, add_on: AddOn) -> AddOnOutcome {
        let Some(passenger) = self.passengers.get_mut(index) else {
            tracing::debug!("No passenger at index {}, ignoring {} add-on", index, add_on.kind());
            return AddOnOutcome::Ignored;
        };
        AddOnRuleEngine::apply_in_place(passenger, add_on)
    }

    pub fn total_price(&self) -> Amount {
        PriceAggregator::new(&self.pricing).compute_total(
            self.base_price_per_passenger,
            self.passengers.len(),
            &self.passengers,
        )
    }

    pub fn summary(&self) -> PriceBreakdown {
        PriceAggregator::new(&self.pricing).breakdown(
            self.base_price_per_passenger,
            self.passengers.len(),
            &self.passengers,
        )
    }

    pub fn seat_panel_subtotal(&self) -> Amount {
        PriceAggregator::new(&self.pricing).seat_panel_subtotal(&self.passengers)
    }

    /// Passengers missing required identity fields
    pub fn validate(&self) -> Vec<PassengerValidationError> {
        self.passengers
            .iter()
            .enumerate()
            .filter_map(|(index, p)| {
                let missing = p.missing_required_fields();
                (!missing.is_empty()).then_some(PassengerValidationError { index, missing })
            })
            .collect()
    }

    /// Validate and hand the booking to the API client.
    ///
    /// Every failure leaves the wizard on the payment step so the user can retry.
    pub async fn submit(
        &mut self,
        client: &dyn BookingClient,
    ) -> Result<BookingReference, WizardError> {
        if self.current_step != WizardStep::Payment {
            return Err(WizardError::NotOnPaymentStep(self.current_step.number()));
        }

        let errors = self.validate();
        if !errors.is_empty() {
            tracing::warn!(
                "Booking {} failed validation for {} passenger(s)",
                self.session_id,
                errors.len()
            );
            return Err(WizardError::Validation(errors));
        }

        let payload: BookingSubmission = self.build_payload();
        tracing::info!(
            "Submitting booking {} for flight {} ({} passengers, total {} {})",
            self.session_id,
            payload.flight_id,
            payload.passengers.len(),
            payload.total_price,
            payload.currency
        );

        match client.submit_booking(&payload).await {
            Ok(reference) => {
                tracing::info!("Booking {} confirmed as {}", self.session_id, reference);
                self.submission = SubmissionStatus::Submitted(reference.clone());
                Ok(reference)
            }
            Err(e) => {
                tracing::warn!("Booking {} submission failed: {}", self.session_id, e);
                let message = e.to_string();
                self.submission = SubmissionStatus::Failed(message.clone());
                Err(WizardError::Submission(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use wayfare_catalog::{CarryOn, TierKey};
    use wayfare_core::{CoreError, CoreResult};
    use wayfare_shared::Masked;

    fn flight() -> FlightSummary {
        let mut fares = BTreeMap::new();
        fares.insert(CabinClass::Economy, 10_000);
        fares.insert(CabinClass::Business, 24_000);
        FlightSummary {
            id: "fl-5j560".to_string(),
            flight_number: "5J 560".to_string(),
            origin: "MNL".to_string(),
            destination: "CEB".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            return_date: None,
            fares,
        }
    }

    fn wizard(passengers: usize) -> BookingWizard {
        let options = WizardOptions {
            passenger_count: passengers,
            ..Default::default()
        };
        BookingWizard::new(flight(), options, Arc::new(PricingTable::default())).unwrap()
    }

    fn details(first: &str, email: &str) -> PassengerDetails {
        PassengerDetails {
            title: "Ms".to_string(),
            first_name: first.to_string(),
            last_name: "Reyes".to_string(),
            email: Masked::from(email),
            phone: Masked::from("09171234567"),
            ..Default::default()
        }
    }

    struct RecordingClient {
        fail: bool,
        received: Mutex<Vec<BookingSubmission>>,
    }

    impl RecordingClient {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BookingClient for RecordingClient {
        async fn submit_booking(
            &self,
            submission: &BookingSubmission,
        ) -> CoreResult<BookingReference> {
            self.received.lock().unwrap().push(submission.clone());
            if self.fail {
                return Err(CoreError::Submission("gateway timeout".to_string()));
            }
            Ok(BookingReference("WF-123456".to_string()))
        }
    }

    #[test]
    fn test_step_navigation() {
        let mut wizard = wizard(1);
        assert_eq!(wizard.current_step(), WizardStep::PassengerDetails);

        assert_eq!(wizard.previous(), WizardStep::PassengerDetails);
        assert_eq!(wizard.next(), WizardStep::AddOns);
        assert_eq!(wizard.next(), WizardStep::Payment);
        assert_eq!(wizard.next(), WizardStep::Payment);
        assert_eq!(wizard.previous(), WizardStep::AddOns);
        assert_eq!(wizard.current_step().number(), 2);
    }

    #[test]
    fn test_two_passengers_base_fare() {
        let wizard = wizard(2);
        assert_eq!(wizard.total_price(), 20_000);
    }

    #[test]
    fn test_total_tracks_add_ons() {
        let mut wizard = wizard(1);
        wizard.apply_add_on(0, AddOn::Seat("3C".to_string()));
        wizard.apply_add_on(0, AddOn::Meal("adobo".to_string()));
        wizard.apply_add_on(0, AddOn::Meal("pancit".to_string()));
        assert_eq!(wizard.total_price(), 10_000 + 1_500 + 1_600);

        let outcome = wizard.apply_add_on(0, AddOn::Meal("sisig".to_string()));
        assert_eq!(outcome, AddOnOutcome::Ignored);
        assert_eq!(wizard.passengers()[0].selected_meals.len(), 2);
        assert_eq!(wizard.total_price(), 13_100);
    }

    #[test]
    fn test_add_on_for_missing_passenger_is_ignored() {
        let mut wizard = wizard(1);
        let outcome = wizard.apply_add_on(4, AddOn::CarryOn(CarryOn::Extra));
        assert_eq!(outcome, AddOnOutcome::Ignored);
        assert_eq!(wizard.total_price(), 10_000);
    }

    #[test]
    fn test_passenger_count_reset_discards_selections() {
        let mut wizard = wizard(2);
        wizard.apply_add_on(0, AddOn::CheckedBaggage(TierKey::new("20kg")));
        wizard.apply_add_on(1, AddOn::NeedWheelchair(true));
        wizard.update_passenger_details(0, details("Ana", "ana@example.com"));

        wizard.set_passenger_count(4);
        wizard.set_passenger_count(3);

        assert_eq!(wizard.passengers().len(), 3);
        assert!(wizard.passengers().iter().all(|p| p.has_default_add_ons()));
        assert!(wizard.passengers()[0].details.first_name.is_empty());
        assert_eq!(wizard.total_price(), 30_000);
    }

    #[test]
    fn test_passenger_count_is_clamped() {
        let mut wizard = wizard(1);
        assert_eq!(wizard.set_passenger_count(0), 1);
        assert_eq!(wizard.set_passenger_count(40), DEFAULT_MAX_PASSENGERS);
    }

    #[test]
    fn test_class_change_updates_base_fare() {
        let mut wizard = wizard(2);
        wizard.set_class(CabinClass::Business).unwrap();
        assert_eq!(wizard.total_price(), 48_000);

        let result = wizard.set_class(CabinClass::First);
        assert!(matches!(result, Err(WizardError::FareUnavailable(_))));
        assert_eq!(wizard.selected_class(), CabinClass::Business);
    }

    #[test]
    fn test_base_price_override() {
        let mut wizard = wizard(3);
        wizard.set_base_price(5_000).unwrap();
        assert_eq!(wizard.total_price(), 15_000);
        assert_eq!(wizard.summary().total(), 15_000);
    }

    #[test]
    fn test_out_of_range_base_price_is_rejected() {
        let mut wizard = wizard(2);

        let result = wizard.set_base_price(-1);
        assert!(matches!(result, Err(WizardError::InvalidBaseFare(-1))));

        let result = wizard.set_base_price(Amount::MAX / 2 + 1);
        assert!(matches!(result, Err(WizardError::InvalidBaseFare(_))));

        // Previous fare is kept
        assert_eq!(wizard.base_price_per_passenger(), 10_000);
        assert_eq!(wizard.total_price(), 20_000);
    }

    #[tokio::test]
    async fn test_submit_requires_payment_step() {
        let mut wizard = wizard(1);
        let client = RecordingClient::new(false);

        let result = wizard.submit(&client).await;
        assert!(matches!(result, Err(WizardError::NotOnPaymentStep(1))));
        assert!(client.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_missing_email_stays_on_payment() {
        let mut wizard = wizard(2);
        wizard.update_passenger_details(0, details("Ana", "ana@example.com"));
        wizard.update_passenger_details(1, details("Ben", ""));
        wizard.next();
        wizard.next();

        let client = RecordingClient::new(false);
        let result = wizard.submit(&client).await;

        match result {
            Err(WizardError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].index, 1);
                assert_eq!(errors[0].missing, vec![RequiredField::Email]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(wizard.current_step(), WizardStep::Payment);
        assert_eq!(wizard.submission(), &SubmissionStatus::Idle);
        assert!(client.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submission_failure_allows_retry() {
        let mut wizard = wizard(1);
        wizard.update_passenger_details(0, details("Ana", "ana@example.com"));
        wizard.apply_add_on(0, AddOn::SportsEquipment(TierKey::new("25kg")));
        wizard.next();
        wizard.next();

        let failing = RecordingClient::new(true);
        let result = wizard.submit(&failing).await;
        assert!(matches!(
            result,
            Err(WizardError::Submission(ref msg)) if msg.contains("gateway timeout")
        ));
        assert_eq!(wizard.current_step(), WizardStep::Payment);
        assert!(matches!(wizard.submission(), SubmissionStatus::Failed(_)));
        assert_eq!(wizard.total_price(), 22_862);

        let working = RecordingClient::new(false);
        let reference = wizard.submit(&working).await.unwrap();
        assert_eq!(reference.as_str(), "WF-123456");
        assert_eq!(wizard.submission(), &SubmissionStatus::Submitted(reference));

        let sent = working.received.lock().unwrap();
        assert_eq!(sent[0].total_price, 22_862);
        assert_eq!(sent[0].passengers[0].add_ons.extra_baggage.sports_equipment, "25kg");
    }

    #[test]
    fn test_validation_error_message_names_passengers() {
        let wizard = wizard(2);
        let err = WizardError::Validation(wizard.validate());
        let message = err.to_string();
        assert!(message.contains("Passenger 1: missing first name, last name, email, phone"));
        assert!(message.contains("Passenger 2"));
    }
}
