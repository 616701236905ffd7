use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use wayfare_booking::{
    AddOn, AddOnOutcome, BookingWizard, PassengerDetails, PassengerValidationError, PriceBreakdown,
    WizardError, WizardOptions, WizardStep,
};
use wayfare_catalog::Amount;
use wayfare_core::{CabinClass, FetchState, TripType};
use wayfare_shared::models::events::{
    BookingRejectedEvent, BookingSubmittedEvent, PassengersResetEvent,
};

use crate::error::DeskError;
use crate::state::AppState;

/// A booking as captured by the storefront, replayed through the wizard
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub flight_id: String,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default)]
    pub cabin_class: CabinClass,
    pub passengers: Vec<PassengerDetails>,
    #[serde(default)]
    pub add_ons: Vec<DraftAddOn>,
    #[serde(default)]
    pub base_price_override: Option<Amount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftAddOn {
    /// Zero-based passenger index
    pub passenger: usize,
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionOutcome {
    Confirmed { reference: String, attempts: u32 },
    Incomplete { passengers: Vec<PassengerValidationError> },
    Failed { reason: String, attempts: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub flight_id: String,
    pub final_step: u8,
    pub total_price: Amount,
    pub seat_panel_subtotal: Amount,
    pub breakdown: PriceBreakdown,
    pub ignored_add_ons: usize,
    pub outcome: SessionOutcome,
    pub reset: PassengersResetEvent,
    pub submitted: Option<BookingSubmittedEvent>,
    pub rejections: Vec<BookingRejectedEvent>,
}

pub fn load_draft(path: &str) -> Result<BookingDraft, DeskError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DeskError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DeskError::Json {
        path: path.to_string(),
        source,
    })
}

/// Drive a draft through Passenger Details → Add-Ons → Payment and submit it
pub async fn run_session(
    state: &AppState,
    draft: BookingDraft,
) -> Result<SessionReport, DeskError> {
    let options = WizardOptions {
        trip_type: draft.trip_type,
        cabin_class: draft.cabin_class,
        passenger_count: draft.passengers.len(),
        max_passengers: state.wizard.max_passengers,
    };

    let mut wizard = match BookingWizard::load(
        state.flights.as_ref(),
        &draft.flight_id,
        options,
        state.pricing.clone(),
    )
    .await
    {
        FetchState::Ready(wizard) => wizard,
        FetchState::Failed(reason) => return Err(DeskError::Load(reason)),
        FetchState::Loading => {
            return Err(DeskError::Load("flight fetch did not complete".to_string()))
        }
    };

    let session_id = wizard.session_id();
    // Count is fixed by the draft, so the list built at load is the only reset
    let reset = PassengersResetEvent {
        session_id,
        passenger_count: wizard.passengers().len(),
        timestamp: chrono::Utc::now().timestamp(),
    };
    if draft.passengers.len() > wizard.passengers().len() {
        tracing::warn!(
            "Draft lists {} passengers, booking capped at {}",
            draft.passengers.len(),
            wizard.passengers().len()
        );
    }

    // Step 1
    for (index, details) in draft.passengers.into_iter().enumerate() {
        wizard.update_passenger_details(index, details);
    }
    if let Some(base) = draft.base_price_override {
        wizard.set_base_price(base)?;
    }
    wizard.next();

    // Step 2
    let mut ignored_add_ons = 0;
    for item in draft.add_ons {
        let add_on = AddOn::parse(&item.kind, item.value);
        if wizard.apply_add_on(item.passenger, add_on) == AddOnOutcome::Ignored {
            ignored_add_ons += 1;
        }
        tracing::debug!("Running total {}", wizard.total_price());
    }
    wizard.next();

    // Step 3
    let mut rejections = Vec::new();
    let mut submitted = None;
    let mut attempts = 0;
    let max_attempts = state.wizard.submit_attempts.max(1);

    let outcome = loop {
        attempts += 1;
        match wizard.submit(state.bookings.as_ref()).await {
            Ok(reference) => {
                submitted = Some(BookingSubmittedEvent::new(
                    session_id,
                    wizard.flight().id.clone(),
                    reference.to_string(),
                    wizard.passengers().len(),
                    wizard.total_price(),
                    wizard.pricing().currency().to_string(),
                ));
                break SessionOutcome::Confirmed {
                    reference: reference.to_string(),
                    attempts,
                };
            }
            Err(WizardError::Validation(passengers)) => {
                rejections.push(BookingRejectedEvent::new(
                    session_id,
                    wizard.flight().id.clone(),
                    WizardError::Validation(passengers.clone()).to_string(),
                ));
                break SessionOutcome::Incomplete { passengers };
            }
            Err(WizardError::Submission(reason)) => {
                rejections.push(BookingRejectedEvent::new(
                    session_id,
                    wizard.flight().id.clone(),
                    reason.clone(),
                ));
                if attempts >= max_attempts {
                    tracing::error!(
                        "Giving up on booking {} after {} attempt(s)",
                        session_id,
                        attempts
                    );
                    break SessionOutcome::Failed { reason, attempts };
                }
                tracing::info!("Retrying booking {} (attempt {})", session_id, attempts + 1);
            }
            Err(e) => return Err(e.into()),
        }
    };

    debug_assert_eq!(wizard.current_step(), WizardStep::Payment);

    Ok(SessionReport {
        session_id,
        flight_id: wizard.flight().id.clone(),
        final_step: wizard.current_step().number(),
        total_price: wizard.total_price(),
        seat_panel_subtotal: wizard.seat_panel_subtotal(),
        breakdown: wizard.summary(),
        ignored_add_ons,
        outcome,
        reset,
        submitted,
        rejections,
    })
}
