use chrono::NaiveDate;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use wayfare_booking::WizardError;
use wayfare_catalog::{PricingConfig, PricingTable};
use wayfare_core::{CabinClass, FlightSummary};
use wayfare_desk::app_config::WizardConfig;
use wayfare_desk::clients::{InMemoryFlightSource, MockBookingClient};
use wayfare_desk::{run_session, AppState, BookingDraft, DeskError, SessionOutcome};

fn flights() -> InMemoryFlightSource {
    let mut fares = BTreeMap::new();
    fares.insert(CabinClass::Economy, 10_000);
    fares.insert(CabinClass::Business, 24_000);
    InMemoryFlightSource::new(vec![FlightSummary {
        id: "fl-5j560".to_string(),
        flight_number: "5J 560".to_string(),
        origin: "MNL".to_string(),
        destination: "CEB".to_string(),
        departure_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
        return_date: None,
        fares,
    }])
}

fn state(bookings: Arc<MockBookingClient>, submit_attempts: u32) -> AppState {
    AppState {
        pricing: Arc::new(PricingTable::new(PricingConfig::default()).unwrap()),
        flights: Arc::new(flights()),
        bookings,
        wizard: WizardConfig {
            max_passengers: 9,
            submit_attempts,
        },
    }
}

fn draft(value: serde_json::Value) -> BookingDraft {
    serde_json::from_value(value).unwrap()
}

fn passenger(first: &str, email: &str) -> serde_json::Value {
    json!({
        "title": "Ms",
        "firstName": first,
        "lastName": "Dela Cruz",
        "email": email,
        "phone": "09170001111"
    })
}

#[tokio::test]
async fn test_two_passengers_without_add_ons() {
    let client = Arc::new(MockBookingClient::new());
    let state = state(client.clone(), 1);

    let report = run_session(
        &state,
        draft(json!({
            "flightId": "fl-5j560",
            "passengers": [
                passenger("Ana", "ana@example.com"),
                passenger("Bea", "bea@example.com")
            ]
        })),
    )
    .await
    .unwrap();

    assert_eq!(report.total_price, 20_000);
    assert_eq!(report.final_step, 3);
    assert!(matches!(report.outcome, SessionOutcome::Confirmed { attempts: 1, .. }));
    assert!(report.submitted.is_some());

    let sent = client.received();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].passengers.len(), 2);
    assert_eq!(sent[0].base_price, 10_000);
}

#[tokio::test]
async fn test_add_ons_priced_and_third_meal_ignored() {
    let client = Arc::new(MockBookingClient::new());
    let state = state(client.clone(), 1);

    let report = run_session(
        &state,
        draft(json!({
            "flightId": "fl-5j560",
            "passengers": [passenger("Ana", "ana@example.com")],
            "addOns": [
                { "passenger": 0, "kind": "seat", "value": "12A" },
                { "passenger": 0, "kind": "meal", "value": "adobo" },
                { "passenger": 0, "kind": "meal", "value": "pancit" },
                { "passenger": 0, "kind": "meal", "value": "sisig" },
                { "passenger": 0, "kind": "checkedBaggage", "value": "20kg" },
                { "passenger": 0, "kind": "sportsEquipment", "value": "25kg" },
                { "passenger": 0, "kind": "loungeAccess", "value": true }
            ]
        })),
    )
    .await
    .unwrap();

    assert_eq!(report.total_price, 10_000 + 1_500 + 1_600 + 8_655 + 12_862);
    assert_eq!(report.breakdown.total(), report.total_price);
    // 12A is a hot seat in the picker, flat fee in the total
    assert_eq!(report.seat_panel_subtotal, 2_500);
    assert_eq!(report.ignored_add_ons, 2);

    let sent = client.received();
    assert_eq!(sent[0].passengers[0].add_ons.meals, vec!["adobo", "pancit"]);
    assert_eq!(sent[0].passengers[0].meal_preference.as_deref(), Some("adobo"));
}

#[tokio::test]
async fn test_missing_email_is_reported_not_submitted() {
    let client = Arc::new(MockBookingClient::new());
    let state = state(client.clone(), 3);

    let report = run_session(
        &state,
        draft(json!({
            "flightId": "fl-5j560",
            "passengers": [passenger("Ana", "ana@example.com"), passenger("Bea", "")]
        })),
    )
    .await
    .unwrap();

    match &report.outcome {
        SessionOutcome::Incomplete { passengers } => {
            assert_eq!(passengers.len(), 1);
            assert_eq!(passengers[0].index, 1);
        }
        other => panic!("expected incomplete booking, got {:?}", other),
    }
    assert_eq!(report.final_step, 3);
    assert_eq!(report.rejections.len(), 1);
    assert!(client.received().is_empty());
}

#[tokio::test]
async fn test_submission_retried_after_api_failure() {
    let client = Arc::new(MockBookingClient::new().failing_first(1));
    let state = state(client.clone(), 2);

    let report = run_session(
        &state,
        draft(json!({
            "flightId": "fl-5j560",
            "cabinClass": "business",
            "passengers": [passenger("Ana", "ana@example.com")]
        })),
    )
    .await
    .unwrap();

    assert!(matches!(report.outcome, SessionOutcome::Confirmed { attempts: 2, .. }));
    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.total_price, 24_000);
    assert_eq!(client.received().len(), 2);
}

#[tokio::test]
async fn test_gives_up_after_configured_attempts() {
    let client = Arc::new(MockBookingClient::new().failing_first(5));
    let state = state(client.clone(), 2);

    let report = run_session(
        &state,
        draft(json!({
            "flightId": "fl-5j560",
            "passengers": [passenger("Ana", "ana@example.com")]
        })),
    )
    .await
    .unwrap();

    match report.outcome {
        SessionOutcome::Failed { attempts, reason } => {
            assert_eq!(attempts, 2);
            assert!(reason.contains("Simulated booking API failure"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(report.submitted.is_none());
    assert_eq!(report.final_step, 3);
}

#[tokio::test]
async fn test_unknown_flight_fails_to_load() {
    let client = Arc::new(MockBookingClient::new());
    let state = state(client, 1);

    let result = run_session(
        &state,
        draft(json!({
            "flightId": "fl-missing",
            "passengers": [passenger("Ana", "ana@example.com")]
        })),
    )
    .await;

    assert!(matches!(result, Err(DeskError::Load(_))));
}

#[tokio::test]
async fn test_unsold_cabin_fails_to_load() {
    let client = Arc::new(MockBookingClient::new());
    let state = state(client, 1);

    let result = run_session(
        &state,
        draft(json!({
            "flightId": "fl-5j560",
            "cabinClass": "first",
            "passengers": [passenger("Ana", "ana@example.com")]
        })),
    )
    .await;

    assert!(matches!(result, Err(DeskError::Load(ref msg)) if msg.contains("first")));
}

#[tokio::test]
async fn test_out_of_range_fare_override_is_rejected() {
    let client = Arc::new(MockBookingClient::new());
    let state = state(client.clone(), 1);

    let result = run_session(
        &state,
        draft(json!({
            "flightId": "fl-5j560",
            "passengers": [passenger("Ana", "ana@example.com")],
            "basePriceOverride": 20_000_000
        })),
    )
    .await;

    assert!(matches!(
        result,
        Err(DeskError::Wizard(WizardError::InvalidBaseFare(_)))
    ));
    assert!(client.received().is_empty());
}
