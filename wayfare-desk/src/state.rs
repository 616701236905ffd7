use std::sync::Arc;
use wayfare_catalog::PricingTable;
use wayfare_core::{BookingClient, FlightSource};

use crate::app_config::{Config, WizardConfig};
use crate::clients::{InMemoryFlightSource, MockBookingClient};
use crate::error::DeskError;

/// Shared collaborators for a booking session
#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<PricingTable>,
    pub flights: Arc<dyn FlightSource>,
    pub bookings: Arc<dyn BookingClient>,
    pub wizard: WizardConfig,
}

impl AppState {
    /// Wire the in-memory collaborators described by `config`
    pub fn from_config(config: &Config) -> Result<Self, DeskError> {
        let pricing = PricingTable::new(config.pricing.clone())?;
        let flights = InMemoryFlightSource::from_file(&config.session.flights_path)?;
        let bookings = MockBookingClient::new().failing_first(config.session.mock_failures);

        Ok(Self {
            pricing: Arc::new(pricing),
            flights: Arc::new(flights),
            bookings: Arc::new(bookings),
            wizard: config.wizard.clone(),
        })
    }
}
