pub mod passenger;
pub mod addons;
pub mod aggregator;
pub mod wizard;
pub mod payload;

pub use addons::{AddOn, AddOnOutcome, AddOnRuleEngine};
pub use aggregator::{ChargeLine, PassengerCharges, PriceAggregator, PriceBreakdown};
pub use passenger::{
    PassengerDetails, PassengerRecord, RequiredField, WheelchairRequest, WheelchairType,
};
pub use wizard::{
    BookingWizard, PassengerValidationError, SubmissionStatus, WizardError, WizardOptions,
    WizardStep, MAX_BASE_FARE,
};
