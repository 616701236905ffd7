use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wayfare_shared::Masked;

use crate::flights::{CabinClass, TripType};

/// Payload handed to the booking API on the payment step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub flight_id: String,
    pub trip_type: TripType,
    #[serde(rename = "class")]
    pub cabin_class: CabinClass,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub base_price: i64,
    pub total_price: i64,
    pub currency: String,
    pub passengers: Vec<PassengerSubmission>,
    pub special_requirements: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerSubmission {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub document_number: Option<String>,
    pub document_expiry: Option<NaiveDate>,
    pub baggage: BaggageSummary,
    pub add_ons: AddOnSummary,
    pub seat_number: Option<String>,
    pub meal_preference: Option<String>,
    pub special_assistance: bool,
    pub wheelchair: WheelchairSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BaggageSummary {
    /// `7kg` or `14kg`
    pub carry_on: String,
    pub checked: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddOnSummary {
    pub seat_selection: bool,
    pub meals: Vec<String>,
    pub extra_baggage: ExtraBaggage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtraBaggage {
    pub checked: String,
    pub sports_equipment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WheelchairSummary {
    pub need_wheelchair: bool,
    pub has_own_wheelchair: bool,
    pub wheelchair_type: String,
    pub pwd_id: Option<String>,
}

/// Reference string the booking API returns on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(pub String);

impl BookingReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
