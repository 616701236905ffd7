use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use wayfare_catalog::{CarryOn, TierKey};
use wayfare_shared::Masked;

/// Meals a passenger may pre-order per flight
pub const MAX_MEALS: usize = 2;

/// Identity fields captured on the passenger details step
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PassengerDetails {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub document_number: Option<String>,
    pub document_expiry: Option<NaiveDate>,
}

impl PassengerDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Fields that must be filled before the booking can be submitted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RequiredField {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequiredField::FirstName => "first name",
            RequiredField::LastName => "last name",
            RequiredField::Email => "email",
            RequiredField::Phone => "phone",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WheelchairType {
    #[default]
    Standard,
    Manual,
    Electric,
    Other(String),
}

impl WheelchairType {
    pub fn as_str(&self) -> &str {
        match self {
            WheelchairType::Standard => "standard",
            WheelchairType::Manual => "manual",
            WheelchairType::Electric => "electric",
            WheelchairType::Other(kind) => kind,
        }
    }
}

impl From<String> for WheelchairType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "standard" => WheelchairType::Standard,
            "manual" => WheelchairType::Manual,
            "electric" => WheelchairType::Electric,
            _ => WheelchairType::Other(value),
        }
    }
}

impl From<WheelchairType> for String {
    fn from(value: WheelchairType) -> Self {
        value.as_str().to_string()
    }
}

/// Wheelchair sub-fields of the special assistance request.
///
/// The wheelchair service is free; `pwd_id` is kept for downstream reporting only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WheelchairRequest {
    pub need_wheelchair: bool,
    pub has_own_wheelchair: bool,
    pub wheelchair_type: WheelchairType,
    pub pwd_id: Option<String>,
}

/// Per-passenger booking state: identity plus add-on selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRecord {
    pub id: Uuid,
    pub details: PassengerDetails,
    pub selected_seat: Option<String>,
    /// Distinct, at most `MAX_MEALS`
    pub selected_meals: Vec<String>,
    pub carry_on: CarryOn,
    pub checked_baggage: TierKey,
    pub sports_equipment: TierKey,
    pub special_assistance: bool,
    pub wheelchair: WheelchairRequest,
}

impl PassengerRecord {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            details: PassengerDetails::default(),
            selected_seat: None,
            selected_meals: Vec::new(),
            carry_on: CarryOn::Included,
            checked_baggage: TierKey::none(),
            sports_equipment: TierKey::none(),
            special_assistance: false,
            wheelchair: WheelchairRequest::default(),
        }
    }

    pub fn meal_slots_left(&self) -> usize {
        MAX_MEALS.saturating_sub(self.selected_meals.len())
    }

    /// True when no add-on differs from a freshly created record
    pub fn has_default_add_ons(&self) -> bool {
        self.selected_seat.is_none()
            && self.selected_meals.is_empty()
            && self.carry_on == CarryOn::Included
            && self.checked_baggage.is_none()
            && self.sports_equipment.is_none()
            && !self.special_assistance
            && self.wheelchair == WheelchairRequest::default()
    }

    /// Required identity fields that are blank
    pub fn missing_required_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.details.first_name.trim().is_empty() {
            missing.push(RequiredField::FirstName);
        }
        if self.details.last_name.trim().is_empty() {
            missing.push(RequiredField::LastName);
        }
        if self.details.email.is_blank() {
            missing.push(RequiredField::Email);
        }
        if self.details.phone.is_blank() {
            missing.push(RequiredField::Phone);
        }
        missing
    }
}

impl Default for PassengerRecord {
    fn default() -> Self {
        Self::new()
    }
}
