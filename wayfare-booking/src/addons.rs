use serde_json::Value;
use wayfare_catalog::{CarryOn, TierKey};

use crate::passenger::{PassengerRecord, WheelchairType, MAX_MEALS};

/// A single add-on mutation for one passenger
#[derive(Debug, Clone, PartialEq)]
pub enum AddOn {
    /// Selecting the seat already held clears it; a blank seat id clears too
    Seat(String),
    /// Storefront sent null: seat unassigned
    ClearSeat,
    /// Toggles the meal in or out of the selection
    Meal(String),
    CarryOn(CarryOn),
    CheckedBaggage(TierKey),
    SportsEquipment(TierKey),
    SpecialAssistance(bool),
    NeedWheelchair(bool),
    WheelchairType(WheelchairType),
    HasOwnWheelchair(bool),
    PwdId(Option<String>),
    /// Add-on type this engine doesn't know. Applying it leaves the record untouched.
    Other { kind: String, value: Value },
}

impl AddOn {
    /// Map a storefront add-on type string and its raw value onto a variant.
    ///
    /// Unknown kinds and values of the wrong shape come back as `Other`.
    pub fn parse(kind: &str, value: Value) -> AddOn {
        let parsed = match kind {
            "seat" => match &value {
                Value::Null => Some(AddOn::ClearSeat),
                Value::String(s) if s.trim().is_empty() => Some(AddOn::ClearSeat),
                Value::String(s) => Some(AddOn::Seat(s.trim().to_string())),
                _ => None,
            },
            "meal" => value.as_str().map(|s| AddOn::Meal(s.to_string())),
            "carryOnBaggage" => value.as_str().and_then(CarryOn::parse).map(AddOn::CarryOn),
            "checkedBaggage" => value.as_str().map(|s| AddOn::CheckedBaggage(TierKey::new(s))),
            "sportsEquipment" => value.as_str().map(|s| AddOn::SportsEquipment(TierKey::new(s))),
            "specialAssistance" => value.as_bool().map(AddOn::SpecialAssistance),
            "needWheelchair" => value.as_bool().map(AddOn::NeedWheelchair),
            "hasOwnWheelchair" => value.as_bool().map(AddOn::HasOwnWheelchair),
            "wheelchairType" => value
                .as_str()
                .map(|s| AddOn::WheelchairType(WheelchairType::from(s.to_string()))),
            "pwdId" => match &value {
                Value::Null => Some(AddOn::PwdId(None)),
                Value::String(s) if s.trim().is_empty() => Some(AddOn::PwdId(None)),
                Value::String(s) => Some(AddOn::PwdId(Some(s.clone()))),
                _ => None,
            },
            _ => None,
        };

        parsed.unwrap_or_else(|| AddOn::Other {
            kind: kind.to_string(),
            value,
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            AddOn::Seat(_) | AddOn::ClearSeat => "seat",
            AddOn::Meal(_) => "meal",
            AddOn::CarryOn(_) => "carryOnBaggage",
            AddOn::CheckedBaggage(_) => "checkedBaggage",
            AddOn::SportsEquipment(_) => "sportsEquipment",
            AddOn::SpecialAssistance(_) => "specialAssistance",
            AddOn::NeedWheelchair(_) => "needWheelchair",
            AddOn::WheelchairType(_) => "wheelchairType",
            AddOn::HasOwnWheelchair(_) => "hasOwnWheelchair",
            AddOn::PwdId(_) => "pwdId",
            AddOn::Other { kind, .. } => kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOnOutcome {
    Applied,
    /// Rejected without error: meal cap reached, unknown add-on, bad passenger index
    Ignored,
}

/// Applies add-on mutations to passenger records.
///
/// Every operation is total. Rule violations leave the record unchanged and
/// report `Ignored` instead of failing.
pub struct AddOnRuleEngine;

impl AddOnRuleEngine {
    /// Return a copy of `passenger` with `add_on` applied
    pub fn apply(passenger: &PassengerRecord, add_on: AddOn) -> PassengerRecord {
        let mut updated = passenger.clone();
        Self::apply_in_place(&mut updated, add_on);
        updated
    }

    pub fn apply_in_place(passenger: &mut PassengerRecord, add_on: AddOn) -> AddOnOutcome {
        match add_on {
            AddOn::ClearSeat => passenger.selected_seat = None,
            AddOn::Seat(seat) if seat.trim().is_empty() => passenger.selected_seat = None,
            AddOn::Seat(seat) => {
                if passenger.selected_seat.as_deref() == Some(seat.as_str()) {
                    passenger.selected_seat = None;
                } else {
                    passenger.selected_seat = Some(seat);
                }
            }
            AddOn::Meal(meal) => {
                if let Some(pos) = passenger.selected_meals.iter().position(|m| *m == meal) {
                    passenger.selected_meals.remove(pos);
                } else if passenger.selected_meals.len() >= MAX_MEALS {
                    tracing::debug!(
                        "Passenger {} already has {} meals, ignoring {}",
                        passenger.id,
                        MAX_MEALS,
                        meal
                    );
                    return AddOnOutcome::Ignored;
                } else {
                    passenger.selected_meals.push(meal);
                }
            }
            AddOn::CarryOn(carry_on) => passenger.carry_on = carry_on,
            AddOn::CheckedBaggage(tier) => passenger.checked_baggage = tier,
            AddOn::SportsEquipment(tier) => passenger.sports_equipment = tier,
            AddOn::SpecialAssistance(flag) => passenger.special_assistance = flag,
            AddOn::NeedWheelchair(flag) => {
                passenger.wheelchair.need_wheelchair = flag;
                // Clearing the wheelchair keeps the general assistance flag as is
                if flag {
                    passenger.special_assistance = true;
                }
            }
            AddOn::WheelchairType(kind) => passenger.wheelchair.wheelchair_type = kind,
            AddOn::HasOwnWheelchair(flag) => passenger.wheelchair.has_own_wheelchair = flag,
            AddOn::PwdId(id) => passenger.wheelchair.pwd_id = id,
            AddOn::Other { kind, .. } => {
                tracing::debug!(
                    "Unrecognized add-on type {:?}, leaving passenger {} unchanged",
                    kind,
                    passenger.id
                );
                return AddOnOutcome::Ignored;
            }
        }
        AddOnOutcome::Applied
    }
}
