use wayfare_core::submission::{
    AddOnSummary, BaggageSummary, ExtraBaggage, PassengerSubmission, WheelchairSummary,
};
use wayfare_core::BookingSubmission;

use crate::passenger::PassengerRecord;
use crate::wizard::BookingWizard;

pub const SPECIAL_ASSISTANCE_NOTE: &str = "Special assistance requested";

impl PassengerRecord {
    /// Identity plus add-on summary in the booking API's passenger shape
    pub fn to_submission(&self) -> PassengerSubmission {
        let details = &self.details;
        PassengerSubmission {
            title: details.title.clone(),
            first_name: details.first_name.trim().to_string(),
            last_name: details.last_name.trim().to_string(),
            email: details.email.clone(),
            phone: details.phone.clone(),
            nationality: details.nationality.clone(),
            date_of_birth: details.date_of_birth,
            document_number: details.document_number.clone(),
            document_expiry: details.document_expiry,
            baggage: BaggageSummary {
                carry_on: self.carry_on.allowance().to_string(),
                checked: self.checked_baggage.to_string(),
            },
            add_ons: AddOnSummary {
                seat_selection: self.selected_seat.is_some(),
                meals: self.selected_meals.clone(),
                extra_baggage: ExtraBaggage {
                    checked: self.checked_baggage.to_string(),
                    sports_equipment: self.sports_equipment.to_string(),
                },
            },
            seat_number: self.selected_seat.clone(),
            meal_preference: self.selected_meals.first().cloned(),
            special_assistance: self.special_assistance,
            wheelchair: WheelchairSummary {
                need_wheelchair: self.wheelchair.need_wheelchair,
                has_own_wheelchair: self.wheelchair.has_own_wheelchair,
                wheelchair_type: self.wheelchair.wheelchair_type.as_str().to_string(),
                pwd_id: self.wheelchair.pwd_id.clone(),
            },
        }
    }
}

impl BookingWizard {
    /// Assemble the payload the booking API receives on submit
    pub fn build_payload(&self) -> BookingSubmission {
        let passengers: Vec<PassengerSubmission> =
            self.passengers().iter().map(|p| p.to_submission()).collect();
        let special_requirements = passengers
            .iter()
            .any(|p| p.special_assistance)
            .then(|| SPECIAL_ASSISTANCE_NOTE.to_string());

        BookingSubmission {
            flight_id: self.flight().id.clone(),
            trip_type: self.trip_type(),
            cabin_class: self.selected_class(),
            departure_date: self.departure_date(),
            return_date: self.flight().return_date,
            base_price: self.base_price_per_passenger(),
            total_price: self.total_price(),
            currency: self.pricing().currency().to_string(),
            passengers,
            special_requirements,
        }
    }
}
