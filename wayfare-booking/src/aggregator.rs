use serde::Serialize;
use wayfare_catalog::{AddOnCategory, Amount, CarryOn, PricingTable};

use crate::passenger::PassengerRecord;

/// One priced line of a passenger's add-ons
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChargeLine {
    pub category: AddOnCategory,
    pub description: String,
    pub quantity: u32,
    pub amount: Amount,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PassengerCharges {
    pub index: usize,
    pub name: String,
    pub lines: Vec<ChargeLine>,
}

impl PassengerCharges {
    pub fn subtotal(&self) -> Amount {
        self.lines.iter().fold(0, |acc, l| acc.saturating_add(l.amount))
    }
}

/// Itemised booking price for the summary panel
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base_price_per_passenger: Amount,
    pub passenger_count: usize,
    pub base_total: Amount,
    pub passengers: Vec<PassengerCharges>,
    pub currency: String,
}

impl PriceBreakdown {
    pub fn extras_total(&self) -> Amount {
        self.passengers
            .iter()
            .fold(0, |acc, p| acc.saturating_add(p.subtotal()))
    }

    pub fn total(&self) -> Amount {
        self.base_total.saturating_add(self.extras_total())
    }
}

/// Derives booking totals from the passenger list.
///
/// Nothing is cached: every call recomputes from its inputs.
pub struct PriceAggregator<'a> {
    table: &'a PricingTable,
}

impl<'a> PriceAggregator<'a> {
    pub fn new(table: &'a PricingTable) -> Self {
        Self { table }
    }

    /// `base * count` plus every passenger's add-on charges, saturating at `Amount::MAX`
    pub fn compute_total(
        &self,
        base_price_per_passenger: Amount,
        passenger_count: usize,
        passengers: &[PassengerRecord],
    ) -> Amount {
        let extras = passengers
            .iter()
            .fold(0, |acc: Amount, p| acc.saturating_add(self.passenger_extras(p)));
        base_total(base_price_per_passenger, passenger_count).saturating_add(extras)
    }

    pub fn passenger_extras(&self, passenger: &PassengerRecord) -> Amount {
        self.charges_for(0, passenger).subtotal()
    }

    /// Add-on lines for one passenger.
    ///
    /// Seats are charged at the flat selection fee here, hot seats included.
    pub fn charges_for(&self, index: usize, passenger: &PassengerRecord) -> PassengerCharges {
        let mut lines = Vec::new();

        if let Some(seat) = &passenger.selected_seat {
            lines.push(ChargeLine {
                category: AddOnCategory::SeatSelection,
                description: format!("Seat {}", seat),
                quantity: 1,
                amount: self.table.seat_selection_fee(),
            });
        }

        if !passenger.selected_meals.is_empty() {
            let quantity = passenger.selected_meals.len() as u32;
            lines.push(ChargeLine {
                category: AddOnCategory::Meal,
                description: passenger.selected_meals.join(", "),
                quantity,
                amount: self.table.meal_price().saturating_mul(quantity as Amount),
            });
        }

        if passenger.carry_on == CarryOn::Extra {
            lines.push(ChargeLine {
                category: AddOnCategory::CarryOn,
                description: format!("Carry-on {}", CarryOn::Extra.allowance()),
                quantity: 1,
                amount: self.table.carry_on_fee(CarryOn::Extra),
            });
        }

        if !passenger.checked_baggage.is_none() {
            lines.push(ChargeLine {
                category: AddOnCategory::CheckedBaggage,
                description: format!("Checked baggage {}", passenger.checked_baggage),
                quantity: 1,
                amount: self.table.checked_baggage_price(&passenger.checked_baggage),
            });
        }

        if !passenger.sports_equipment.is_none() {
            lines.push(ChargeLine {
                category: AddOnCategory::SportsEquipment,
                description: format!("Sports equipment {}", passenger.sports_equipment),
                quantity: 1,
                amount: self.table.sports_equipment_price(&passenger.sports_equipment),
            });
        }

        PassengerCharges {
            index,
            name: passenger.details.full_name(),
            lines,
        }
    }

    pub fn breakdown(
        &self,
        base_price_per_passenger: Amount,
        passenger_count: usize,
        passengers: &[PassengerRecord],
    ) -> PriceBreakdown {
        PriceBreakdown {
            base_price_per_passenger,
            passenger_count,
            base_total: base_total(base_price_per_passenger, passenger_count),
            passengers: passengers
                .iter()
                .enumerate()
                .map(|(i, p)| self.charges_for(i, p))
                .collect(),
            currency: self.table.currency().to_string(),
        }
    }

    /// Running subtotal shown by the seat picker, hot seats at their own fee
    pub fn seat_panel_subtotal(&self, passengers: &[PassengerRecord]) -> Amount {
        passengers
            .iter()
            .filter_map(|p| p.selected_seat.as_deref())
            .fold(0, |acc, seat| acc.saturating_add(self.table.seat_fee(seat)))
    }
}

fn base_total(base_price_per_passenger: Amount, passenger_count: usize) -> Amount {
    let count = Amount::try_from(passenger_count).unwrap_or(Amount::MAX);
    base_price_per_passenger.saturating_mul(count)
}
