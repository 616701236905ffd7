use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::category::{AddOnCategory, CarryOn, TierKey};
use crate::Amount;

/// One row of a weight-tier table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierPrice {
    pub key: TierKey,
    pub price: Amount,
}

impl TierPrice {
    pub fn new(key: &str, price: Amount) -> Self {
        Self {
            key: TierKey::new(key),
            price,
        }
    }
}

/// Add-on price list, as loaded from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Flat fee charged in the booking total for any selected seat
    pub seat_selection_fee: Amount,

    /// Seat picker fee for seats listed in `hot_seats`
    pub hot_seat_fee: Amount,

    /// Seat identifiers charged at the hot-seat fee (front row, exit rows)
    pub hot_seats: Vec<String>,

    /// Price per selected meal
    pub meal_price: Amount,

    /// Upgrade from 7kg to 14kg cabin bag
    pub carry_on_extra_fee: Amount,

    /// Ordered, ascending, first entry must be `none`
    pub checked_baggage_tiers: Vec<TierPrice>,

    /// Ordered, ascending, first entry must be `none`
    pub sports_equipment_tiers: Vec<TierPrice>,

    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let hot_seats = ["1", "12", "14"]
            .iter()
            .flat_map(|row| ["A", "B", "C", "D", "E", "F"].map(|col| format!("{}{}", row, col)))
            .collect();

        Self {
            seat_selection_fee: 1_500,
            hot_seat_fee: 2_500,
            hot_seats,
            meal_price: 800,
            carry_on_extra_fee: 2_340,
            checked_baggage_tiers: vec![
                TierPrice::new(TierKey::NONE, 0),
                TierPrice::new("20kg", 8_655),
                TierPrice::new("25kg", 10_385),
                TierPrice::new("30kg", 12_115),
                TierPrice::new("35kg", 13_845),
                TierPrice::new("40kg", 15_575),
                TierPrice::new("50kg", 19_035),
                TierPrice::new("60kg", 22_495),
            ],
            sports_equipment_tiers: vec![
                TierPrice::new(TierKey::NONE, 0),
                TierPrice::new("20kg", 10_290),
                TierPrice::new("25kg", 12_862),
                TierPrice::new("30kg", 15_434),
                TierPrice::new("35kg", 18_006),
                TierPrice::new("40kg", 20_578),
            ],
            currency: "PHP".to_string(),
        }
    }
}

impl PricingConfig {
    /// Reject price lists the table invariants can't hold for
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        for (name, fee) in [
            ("seat_selection_fee", self.seat_selection_fee),
            ("hot_seat_fee", self.hot_seat_fee),
            ("meal_price", self.meal_price),
            ("carry_on_extra_fee", self.carry_on_extra_fee),
        ] {
            if fee < 0 {
                return Err(PricingConfigError::NegativePrice(name.to_string()));
            }
        }

        validate_tiers(AddOnCategory::CheckedBaggage, &self.checked_baggage_tiers)?;
        validate_tiers(AddOnCategory::SportsEquipment, &self.sports_equipment_tiers)?;

        if self.currency.trim().is_empty() {
            return Err(PricingConfigError::MissingCurrency);
        }
        Ok(())
    }
}

fn validate_tiers(category: AddOnCategory, tiers: &[TierPrice]) -> Result<(), PricingConfigError> {
    match tiers.first() {
        Some(first) if first.key.is_none() && first.price == 0 => {}
        _ => return Err(PricingConfigError::MissingNoneTier(category)),
    }

    let mut seen = HashSet::new();
    let mut previous: Option<Amount> = None;
    for tier in tiers {
        if !seen.insert(tier.key.as_str()) {
            return Err(PricingConfigError::DuplicateTier(category, tier.key.to_string()));
        }
        if tier.price < 0 {
            return Err(PricingConfigError::NegativePrice(format!("{:?}/{}", category, tier.key)));
        }
        if let Some(prev) = previous {
            if tier.price <= prev {
                return Err(PricingConfigError::NotAscending(category, tier.key.to_string()));
            }
        }
        previous = Some(tier.price);
    }
    Ok(())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PricingConfigError {
    #[error("Tier table for {0:?} must start with a zero-priced `none` tier")]
    MissingNoneTier(AddOnCategory),

    #[error("Duplicate tier {1} in {0:?} table")]
    DuplicateTier(AddOnCategory, String),

    #[error("Tier {1} in {0:?} table is not priced above the previous tier")]
    NotAscending(AddOnCategory, String),

    #[error("Negative price: {0}")]
    NegativePrice(String),

    #[error("Currency code is required")]
    MissingCurrency,
}

/// Read-only add-on price lookup.
///
/// Built once from a `PricingConfig`; lookups never fail. Keys a tier table
/// doesn't declare price at zero.
#[derive(Debug, Clone)]
pub struct PricingTable {
    config: PricingConfig,
    checked_index: HashMap<TierKey, Amount>,
    sports_index: HashMap<TierKey, Amount>,
    hot_seats: HashSet<String>,
}

impl PricingTable {
    pub fn new(config: PricingConfig) -> Result<Self, PricingConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PricingConfig) -> Self {
        let index = |tiers: &[TierPrice]| {
            tiers
                .iter()
                .map(|t| (t.key.clone(), t.price))
                .collect::<HashMap<_, _>>()
        };
        let checked_index = index(&config.checked_baggage_tiers);
        let sports_index = index(&config.sports_equipment_tiers);
        let hot_seats = config
            .hot_seats
            .iter()
            .map(|s| s.trim().to_ascii_uppercase())
            .collect();

        Self {
            config,
            checked_index,
            sports_index,
            hot_seats,
        }
    }

    /// Price of one unit of `category` at `tier`.
    ///
    /// Flat categories ignore the key, except carry-on where only `extra` is charged.
    pub fn price(&self, category: AddOnCategory, tier: &str) -> Amount {
        match category {
            AddOnCategory::SeatSelection => self.config.seat_selection_fee,
            AddOnCategory::Meal => self.config.meal_price,
            AddOnCategory::CarryOn => match CarryOn::parse(tier) {
                Some(CarryOn::Extra) => self.config.carry_on_extra_fee,
                _ => 0,
            },
            AddOnCategory::CheckedBaggage => lookup(&self.checked_index, tier),
            AddOnCategory::SportsEquipment => lookup(&self.sports_index, tier),
        }
    }

    pub fn seat_selection_fee(&self) -> Amount {
        self.config.seat_selection_fee
    }

    pub fn meal_price(&self) -> Amount {
        self.config.meal_price
    }

    pub fn carry_on_fee(&self, carry_on: CarryOn) -> Amount {
        self.price(AddOnCategory::CarryOn, carry_on.key())
    }

    pub fn checked_baggage_price(&self, tier: &TierKey) -> Amount {
        self.price(AddOnCategory::CheckedBaggage, tier.as_str())
    }

    pub fn sports_equipment_price(&self, tier: &TierKey) -> Amount {
        self.price(AddOnCategory::SportsEquipment, tier.as_str())
    }

    pub fn is_hot_seat(&self, seat: &str) -> bool {
        self.hot_seats.contains(&seat.trim().to_ascii_uppercase())
    }

    /// Per-seat fee shown by the seat picker
    pub fn seat_fee(&self, seat: &str) -> Amount {
        if self.is_hot_seat(seat) {
            self.config.hot_seat_fee
        } else {
            self.config.seat_selection_fee
        }
    }

    /// Declared tier keys for a tiered category, in table order
    pub fn tier_keys(&self, category: AddOnCategory) -> Vec<TierKey> {
        let tiers = match category {
            AddOnCategory::CheckedBaggage => &self.config.checked_baggage_tiers,
            AddOnCategory::SportsEquipment => &self.config.sports_equipment_tiers,
            _ => return Vec::new(),
        };
        tiers.iter().map(|t| t.key.clone()).collect()
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::build(PricingConfig::default())
    }
}

fn lookup(index: &HashMap<TierKey, Amount>, tier: &str) -> Amount {
    match index.get(&TierKey::new(tier)) {
        Some(price) => *price,
        None => {
            tracing::debug!("Unknown tier key {:?}, pricing at 0", tier);
            0
        }
    }
}
