pub mod category;
pub mod pricing;

pub use category::{AddOnCategory, CarryOn, TierKey};
pub use pricing::{PricingConfig, PricingConfigError, PricingTable, TierPrice};

/// Whole currency units (the storefront prices in pesos, no minor units)
pub type Amount = i64;
