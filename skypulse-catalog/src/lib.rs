pub mod carrier;
pub mod pricing;

pub use carrier::{CabinClass, Carrier, CARRIERS};
pub use pricing::{PricingConfig, PricingEngine};
