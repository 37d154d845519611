pub mod models;
pub mod forecast;
pub mod generator;
pub mod refresh;
pub mod insights;

pub use models::{Amenities, FlightOffer, PriceForecastDay, QuoteContext};
pub use forecast::ForecastGenerator;
pub use generator::{FlightGenerator, OfferError};
pub use refresh::MarketSimulator;
pub use insights::{ForecastSummary, PriceTrend, Recommendation, SearchInsights, WeekendComparison};
