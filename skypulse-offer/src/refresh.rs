use chrono::NaiveDate;
use rand::Rng;
use skypulse_catalog::PricingEngine;
use tracing::debug;

use crate::forecast::ForecastGenerator;
use crate::models::FlightOffer;

/// Largest fractional move of one live tick, either direction
pub const MAX_TICK_SWING: f64 = 0.05;
/// Chance that a tick sells one seat
pub const SEAT_SALE_PROBABILITY: f64 = 0.05;

/// Re-quotes flight sets that were already handed to a caller.
///
/// Both operations return new sets with the same ids in the same order;
/// only price-derived fields move. Best-deal markers and ordering are left
/// as they were quoted.
#[derive(Debug, Clone, Default)]
pub struct MarketSimulator {
    pricing: PricingEngine,
    forecaster: ForecastGenerator,
}

impl MarketSimulator {
    pub fn new(pricing: PricingEngine) -> Self {
        Self {
            forecaster: ForecastGenerator::new(pricing.clone()),
            pricing,
        }
    }

    /// Rebuild every 7-day outlook from the flight's current price.
    pub fn refresh_forecasts<R: Rng + ?Sized>(
        &self,
        flights: &[FlightOffer],
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<FlightOffer> {
        let refreshed: Vec<FlightOffer> = flights
            .iter()
            .map(|flight| FlightOffer {
                weekly_forecast: self.forecaster.generate(flight.price, &flight.id, today, rng),
                ..flight.clone()
            })
            .collect();

        debug!("Refreshed forecasts for {} flights", refreshed.len());
        refreshed
    }

    /// Nudge each headline price by up to 5% and occasionally sell a seat.
    pub fn simulate_price_changes<R: Rng + ?Sized>(
        &self,
        flights: &[FlightOffer],
        rng: &mut R,
    ) -> Vec<FlightOffer> {
        let ticked: Vec<FlightOffer> = flights
            .iter()
            .map(|flight| {
                let current = f64::from(flight.price);
                let change = (rng.gen::<f64>() - 0.5) * 2.0 * MAX_TICK_SWING * current;
                let price = self.pricing.clamp((current + change).round());

                let mut seats_left = flight.seats_left;
                if rng.gen_bool(SEAT_SALE_PROBABILITY) && seats_left > 1 {
                    seats_left -= 1;
                }

                FlightOffer {
                    price,
                    previous_price: Some(flight.price),
                    seats_left,
                    ..flight.clone()
                }
            })
            .collect();

        debug!("Ticked prices for {} flights", ticked.len());
        ticked
    }
}
