use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use skypulse_catalog::pricing::{char_code_sum, FORECAST_DAYS};
use skypulse_catalog::PricingEngine;

use crate::models::{position_of_min, PriceForecastDay};

/// Builds 7-day price outlooks for individual flights
#[derive(Debug, Clone, Default)]
pub struct ForecastGenerator {
    pricing: PricingEngine,
}

impl ForecastGenerator {
    pub fn new(pricing: PricingEngine) -> Self {
        Self { pricing }
    }

    /// Project `base_price` over today and the following six days.
    ///
    /// The per-day curve is keyed on `flight_id`, so two flights at the same
    /// price get different shapes while one flight keeps its shape across
    /// refreshes. Only the small jitter drawn from `rng` moves between calls.
    /// Exactly one day comes back with `is_best_day` set: the cheapest, earliest on ties.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        base_price: u32,
        flight_id: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<PriceForecastDay> {
        let seed = char_code_sum(flight_id);

        let mut days: Vec<PriceForecastDay> = today
            .iter_days()
            .take(FORECAST_DAYS)
            .enumerate()
            .map(|(day, date)| {
                let weekday = date.weekday();
                let jitter = rng.gen_range(0.98..=1.02);
                let price = self
                    .pricing
                    .forecast_day_price(base_price, weekday, day, seed, jitter);

                PriceForecastDay {
                    day,
                    date,
                    date_label: date_label(day, date),
                    day_name: date.format("%A").to_string(),
                    short_day: date.format("%a").to_string(),
                    price,
                    is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
                    is_best_day: false,
                }
            })
            .collect();

        if let Some(best) = position_of_min(&days, |d| d.price) {
            days[best].is_best_day = true;
        }
        days
    }
}

fn date_label(day: usize, date: NaiveDate) -> String {
    match day {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a, %b %-d").to_string(),
    }
}
