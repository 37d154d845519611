use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Advance-booking multipliers indexed by days ahead of today.
/// Day 0 carries the last-minute premium; day 6 is the cheapest.
pub const ADVANCE_BOOKING_FACTORS: [f64; 7] = [1.25, 1.15, 1.05, 1.0, 0.95, 0.92, 0.90];

/// Number of days in a forecast window
pub const FORECAST_DAYS: usize = ADVANCE_BOOKING_FACTORS.len();

/// Demand multiplier per day of week
pub fn weekday_factor(weekday: Weekday) -> f64 {
    match weekday {
        Weekday::Mon => 0.85,
        Weekday::Tue => 0.90,
        Weekday::Wed => 0.92,
        Weekday::Thu => 0.95,
        Weekday::Fri => 1.10,
        Weekday::Sat => 1.20,
        Weekday::Sun => 1.15,
    }
}

/// Days past the end of the table keep the day-6 rate.
pub fn advance_booking_factor(days_ahead: usize) -> f64 {
    ADVANCE_BOOKING_FACTORS[days_ahead.min(FORECAST_DAYS - 1)]
}

/// Early departures (before 10:00) are discounted, late morning (10:00-11:59) carries a premium.
///
/// Takes the scheduled hour before it is wrapped onto the clock, so late slots
/// past midnight (24 and up) price at par rather than as early departures.
pub fn time_of_day_factor(departure_hour: u32) -> f64 {
    match departure_hour {
        0..=9 => 0.85,
        10 | 11 => 1.1,
        _ => 1.0,
    }
}

/// Nonstop premium, one stop at par, two or more stops discounted
pub fn stops_factor(stops: u8) -> f64 {
    match stops {
        0 => 1.15,
        1 => 1.0,
        _ => 0.9,
    }
}

/// Stable per-flight, per-day multiplier in [0.95, 1.14]
pub fn flight_variation(seed: u64, day: usize) -> f64 {
    0.95 + ((seed + day as u64 * 17) % 20) as f64 / 100.0
}

/// Sum of UTF-16 code units, the hash used for routes and flight ids
pub fn char_code_sum(s: &str) -> u64 {
    s.encode_utf16().map(u64::from).sum()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Lowest price any clamped quote may show
    pub min_price: u32,

    /// Highest price any clamped quote may show
    pub max_price: u32,

    /// Cheapest possible route base price
    pub route_floor: u32,

    /// Route base prices fall in `route_floor..route_floor + route_spread`
    pub route_spread: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            min_price: 99,
            max_price: 999,
            route_floor: 150,
            route_spread: 300,
        }
    }
}

/// Multiplicative fare model over the lookup tables above
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Deterministic base fare for a route key (origin followed by destination).
    pub fn route_base_price(&self, route_key: &str) -> u32 {
        let spread = u64::from(self.config.route_spread.max(1));
        self.config.route_floor + (char_code_sum(route_key) % spread) as u32
    }

    /// Headline price of a flight. Not clamped: only forecast days and re-quotes are bounded.
    pub fn flight_price(&self, base_price: u32, departure_hour: u32, stops: u8, jitter: f64) -> u32 {
        let price = f64::from(base_price)
            * time_of_day_factor(departure_hour)
            * stops_factor(stops)
            * jitter;
        price.round().max(0.0) as u32
    }

    /// Projected price for one forecast day, clamped to the configured bounds.
    pub fn forecast_day_price(
        &self,
        base_price: u32,
        weekday: Weekday,
        days_ahead: usize,
        seed: u64,
        jitter: f64,
    ) -> u32 {
        let price = f64::from(base_price)
            * weekday_factor(weekday)
            * advance_booking_factor(days_ahead)
            * flight_variation(seed, days_ahead)
            * jitter;
        self.clamp(price.round())
    }

    pub fn clamp(&self, price: f64) -> u32 {
        let min = f64::from(self.config.min_price);
        let max = f64::from(self.config.max_price);
        price.clamp(min, max) as u32
    }
}
