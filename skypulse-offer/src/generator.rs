use chrono::{Duration, NaiveTime};
use rand::Rng;
use skypulse_catalog::{CabinClass, PricingEngine, CARRIERS};
use skypulse_core::{CoreError, SearchRequest};
use tracing::debug;

use crate::forecast::ForecastGenerator;
use crate::models::{format_duration, position_of_min, Amenities, FlightOffer, QuoteContext};

/// Smallest flight set a search returns
pub const MIN_FLIGHTS: usize = 8;
/// Largest flight set a search returns
pub const MAX_FLIGHTS: usize = 12;
/// Added to the airborne time for every stop
pub const LAYOVER_MINUTES: u32 = 45;

const FIRST_DEPARTURE_HOUR: usize = 5;
const DEPARTURE_WINDOW_HOURS: usize = 16;

/// Generates synthetic flight sets for a route
#[derive(Debug, Clone, Default)]
pub struct FlightGenerator {
    pricing: PricingEngine,
    forecaster: ForecastGenerator,
}

impl FlightGenerator {
    pub fn new(pricing: PricingEngine) -> Self {
        Self {
            forecaster: ForecastGenerator::new(pricing.clone()),
            pricing,
        }
    }

    pub fn forecaster(&self) -> &ForecastGenerator {
        &self.forecaster
    }

    /// Same route, same base price: only the per-flight draws vary.
    pub fn base_price(&self, request: &SearchRequest) -> u32 {
        self.pricing.route_base_price(&request.route_key())
    }

    /// Generate 8-12 offers for the request, cheapest first.
    ///
    /// The cheapest offer (first generated on ties) is flagged as the best deal.
    pub fn generate_flights<R: Rng + ?Sized>(
        &self,
        request: &SearchRequest,
        context: &QuoteContext,
        rng: &mut R,
    ) -> Result<Vec<FlightOffer>, OfferError> {
        request.validate()?;

        let base_price = self.base_price(request);
        let count = rng.gen_range(MIN_FLIGHTS..=MAX_FLIGHTS);

        let mut flights: Vec<FlightOffer> = (0..count)
            .map(|index| self.generate_flight(index, base_price, request, context, rng))
            .collect();

        if let Some(cheapest) = position_of_min(&flights, |f| f.price) {
            flights[cheapest].is_best_deal = true;
        }
        flights.sort_by_key(|f| f.price);

        debug!(
            "Generated {} flights {} -> {} around base price {}",
            flights.len(),
            request.origin,
            request.destination,
            base_price
        );

        Ok(flights)
    }

    fn generate_flight<R: Rng + ?Sized>(
        &self,
        index: usize,
        base_price: u32,
        request: &SearchRequest,
        context: &QuoteContext,
        rng: &mut R,
    ) -> FlightOffer {
        let carrier = &CARRIERS[rng.gen_range(0..CARRIERS.len())];
        let flight_number = format!("{}{}", carrier.code, rng.gen_range(1000..10000));

        // Later flights skew later in the day. Slots may run past 23:xx; only the
        // displayed clock wraps, pricing sees the scheduled hour.
        let hour = (FIRST_DEPARTURE_HOUR + index + rng.gen_range(0..DEPARTURE_WINDOW_HOURS)) as u32;
        let minute = rng.gen_range(0..12) * 5;
        let departure_time = departure_clock(hour, minute);

        let leg_minutes: u32 = rng.gen_range(120..420);
        let stops: u8 = if rng.gen_bool(0.6) { 0 } else { rng.gen_range(1..=2) };
        let layover_minutes = u32::from(stops) * LAYOVER_MINUTES;
        let duration_minutes = leg_minutes + layover_minutes;

        let jitter = rng.gen_range(0.85..=1.15);
        let price = self.pricing.flight_price(base_price, hour, stops, jitter);

        let cabin_class = CabinClass::GENERATED[rng.gen_range(0..CabinClass::GENERATED.len())];
        let seats_left = rng.gen_range(1..=9);
        let amenities = Amenities {
            wifi: rng.gen_bool(0.7),
            food: rng.gen_bool(0.6),
            power: rng.gen_bool(0.7),
            legroom: rng.gen_bool(0.4),
        };

        let (arrival_time, _) =
            departure_time.overflowing_add_signed(Duration::minutes(i64::from(duration_minutes)));

        let id = format!("flight-{}-{}", index, context.batch);
        let weekly_forecast = self.forecaster.generate(price, &id, context.today, rng);

        FlightOffer {
            id,
            airline: carrier.name.to_string(),
            airline_code: carrier.code.to_string(),
            airline_color: carrier.color.to_string(),
            flight_number,
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            departure_time,
            arrival_time,
            duration: format_duration(duration_minutes),
            duration_minutes,
            layover_minutes,
            stops,
            price,
            previous_price: None,
            cabin_class,
            seats_left,
            is_best_deal: false,
            amenities,
            weekly_forecast,
        }
    }
}

/// Wall-clock time of a scheduled slot, wrapping hours past midnight.
fn departure_clock(hour: u32, minute: u32) -> NaiveTime {
    let minutes = i64::from(hour) * 60 + i64::from(minute);
    NaiveTime::default()
        .overflowing_add_signed(Duration::minutes(minutes))
        .0
}

#[derive(Debug, thiserror::Error)]
pub enum OfferError {
    #[error("Invalid search request: {0}")]
    InvalidRequest(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context() -> QuoteContext {
        QuoteContext::new(NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(), 1_730_700_000_000)
    }

    fn nyc_lax() -> SearchRequest {
        SearchRequest::new("NYC", "LAX")
    }

    #[test]
    fn test_base_price_for_nyc_lax() {
        let generator = FlightGenerator::default();
        let expected = 150 + "NYCLAX".chars().map(|c| c as u32).sum::<u32>() % 300;
        assert_eq!(generator.base_price(&nyc_lax()), expected);
        assert_eq!(generator.base_price(&nyc_lax()), 313);
    }

    #[test]
    fn test_generated_set_shape() {
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..25 {
            let flights = generator.generate_flights(&nyc_lax(), &context(), &mut rng).unwrap();
            assert!((MIN_FLIGHTS..=MAX_FLIGHTS).contains(&flights.len()));

            let best: Vec<_> = flights.iter().filter(|f| f.is_best_deal).collect();
            assert_eq!(best.len(), 1);
            assert_eq!(best[0].price, flights.iter().map(|f| f.price).min().unwrap());

            assert!(flights.windows(2).all(|w| w[0].price <= w[1].price));
        }
    }

    #[test]
    fn test_prices_stay_within_multiplier_envelope() {
        let generator = FlightGenerator::default();
        let base = f64::from(generator.base_price(&nyc_lax()));
        let low = (base * 0.85 * 0.9 * 0.85).floor() as u32;
        let high = (base * 1.15 * 1.15 * 1.15).ceil() as u32;

        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..25 {
            for flight in generator.generate_flights(&nyc_lax(), &context(), &mut rng).unwrap() {
                assert!(
                    (low..=high).contains(&flight.price),
                    "{} outside {}..={}",
                    flight.price,
                    low,
                    high
                );
            }
        }
    }

    #[test]
    fn test_flight_fields() {
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(77);
        let flights = generator.generate_flights(&nyc_lax(), &context(), &mut rng).unwrap();

        for flight in &flights {
            assert!(flight.id.starts_with("flight-"));
            assert!(flight.id.ends_with("-1730700000000"));
            assert!(flight.flight_number.starts_with(&flight.airline_code));
            assert_eq!(flight.origin, "NYC");
            assert_eq!(flight.destination, "LAX");
            assert!((1..=9).contains(&flight.seats_left));
            assert!(flight.stops <= 2);
            assert!(matches!(
                flight.cabin_class,
                CabinClass::Economy | CabinClass::PremiumEconomy
            ));
            assert_eq!(flight.departure_time.minute() % 5, 0);

            assert_eq!(flight.layover_minutes, u32::from(flight.stops) * LAYOVER_MINUTES);
            let leg = flight.duration_minutes - flight.layover_minutes;
            assert!((120..420).contains(&leg));
            assert_eq!(flight.duration, format_duration(flight.duration_minutes));

            let departure = flight.departure_time.num_seconds_from_midnight() / 60;
            let arrival = flight.arrival_time.num_seconds_from_midnight() / 60;
            assert_eq!(arrival, (departure + flight.duration_minutes) % (24 * 60));

            assert_eq!(flight.weekly_forecast.len(), 7);
            assert_eq!(flight.weekly_forecast[0].date, context().today);
        }

        let mut ids: Vec<_> = flights.iter().map(|f| f.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), flights.len());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = FlightGenerator::default();
        let a = generator
            .generate_flights(&nyc_lax(), &context(), &mut StdRng::seed_from_u64(8))
            .unwrap();
        let b = generator
            .generate_flights(&nyc_lax(), &context(), &mut StdRng::seed_from_u64(8))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_departure_clock_wraps_past_midnight() {
        assert_eq!(departure_clock(5, 0), NaiveTime::from_hms_opt(5, 0, 0).unwrap());
        assert_eq!(departure_clock(23, 55), NaiveTime::from_hms_opt(23, 55, 0).unwrap());
        assert_eq!(departure_clock(25, 30), NaiveTime::from_hms_opt(1, 30, 0).unwrap());
        assert_eq!(departure_clock(31, 5), NaiveTime::from_hms_opt(7, 5, 0).unwrap());
    }

    #[test]
    fn test_wrapped_departures_are_not_discounted() {
        // A 25:30 slot shows as 01:30 but prices at par, not at the early-morning rate.
        let pricing = PricingEngine::default();
        let slot = departure_clock(25, 30);
        assert_eq!(slot.hour(), 1);
        assert_eq!(pricing.flight_price(313, 25, 1, 1.0), 313);
        assert!(pricing.flight_price(313, slot.hour(), 1, 1.0) < 313);

        // Late slots show up in generated sets: early clock times at high indices.
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(99);
        let wrapped = (0..50)
            .flat_map(|_| generator.generate_flights(&nyc_lax(), &context(), &mut rng).unwrap())
            .filter(|f| f.departure_time.hour() < FIRST_DEPARTURE_HOUR as u32)
            .count();
        assert!(wrapped > 0);
    }

    #[test]
    fn test_same_origin_and_destination_still_quotes() {
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(3);
        let flights = generator
            .generate_flights(&SearchRequest::new("NYC", "NYC"), &context(), &mut rng)
            .unwrap();
        assert!((MIN_FLIGHTS..=MAX_FLIGHTS).contains(&flights.len()));
        assert_eq!(generator.base_price(&SearchRequest::new("NYC", "NYC")), 150 + 468 % 300);
    }

    #[test]
    fn test_rejects_missing_origin() {
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(1);
        let err = generator
            .generate_flights(&SearchRequest::new("", "LAX"), &context(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, OfferError::InvalidRequest(CoreError::Validation(_))));
    }
}
