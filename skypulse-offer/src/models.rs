use chrono::{Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use skypulse_catalog::CabinClass;

/// Calendar and id stamp shared by every quote in one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteContext {
    /// Day 0 of every forecast
    pub today: NaiveDate,
    /// Suffix for flight ids, wall-clock milliseconds by default
    pub batch: i64,
}

impl QuoteContext {
    pub fn new(today: NaiveDate, batch: i64) -> Self {
        Self { today, batch }
    }

    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
            batch: Utc::now().timestamp_millis(),
        }
    }
}

/// Onboard amenities
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Amenities {
    pub wifi: bool,
    pub food: bool,
    pub power: bool,
    pub legroom: bool,
}

/// One day of a flight's 7-day price outlook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceForecastDay {
    /// Days after today, 0..=6
    pub day: usize,
    pub date: NaiveDate,
    /// "Today", "Tomorrow", or e.g. "Wed, Oct 21"
    pub date_label: String,
    pub day_name: String,
    pub short_day: String,
    pub price: u32,
    pub is_weekend: bool,
    pub is_best_day: bool,
}

/// A synthetic itinerary quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    pub airline: String,
    pub airline_code: String,
    pub airline_color: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub arrival_time: NaiveTime,
    /// e.g. "5h 35m"
    pub duration: String,
    /// Airborne time plus layovers
    pub duration_minutes: u32,
    pub layover_minutes: u32,
    pub stops: u8,
    pub price: u32,
    /// Price before the last live tick, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<u32>,
    pub cabin_class: CabinClass,
    pub seats_left: u8,
    pub is_best_deal: bool,
    pub amenities: Amenities,
    pub weekly_forecast: Vec<PriceForecastDay>,
}

impl FlightOffer {
    pub fn best_day(&self) -> Option<&PriceForecastDay> {
        self.weekly_forecast.iter().find(|d| d.is_best_day)
    }
}

pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Index of the smallest key, first occurrence on ties.
pub(crate) fn position_of_min<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<usize> {
    let mut best: Option<(usize, K)> = None;
    for (idx, item) in items.iter().enumerate() {
        let k = key(item);
        let lower = match &best {
            Some((_, current)) => k < *current,
            None => true,
        };
        if lower {
            best = Some((idx, k));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Clock times as "HH:MM"
mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(335), "5h 35m");
        assert_eq!(format_duration(120), "2h 0m");
        assert_eq!(format_duration(45), "0h 45m");
    }

    #[test]
    fn test_position_of_min_prefers_first() {
        assert_eq!(position_of_min(&[5, 3, 7, 3], |v| *v), Some(1));
        assert_eq!(position_of_min(&[4, 4, 4], |v| *v), Some(0));
        assert_eq!(position_of_min::<u32, u32>(&[], |v| *v), None);
    }

    #[test]
    fn test_clock_times_serialize_as_hhmm() {
        let offer = FlightOffer {
            id: "flight-0-1".to_string(),
            airline: "Delta Air Lines".to_string(),
            airline_code: "DL".to_string(),
            airline_color: "#0033A0".to_string(),
            flight_number: "DL1234".to_string(),
            origin: "NYC".to_string(),
            destination: "LAX".to_string(),
            departure_time: NaiveTime::from_hms_opt(7, 5, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(12, 40, 0).unwrap(),
            duration: format_duration(335),
            duration_minutes: 335,
            layover_minutes: 0,
            stops: 0,
            price: 320,
            previous_price: None,
            cabin_class: CabinClass::Economy,
            seats_left: 4,
            is_best_deal: true,
            amenities: Amenities::default(),
            weekly_forecast: Vec::new(),
        };

        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["departureTime"], "07:05");
        assert_eq!(json["arrivalTime"], "12:40");
        assert_eq!(json["cabinClass"], "Economy");
        assert!(json.get("previousPrice").is_none());

        let back: FlightOffer = serde_json::from_value(json).unwrap();
        assert_eq!(back, offer);
    }
}
