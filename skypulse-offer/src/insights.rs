use serde::{Deserialize, Serialize};

use crate::models::{position_of_min, FlightOffer, PriceForecastDay};

/// How many of the cheapest flights are compared side by side
pub const TOP_OPTIONS: usize = 3;

/// When to book, judged from a flight's 7-day outlook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Recommendation {
    BookToday,
    WaitUntilTomorrow,
    #[serde(rename_all = "camelCase")]
    WaitUntil { day: usize, date_label: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub min_price: u32,
    pub max_price: u32,
    pub average_price: u32,
    pub today_price: u32,
    pub best_day: PriceForecastDay,
    /// Today's price minus the best day's price
    pub savings: u32,
    /// Savings as a rounded percentage of today's price
    pub savings_percent: u32,
    pub recommendation: Recommendation,
}

impl ForecastSummary {
    pub fn from_forecast(days: &[PriceForecastDay]) -> Option<Self> {
        let today = days.first()?;
        let best_day = match days.iter().find(|d| d.is_best_day) {
            Some(day) => day,
            None => &days[position_of_min(days, |d| d.price)?],
        };

        let prices = days.iter().map(|d| d.price);
        let min_price = prices.clone().min()?;
        let max_price = prices.clone().max()?;
        let total: u64 = prices.map(u64::from).sum();
        let average_price = (total as f64 / days.len() as f64).round() as u32;

        let savings = today.price.saturating_sub(best_day.price);
        let savings_percent = if today.price > 0 {
            (f64::from(savings) * 100.0 / f64::from(today.price)).round() as u32
        } else {
            0
        };

        let recommendation = match best_day.day {
            0 => Recommendation::BookToday,
            1 => Recommendation::WaitUntilTomorrow,
            day => Recommendation::WaitUntil {
                day,
                date_label: best_day.date_label.clone(),
            },
        };

        Some(Self {
            min_price,
            max_price,
            average_price,
            today_price: today.price,
            best_day: best_day.clone(),
            savings,
            savings_percent,
            recommendation,
        })
    }
}

/// Cheapest weekend day against cheapest weekday in one outlook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekendComparison {
    pub cheapest_weekend: PriceForecastDay,
    pub cheapest_weekday: PriceForecastDay,
    /// Negative when the weekend is the cheaper option
    pub weekend_premium: i64,
}

impl WeekendComparison {
    pub fn from_forecast(days: &[PriceForecastDay]) -> Option<Self> {
        let (weekend, weekday): (Vec<_>, Vec<_>) =
            days.iter().cloned().partition(|d| d.is_weekend);

        let cheapest_weekend = weekend[position_of_min(&weekend, |d| d.price)?].clone();
        let cheapest_weekday = weekday[position_of_min(&weekday, |d| d.price)?].clone();
        let weekend_premium = i64::from(cheapest_weekend.price) - i64::from(cheapest_weekday.price);

        Some(Self {
            cheapest_weekend,
            cheapest_weekday,
            weekend_premium,
        })
    }
}

/// Direction of the last live tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "direction", rename_all = "camelCase")]
pub enum PriceTrend {
    Up { delta: u32 },
    Down { delta: u32 },
    Stable,
}

impl PriceTrend {
    pub fn of(flight: &FlightOffer) -> Self {
        let previous = flight.previous_price.unwrap_or(flight.price);
        if flight.price > previous {
            PriceTrend::Up { delta: flight.price - previous }
        } else if flight.price < previous {
            PriceTrend::Down { delta: previous - flight.price }
        } else {
            PriceTrend::Stable
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightPick {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub price: u32,
    pub duration: String,
    pub duration_minutes: u32,
    pub stops: u8,
}

impl From<&FlightOffer> for FlightPick {
    fn from(flight: &FlightOffer) -> Self {
        Self {
            id: flight.id.clone(),
            airline: flight.airline.clone(),
            flight_number: flight.flight_number.clone(),
            price: flight.price,
            duration: flight.duration.clone(),
            duration_minutes: flight.duration_minutes,
            stops: flight.stops,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopOption {
    pub rank: usize,
    #[serde(flatten)]
    pub flight: FlightPick,
    pub best_day: Option<PriceForecastDay>,
    pub savings: u32,
}

/// Overview of one search result set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchInsights {
    pub flight_count: usize,
    pub cheapest: FlightPick,
    pub fastest: FlightPick,
    pub average_price: u32,
    /// How far the cheapest flight sits under the average
    pub below_average: u32,
    /// Outlook of the cheapest flight
    pub forecast: Option<ForecastSummary>,
    pub weekend: Option<WeekendComparison>,
    pub top_options: Vec<TopOption>,
}

impl SearchInsights {
    pub fn analyze(flights: &[FlightOffer]) -> Option<Self> {
        let cheapest = &flights[position_of_min(flights, |f| f.price)?];
        let fastest = &flights[position_of_min(flights, |f| f.duration_minutes)?];

        let total: u64 = flights.iter().map(|f| u64::from(f.price)).sum();
        let average = total as f64 / flights.len() as f64;
        let below_average = (average - f64::from(cheapest.price)).round().max(0.0) as u32;

        let mut by_price: Vec<&FlightOffer> = flights.iter().collect();
        by_price.sort_by_key(|f| f.price);
        let top_options = by_price
            .into_iter()
            .take(TOP_OPTIONS)
            .enumerate()
            .map(|(idx, flight)| {
                let summary = ForecastSummary::from_forecast(&flight.weekly_forecast);
                TopOption {
                    rank: idx + 1,
                    flight: FlightPick::from(flight),
                    savings: summary.as_ref().map_or(0, |s| s.savings),
                    best_day: summary.map(|s| s.best_day),
                }
            })
            .collect();

        Some(Self {
            flight_count: flights.len(),
            cheapest: FlightPick::from(cheapest),
            fastest: FlightPick::from(fastest),
            average_price: average.round() as u32,
            below_average,
            forecast: ForecastSummary::from_forecast(&cheapest.weekly_forecast),
            weekend: WeekendComparison::from_forecast(&cheapest.weekly_forecast),
            top_options,
        })
    }
}
