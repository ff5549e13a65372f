use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates, as returned by the current-conditions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What the user asked for: a free-text city name or explicit coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coords(Coordinates),
}

/// Coarse condition buckets derived from the OpenWeather condition id
/// taxonomy. 2xx-5xx are precipitation groups, 6xx snow, 800 clear sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Precipitation,
    Snow,
    Clear,
    Clouds,
}

impl ConditionKind {
    pub fn from_condition_id(id: u32) -> Self {
        match id {
            200..600 => Self::Precipitation,
            600..700 => Self::Snow,
            800 => Self::Clear,
            _ => Self::Clouds,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Precipitation => "🌧",
            Self::Snow => "🌨",
            Self::Clear => "☀",
            Self::Clouds => "☁",
        }
    }
}

/// One weather observation or forecast point, normalized from either
/// endpoint. Location fields are only populated from current conditions;
/// min/max temperatures only from forecast entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub observation_time: DateTime<Utc>,
    pub condition_id: u32,
    pub condition: String,
    pub icon: String,
    pub temperature_c: f64,
    pub temp_min_c: Option<f64>,
    pub temp_max_c: Option<f64>,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub location_name: Option<String>,
    pub country: Option<String>,
    pub coords: Option<Coordinates>,
}

impl WeatherSample {
    /// UTC calendar date of the observation. Forecast bucketing always uses
    /// this, never the local day boundary.
    pub fn utc_date(&self) -> NaiveDate {
        self.observation_time.date_naive()
    }

    /// Hour of day, 0-23, in UTC.
    pub fn utc_hour(&self) -> u32 {
        self.observation_time.hour()
    }

    pub fn condition_kind(&self) -> ConditionKind {
        ConditionKind::from_condition_id(self.condition_id)
    }
}

/// At most five forecast samples, one per distinct UTC calendar day, in the
/// order the days first appeared in the source list. Produced by
/// [`crate::daily::reduce_to_daily`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyForecast(pub Vec<WeatherSample>);

impl DailyForecast {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherSample> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_kind_buckets() {
        assert_eq!(ConditionKind::from_condition_id(211), ConditionKind::Precipitation);
        assert_eq!(ConditionKind::from_condition_id(500), ConditionKind::Precipitation);
        assert_eq!(ConditionKind::from_condition_id(601), ConditionKind::Snow);
        assert_eq!(ConditionKind::from_condition_id(800), ConditionKind::Clear);
        assert_eq!(ConditionKind::from_condition_id(804), ConditionKind::Clouds);
        assert_eq!(ConditionKind::from_condition_id(701), ConditionKind::Clouds);
    }
}
