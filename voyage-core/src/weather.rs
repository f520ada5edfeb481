//! Weather readings and the normalized snapshot attached to itineraries.

use serde::{Deserialize, Serialize};

/// Raw values reported by a weather provider, in provider units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub condition: String,
    pub wind_speed_ms: f64,
}

/// Point-in-time weather for one destination, fully populated or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Temperature in whole degrees Celsius
    pub temp: i64,
    /// Relative humidity percent
    pub humidity: i64,
    /// Short condition label, e.g. "Clear"
    pub condition: String,
    /// Wind speed in whole km/h
    pub wind_speed: i64,
}

const MS_TO_KMH: f64 = 3.6;

impl WeatherSnapshot {
    /// Normalize a provider reading: round temperature and humidity,
    /// convert wind from m/s to km/h and round.
    pub fn from_reading(reading: &WeatherReading) -> Self {
        Self {
            temp: reading.temperature_c.round() as i64,
            humidity: reading.humidity_pct.round() as i64,
            condition: reading.condition.clone(),
            wind_speed: (reading.wind_speed_ms * MS_TO_KMH).round() as i64,
        }
    }
}

impl From<WeatherReading> for WeatherSnapshot {
    fn from(reading: WeatherReading) -> Self {
        Self::from_reading(&reading)
    }
}
