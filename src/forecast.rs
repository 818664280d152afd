use chrono::{DateTime, Utc};
use thiserror::Error;
use crate::models::owm_forecast::ForecastResponse;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("no forecast points found in API response")]
    NoData,
}

/// One 3-hour forecast sample, immutable once parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub rain_mm_3h: f64,
    pub pressure_hpa: u32,
    pub condition_text: String,
}

/// Transforms the raw forecast payload into an ordered sequence of
/// forecast points, in the order the API delivered them.
///
/// Missing or malformed fields have already degraded to their documented
/// defaults during decoding, so only a payload with no usable entries at
/// all is an error here.
///
/// # Arguments
///
/// * 'payload' - the deserialized forecast response
pub fn parse_points(payload: &ForecastResponse) -> Result<Vec<ForecastPoint>, ForecastError> {
    let points = payload.list
        .iter()
        .map(|entry| {
            let condition_text = entry.weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default();
            let rain_mm_3h = entry.rain
                .as_ref()
                .map(|r| r.three_hour)
                .unwrap_or(0.0);

            ForecastPoint {
                timestamp: entry.dt,
                temperature_c: entry.main.temp,
                feels_like_c: entry.main.feels_like,
                humidity_pct: entry.main.humidity,
                wind_speed_ms: entry.wind.speed,
                rain_mm_3h,
                pressure_hpa: entry.main.pressure,
                condition_text,
            }
        })
        .collect::<Vec<ForecastPoint>>();

    if points.is_empty() {
        Err(ForecastError::NoData)
    } else {
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn entry(dt: i64, temp: f64, humidity: u8) -> serde_json::Value {
        json!({
            "dt": dt,
            "main": { "temp": temp, "feels_like": temp - 1.0, "humidity": humidity, "pressure": 1012 },
            "wind": { "speed": 3.4 },
            "weather": [ { "description": "light rain" } ],
            "rain": { "3h": 0.6 }
        })
    }

    #[test]
    fn parses_every_entry_in_order() {
        let payload: ForecastResponse = serde_json::from_value(json!({
            "list": [entry(1_700_000_000, 20.0, 50), entry(1_700_010_800, 22.5, 60)]
        })).unwrap();

        let points = parse_points(&payload).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        assert_eq!(points[0].temperature_c, 20.0);
        assert_eq!(points[0].humidity_pct, 50);
        assert_eq!(points[1].temperature_c, 22.5);
        assert_eq!(points[1].humidity_pct, 60);
        assert_eq!(points[0].condition_text, "light rain");
        assert_eq!(points[0].rain_mm_3h, 0.6);
        assert_eq!(points[0].pressure_hpa, 1012);
    }

    #[test]
    fn empty_list_is_an_error() {
        let payload: ForecastResponse = serde_json::from_value(json!({ "list": [] })).unwrap();

        assert!(matches!(parse_points(&payload), Err(ForecastError::NoData)));
    }

    #[test]
    fn missing_list_is_an_error() {
        let payload: ForecastResponse = serde_json::from_value(json!({})).unwrap();

        assert!(matches!(parse_points(&payload), Err(ForecastError::NoData)));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let payload: ForecastResponse = serde_json::from_value(json!({
            "list": [ { "dt": 1_700_000_000, "main": { "temp": 18.2 }, "weather": [] } ]
        })).unwrap();

        let points = parse_points(&payload).unwrap();

        assert_eq!(points[0].temperature_c, 18.2);
        assert_eq!(points[0].feels_like_c, 0.0);
        assert_eq!(points[0].humidity_pct, 0);
        assert_eq!(points[0].wind_speed_ms, 0.0);
        assert_eq!(points[0].rain_mm_3h, 0.0);
        assert_eq!(points[0].pressure_hpa, 0);
        assert_eq!(points[0].condition_text, "");
    }

    #[test]
    fn malformed_fields_fall_back_to_defaults() {
        let payload: ForecastResponse = serde_json::from_value(json!({
            "list": [ {
                "dt": 1_700_000_000,
                "main": { "temp": "warm", "humidity": -3, "pressure": 1008 },
                "wind": "calm",
                "weather": [ { "description": "clear sky" } ],
                "rain": "none"
            } ]
        })).unwrap();

        let points = parse_points(&payload).unwrap();

        assert_eq!(points[0].temperature_c, 0.0);
        assert_eq!(points[0].humidity_pct, 0);
        assert_eq!(points[0].pressure_hpa, 1008);
        assert_eq!(points[0].wind_speed_ms, 0.0);
        assert_eq!(points[0].rain_mm_3h, 0.0);
        assert_eq!(points[0].condition_text, "clear sky");
    }

    #[test]
    fn rain_object_without_3h_field_defaults_to_zero() {
        let payload: ForecastResponse = serde_json::from_value(json!({
            "list": [ { "dt": 1_700_000_000, "rain": {} } ]
        })).unwrap();

        let points = parse_points(&payload).unwrap();

        assert_eq!(points[0].rain_mm_3h, 0.0);
    }
}
