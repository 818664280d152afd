use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decodes a value that may be missing or carry an unexpected type,
/// substituting the type's default instead of failing the whole record
///
/// # Arguments
///
/// * 'deserializer' - the serde deserializer for the field
pub fn lenient<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: DeserializeOwned + Default,
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Deserialize, Default)]
pub struct MainMeasurements {
    #[serde(default, deserialize_with = "lenient")]
    pub temp: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub feels_like: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: u8,
    #[serde(default, deserialize_with = "lenient")]
    pub pressure: u32,
}

#[derive(Debug, Deserialize, Default)]
pub struct Wind {
    #[serde(default, deserialize_with = "lenient")]
    pub speed: f64,
}

#[derive(Debug, Deserialize, Default)]
pub struct WeatherDescription {
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct Rain {
    #[serde(rename = "3h", default, deserialize_with = "lenient")]
    pub three_hour: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: MainMeasurements,
    #[serde(default, deserialize_with = "lenient")]
    pub wind: Wind,
    #[serde(default, deserialize_with = "lenient")]
    pub weather: Vec<WeatherDescription>,
    #[serde(default, deserialize_with = "lenient")]
    pub rain: Option<Rain>,
}

#[derive(Debug, Deserialize, Default)]
pub struct City {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    #[serde(default)]
    pub city: Option<City>,
}
