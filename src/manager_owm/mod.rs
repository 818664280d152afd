pub mod errors;

use std::time::Duration;
use log::info;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use crate::manager_owm::errors::OwmError;
use crate::models::owm_forecast::ForecastResponse;

const REQUEST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Struct for managing forecast retrieval from OpenWeatherMap
pub struct Owm {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Owm {
    /// Returns an Owm struct ready for fetching forecasts from OpenWeatherMap
    ///
    /// # Arguments
    ///
    /// * 'api_key' - API key for communication with OpenWeatherMap
    pub fn new(api_key: String) -> Result<Owm, OwmError> {
        Owm::with_base_url(api_key, REQUEST_URL.to_string())
    }

    /// Returns an Owm struct pointed at an alternative endpoint,
    /// used by tests to target a local mock server
    ///
    /// # Arguments
    ///
    /// * 'api_key' - API key for communication with OpenWeatherMap
    /// * 'base_url' - full URL of the forecast endpoint
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Owm, OwmError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Owm { client, api_key, base_url })
    }

    /// Retrieves the 5 day / 3 hour forecast for the given city.
    /// A single GET request with no retries, any non-200 status is a
    /// terminal failure carrying the status code and the error body.
    ///
    /// # Arguments
    ///
    /// * 'city' - city name, e.g. "Hyderabad"
    /// * 'country' - optional country code, e.g. "IN"
    pub fn fetch_forecast(&self, city: &str, country: Option<&str>) -> Result<ForecastResponse, OwmError> {
        let q = match country {
            Some(cc) => format!("{},{}", city, cc),
            None => city.to_string(),
        };
        let query = vec![
            ("q", q.as_str()),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ];

        info!("fetching forecast for {}", q);

        let res = self.client
            .get(&self.base_url)
            .query(&query)
            .send()?;

        let status = res.status();
        let body = res.text()?;

        if status != StatusCode::OK {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .map(|v| v.to_string())
                .unwrap_or(body);
            return Err(OwmError::Api { status: status.as_u16(), message });
        }

        let forecast: ForecastResponse = serde_json::from_str(&body)?;

        Ok(forecast)
    }
}
