//! Weather ingestion: fetches current conditions and the 3-hourly forecast
//! from OpenWeatherMap and normalizes them into [`WeatherReading`] and
//! [`ForecastDay`] values.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{FORECAST_SAMPLE_STRIDE, MAX_TEMP_OFFSET, OPENWEATHER_API_BASE, USER_AGENT};
use crate::models::{CurrentResponse, ForecastEntry, ForecastResponse};

/// Current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Celsius
    pub temperature: f64,
    /// Display convention: `temperature + 3.3`, not a forecast maximum
    pub max_temp: f64,
    /// Percent, 0-100
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    /// mm over the trailing hour
    pub rainfall: f64,
}

impl WeatherReading {
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            max_temp: temperature + MAX_TEMP_OFFSET,
            humidity,
            wind_speed,
            rainfall,
        }
    }
}

/// One sampled forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    /// mm over the trailing 3 hours
    pub rainfall: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather API returned status {0}")]
    NotFound(StatusCode),
    #[error("Weather API key is not configured")]
    MissingApiKey,
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// OpenWeatherMap client
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, OPENWEATHER_API_BASE.to_string(), timeout)
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(
        api_key: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current conditions for `city`. Any non-success status is `NotFound`.
    pub async fn get_current_weather(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        let data: CurrentResponse = self.make_request("weather", city).await?;
        let rainfall = data.rain.and_then(|r| r.one_hour).unwrap_or(0.0);

        Ok(WeatherReading::new(
            data.main.temp,
            data.main.humidity,
            data.wind.speed,
            rainfall,
        ))
    }

    /// Fetch the forecast for `city` and sample it down to at most `days` entries.
    pub async fn get_forecast(
        &self,
        city: &str,
        days: usize,
    ) -> Result<Vec<ForecastDay>, WeatherError> {
        let data: ForecastResponse = self.make_request("forecast", city).await?;
        sample_daily(&data.list, days)
    }

    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Weather API {} returned {} for {:?}", endpoint, response.status(), city);
            return Err(WeatherError::NotFound(response.status()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

/// Take raw entries 0, 8, 16, ... up to `days` of them.
///
/// Assumes the provider's 3-hour cadence; the first entry is not aligned to
/// a day boundary, so the resulting "days" are approximate.
pub fn sample_daily(entries: &[ForecastEntry], days: usize) -> Result<Vec<ForecastDay>, WeatherError> {
    entries
        .iter()
        .step_by(FORECAST_SAMPLE_STRIDE)
        .take(days)
        .map(|entry| {
            let date_part = entry.dt_txt.split(' ').next().unwrap_or_default();
            let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map_err(|e| WeatherError::Parse(format!("bad dt_txt {:?}: {}", entry.dt_txt, e)))?;

            Ok(ForecastDay {
                date,
                temperature: entry.main.temp,
                humidity: entry.main.humidity,
                rainfall: entry.rain.as_ref().and_then(|r| r.three_hour).unwrap_or(0.0),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MainData, RainData};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn raw_series(len: usize) -> Vec<ForecastEntry> {
        (0..len)
            .map(|i| ForecastEntry {
                dt_txt: format!("2026-10-{:02} {:02}:00:00", 1 + i / 8, (i % 8) * 3),
                main: MainData {
                    temp: i as f64,
                    humidity: 50.0,
                },
                rain: None,
            })
            .collect()
    }

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::with_base_url(
            Some("test-key".to_string()),
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_max_temp_offset() {
        assert_eq!(WeatherReading::new(20.0, 0.0, 0.0, 0.0).max_temp, 20.0 + 3.3);
        assert_eq!(WeatherReading::new(-7.5, 0.0, 0.0, 0.0).max_temp, -7.5 + 3.3);
    }

    #[test]
    fn test_sample_daily_takes_every_eighth() {
        let days = sample_daily(&raw_series(80), 10).unwrap();

        assert_eq!(days.len(), 10);
        let temps: Vec<f64> = days.iter().map(|d| d.temperature).collect();
        let expected: Vec<f64> = (0..10).map(|i| (i * 8) as f64).collect();
        assert_eq!(temps, expected);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        assert_eq!(days[9].date, NaiveDate::from_ymd_opt(2026, 10, 10).unwrap());
    }

    #[test]
    fn test_sample_daily_short_series() {
        // 40 entries is what the 5-day provider endpoint usually returns
        let days = sample_daily(&raw_series(40), 10).unwrap();
        assert_eq!(days.len(), 5);
    }

    #[test]
    fn test_sample_daily_rain_defaults_to_zero() {
        let mut series = raw_series(9);
        series[8].rain = Some(RainData {
            one_hour: None,
            three_hour: Some(4.2),
        });
        let days = sample_daily(&series, 10).unwrap();
        assert_eq!(days[0].rainfall, 0.0);
        assert_eq!(days[1].rainfall, 4.2);
    }

    #[test]
    fn test_sample_daily_bad_timestamp() {
        let mut series = raw_series(1);
        series[0].dt_txt = "yesterday".to_string();
        assert!(matches!(sample_daily(&series, 10), Err(WeatherError::Parse(_))));
    }

    #[tokio::test]
    async fn test_current_weather_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Mumbai"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 29.5, "humidity": 84 },
                "wind": { "speed": 6.1 },
                "rain": { "1h": 12.0 }
            })))
            .mount(&server)
            .await;

        let reading = client_for(&server).get_current_weather("Mumbai").await.unwrap();

        assert_eq!(reading.temperature, 29.5);
        assert_eq!(reading.max_temp, 29.5 + 3.3);
        assert_eq!(reading.humidity, 84.0);
        assert_eq!(reading.wind_speed, 6.1);
        assert_eq!(reading.rainfall, 12.0);
    }

    #[tokio::test]
    async fn test_current_weather_without_rain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 31.0, "humidity": 40 },
                "wind": { "speed": 2.0 }
            })))
            .mount(&server)
            .await;

        let reading = client_for(&server).get_current_weather("Jaipur").await.unwrap();
        assert_eq!(reading.rainfall, 0.0);
    }

    #[tokio::test]
    async fn test_current_weather_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_current_weather("Atlantis").await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(s) if s == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let server = MockServer::start().await;
        let client =
            WeatherClient::with_base_url(None, server.uri(), Duration::from_secs(5)).unwrap();

        let err = client.get_current_weather("Pune").await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_forecast_success() {
        let server = MockServer::start().await;
        let list: Vec<serde_json::Value> = (0..40)
            .map(|i| {
                serde_json::json!({
                    "dt_txt": format!("2026-10-{:02} {:02}:00:00", 16 + i / 8, (i % 8) * 3),
                    "main": { "temp": 25.0, "humidity": 70 },
                    "rain": { "3h": 1.5 }
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Patna"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "list": list })))
            .mount(&server)
            .await;

        let days = client_for(&server).get_forecast("Patna", 3).await.unwrap();

        assert_eq!(days.len(), 3);
        assert_eq!(days[2].date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(days[0].rainfall, 1.5);
    }

    #[tokio::test]
    async fn test_forecast_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).get_forecast("Patna", 10).await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(s) if s == StatusCode::UNAUTHORIZED));
    }
}
