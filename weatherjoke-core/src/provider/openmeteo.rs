use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{PlaceQuery, PlaceResolution, WeatherReading},
    provider::http::get_json,
};

use super::{Geocoder, WeatherSource};

const GEOCODING: &str = "open-meteo geocoding";
const FORECAST: &str = "open-meteo forecast";

/// Open-Meteo's `current_weather.time` format, e.g. `2024-05-01T14:15`.
const OM_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn resolve(&self, query: &PlaceQuery) -> Result<PlaceResolution, LookupError> {
        let parsed: OmGeocodingResponse = get_json(
            &self.http,
            GEOCODING,
            &self.url,
            &[("name", query.as_str()), ("count", "1"), ("language", "en"), ("format", "json")],
        )
        .await?;

        let place = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(LookupError::NotFound(GEOCODING))?;

        tracing::debug!(
            name = %place.name,
            latitude = place.latitude,
            longitude = place.longitude,
            "place resolved"
        );

        Ok(PlaceResolution {
            latitude: place.latitude,
            longitude: place.longitude,
            display_name: place.name,
            country: place.country.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoWeather {
    http: Client,
    url: String,
}

impl OpenMeteoWeather {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoWeather {
    async fn current(&self, place: &PlaceResolution) -> Result<WeatherReading, LookupError> {
        let latitude = place.latitude.to_string();
        let longitude = place.longitude.to_string();

        let parsed: OmForecastResponse = get_json(
            &self.http,
            FORECAST,
            &self.url,
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
            ],
        )
        .await?;

        let current = parsed.current_weather.ok_or(LookupError::NotFound(FORECAST))?;

        let observed_at = current
            .time
            .as_deref()
            .and_then(|t| NaiveDateTime::parse_from_str(t, OM_TIME_FORMAT).ok());

        Ok(WeatherReading { temperature_celsius: current.temperature, observed_at })
    }
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

/// `results` is omitted entirely when nothing matches.
#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    #[serde(default)]
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    #[serde(default)]
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    current_weather: Option<OmCurrentWeather>,
}
