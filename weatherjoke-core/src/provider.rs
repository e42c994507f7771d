use crate::{
    Config,
    error::{LookupError, TranslationError},
    model::{JokeText, LanguagePair, PlaceQuery, PlaceResolution, WeatherReading},
    provider::{
        chucknorris::ChuckNorrisJokes,
        mymemory::MyMemoryTranslator,
        openmeteo::{OpenMeteoGeocoder, OpenMeteoWeather},
    },
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod chucknorris;
pub mod http;
pub mod mymemory;
pub mod openmeteo;

/// Resolves a place name to its top-ranked match.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, query: &PlaceQuery) -> Result<PlaceResolution, LookupError>;
}

/// Current conditions at a resolved place.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, place: &PlaceResolution) -> Result<WeatherReading, LookupError>;
}

#[async_trait]
pub trait JokeSource: Send + Sync + Debug {
    async fn random_joke(&self) -> Result<JokeText, LookupError>;
}

#[async_trait]
pub trait Translator: Send + Sync + Debug {
    async fn translate(
        &self,
        text: &str,
        languages: &LanguagePair,
    ) -> Result<String, TranslationError>;
}

/// One implementation per stage, as driven by the orchestrator.
#[derive(Debug)]
pub struct Providers {
    pub geocoder: Box<dyn Geocoder>,
    pub weather: Box<dyn WeatherSource>,
    pub jokes: Box<dyn JokeSource>,
    pub translator: Box<dyn Translator>,
}

/// Construct the HTTP-backed providers from config, sharing one client.
pub fn providers_from_config(config: &Config) -> anyhow::Result<Providers> {
    let client = http::build_client(config)?;
    let endpoints = &config.endpoints;

    Ok(Providers {
        geocoder: Box::new(OpenMeteoGeocoder::new(client.clone(), endpoints.geocoding_url.clone())),
        weather: Box::new(OpenMeteoWeather::new(client.clone(), endpoints.weather_url.clone())),
        jokes: Box::new(ChuckNorrisJokes::new(
            client.clone(),
            endpoints.joke_url.clone(),
            config.translation.source.clone(),
        )),
        translator: Box::new(MyMemoryTranslator::new(
            client,
            endpoints.translation_url.clone(),
            config.translation.contact_email.clone(),
        )),
    })
}
