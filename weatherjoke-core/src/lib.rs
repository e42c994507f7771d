//! Core library for the `weatherjoke` CLI.
//!
//! This crate defines:
//! - Configuration & endpoint handling
//! - Abstractions over the geocoding, weather, joke and translation services
//! - Shared domain models and the error taxonomy
//! - The session orchestrator that chains the four lookups
//!
//! It is used by `weatherjoke-cli`, but the orchestrator can be driven by any
//! [`Reporter`] implementation.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;

pub use config::{Config, Endpoints, TranslationConfig};
pub use error::{LookupError, QueryError, TranslationError, TransportError};
pub use model::{
    JokeText, LanguagePair, PlaceQuery, PlaceResolution, TemperatureBand, TranslatedJoke,
    WeatherReading,
};
pub use provider::{Geocoder, JokeSource, Providers, Translator, WeatherSource};
pub use session::{Orchestrator, Outcome, Reporter, SessionEvent, SessionState, Stage};
