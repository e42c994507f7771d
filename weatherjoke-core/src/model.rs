use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, TranslationError};

/// A place name typed by the user, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery {
    raw_name: String,
}

impl PlaceQuery {
    /// Trim the input and reject it when nothing is left.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }

        Ok(Self { raw_name: trimmed.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.raw_name
    }
}

/// Top-ranked geocoding match for a [`PlaceQuery`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResolution {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub country: String,
}

impl PlaceResolution {
    /// "Paris, France", or just the name when the country is unknown.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.display_name.clone()
        } else {
            format!("{}, {}", self.display_name, self.country)
        }
    }
}

/// Current conditions at a [`PlaceResolution`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// As reported upstream, no unit conversion.
    pub temperature_celsius: f64,
    /// Upstream observation time, GMT.
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherReading {
    pub fn band(&self) -> TemperatureBand {
        TemperatureBand::classify(self.temperature_celsius)
    }
}

impl fmt::Display for WeatherReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.temperature_celsius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Cold,
    Mild,
    Hot,
}

impl TemperatureBand {
    pub const COLD_BELOW: f64 = 15.0;
    pub const HOT_ABOVE: f64 = 30.0;

    pub fn classify(celsius: f64) -> Self {
        if celsius > Self::HOT_ABOVE {
            TemperatureBand::Hot
        } else if celsius < Self::COLD_BELOW {
            TemperatureBand::Cold
        } else {
            TemperatureBand::Mild
        }
    }
}

/// A joke as fetched, before translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeText {
    pub original: String,
    pub language: String,
}

/// The joke as it is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedJoke {
    pub text: String,
}

impl TranslatedJoke {
    /// Keep the translation, or fall back to the untouched original on any error.
    pub fn or_original(result: Result<String, TranslationError>, joke: &JokeText) -> Self {
        let text = result.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "translation failed, showing original joke");
            joke.original.clone()
        });

        Self { text }
    }
}

/// Source and target language codes for the translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self { source: "en".to_string(), target: "pt".to_string() }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_query_trims_input() {
        let query = PlaceQuery::parse("  Paris \n").expect("non-empty input");
        assert_eq!(query.as_str(), "Paris");
    }

    #[test]
    fn place_query_rejects_blank_input() {
        for input in ["", "   ", "\t\n"] {
            assert!(matches!(PlaceQuery::parse(input), Err(QueryError::Empty)));
        }
    }

    #[test]
    fn label_joins_name_and_country() {
        let place = PlaceResolution {
            latitude: 48.85,
            longitude: 2.35,
            display_name: "Paris".into(),
            country: "France".into(),
        };
        assert_eq!(place.label(), "Paris, France");

        let no_country = PlaceResolution { country: String::new(), ..place };
        assert_eq!(no_country.label(), "Paris");
    }

    #[test]
    fn reading_displays_upstream_value() {
        let reading = WeatherReading { temperature_celsius: 18.2, observed_at: None };
        assert_eq!(reading.to_string(), "18.2°C");

        let negative = WeatherReading { temperature_celsius: -3.5, observed_at: None };
        assert_eq!(negative.to_string(), "-3.5°C");
    }

    #[test]
    fn temperature_bands_follow_thresholds() {
        assert_eq!(TemperatureBand::classify(14.9), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::classify(15.0), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::classify(30.0), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::classify(30.1), TemperatureBand::Hot);
    }

    #[test]
    fn translation_error_falls_back_to_original() {
        let joke = JokeText { original: "Chuck Norris counted to infinity. Twice.".into(), language: "en".into() };

        let shown = TranslatedJoke::or_original(Err(TranslationError::MissingText), &joke);
        assert_eq!(shown.text, joke.original);

        let translated = TranslatedJoke::or_original(Ok("Chuck Norris contou até o infinito. Duas vezes.".into()), &joke);
        assert_eq!(translated.text, "Chuck Norris contou até o infinito. Duas vezes.");
    }

    #[test]
    fn language_pair_defaults_to_english_portuguese() {
        assert_eq!(LanguagePair::default().to_string(), "en|pt");
    }
}
