//! One interactive session: a place name goes in, a weather report and a joke come out.
//!
//! The [`Orchestrator`] walks an explicit state machine. Each stage is a single
//! provider call; the driver only moves forward on success and maps failures
//! to either a terminal abort (geocode, weather) or a stage-local message
//! (joke). Translation failures never surface: the original joke is shown.

use std::fmt;

use crate::{
    error::LookupError,
    model::{JokeText, LanguagePair, PlaceQuery, PlaceResolution, TranslatedJoke, WeatherReading},
    provider::Providers,
};

/// A network-bound step of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Geocode,
    Weather,
    Joke,
    Translation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocode => "geocode",
            Stage::Weather => "weather",
            Stage::Joke => "joke",
            Stage::Translation => "translation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user gets to see, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StageStarted(Stage),
    StageFinished(Stage),
    EmptyInput,
    PlaceNotFound,
    GeocodingUnavailable,
    WeatherUnavailable,
    WeatherReport { place: PlaceResolution, reading: WeatherReading },
    JokeUnavailable,
    Joke(TranslatedJoke),
}

impl SessionEvent {
    /// Progress markers are for spinners, not for the transcript.
    pub fn is_progress(&self) -> bool {
        matches!(self, SessionEvent::StageStarted(_) | SessionEvent::StageFinished(_))
    }
}

/// Display sink for session events.
pub trait Reporter {
    fn report(&mut self, event: SessionEvent);
}

impl Reporter for Vec<SessionEvent> {
    fn report(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    AwaitingInput(String),
    ResolvingPlace(PlaceQuery),
    ResolvingWeather(PlaceResolution),
    FetchingJoke,
    TranslatingJoke(JokeText),
    Done,
    AbortedEmptyInput,
    AbortedLookupFailed(Stage),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Done | SessionState::AbortedEmptyInput | SessionState::AbortedLookupFailed(_)
        )
    }
}

/// How a session ended. Done means place and weather were shown, whatever happened to the joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    AbortedEmptyInput,
    AbortedLookupFailed { stage: Stage },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Done)
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    providers: Providers,
    languages: LanguagePair,
}

impl Orchestrator {
    pub fn new(providers: Providers, languages: LanguagePair) -> Self {
        Self { providers, languages }
    }

    /// Drive a session from raw input to a terminal state.
    pub async fn run<R>(&self, input: &str, reporter: &mut R) -> Outcome
    where
        R: Reporter + ?Sized,
    {
        let mut state = SessionState::AwaitingInput(input.to_string());

        loop {
            state = match state {
                SessionState::Done => return Outcome::Done,
                SessionState::AbortedEmptyInput => return Outcome::AbortedEmptyInput,
                SessionState::AbortedLookupFailed(stage) => {
                    return Outcome::AbortedLookupFailed { stage };
                }
                live => self.step(live, reporter).await,
            };
        }
    }

    /// Advance one transition. Terminal states are returned unchanged.
    pub async fn step<R>(&self, state: SessionState, reporter: &mut R) -> SessionState
    where
        R: Reporter + ?Sized,
    {
        match state {
            SessionState::AwaitingInput(raw) => match PlaceQuery::parse(&raw) {
                Ok(query) => SessionState::ResolvingPlace(query),
                Err(_) => {
                    reporter.report(SessionEvent::EmptyInput);
                    SessionState::AbortedEmptyInput
                }
            },

            SessionState::ResolvingPlace(query) => {
                let result =
                    staged(Stage::Geocode, reporter, self.providers.geocoder.resolve(&query)).await;

                match result {
                    Ok(place) => SessionState::ResolvingWeather(place),
                    Err(err) => {
                        log_failure(Stage::Geocode, &err);
                        reporter.report(if err.is_not_found() {
                            SessionEvent::PlaceNotFound
                        } else {
                            SessionEvent::GeocodingUnavailable
                        });
                        SessionState::AbortedLookupFailed(Stage::Geocode)
                    }
                }
            }

            SessionState::ResolvingWeather(place) => {
                let result =
                    staged(Stage::Weather, reporter, self.providers.weather.current(&place)).await;

                match result {
                    Ok(reading) => {
                        reporter.report(SessionEvent::WeatherReport { place, reading });
                        SessionState::FetchingJoke
                    }
                    Err(err) => {
                        log_failure(Stage::Weather, &err);
                        reporter.report(SessionEvent::WeatherUnavailable);
                        SessionState::AbortedLookupFailed(Stage::Weather)
                    }
                }
            }

            SessionState::FetchingJoke => {
                let result = staged(Stage::Joke, reporter, self.providers.jokes.random_joke()).await;

                match result {
                    Ok(joke) => SessionState::TranslatingJoke(joke),
                    Err(err) => {
                        log_failure(Stage::Joke, &err);
                        reporter.report(SessionEvent::JokeUnavailable);
                        SessionState::Done
                    }
                }
            }

            SessionState::TranslatingJoke(joke) => {
                let languages = LanguagePair { source: joke.language.clone(), ..self.languages.clone() };
                let result = staged(
                    Stage::Translation,
                    reporter,
                    self.providers.translator.translate(&joke.original, &languages),
                )
                .await;

                reporter.report(SessionEvent::Joke(TranslatedJoke::or_original(result, &joke)));
                SessionState::Done
            }

            terminal => terminal,
        }
    }
}

async fn staged<R, F>(stage: Stage, reporter: &mut R, work: F) -> F::Output
where
    R: Reporter + ?Sized,
    F: Future,
{
    reporter.report(SessionEvent::StageStarted(stage));
    let output = work.await;
    reporter.report(SessionEvent::StageFinished(stage));
    output
}

fn log_failure(stage: Stage, err: &LookupError) {
    tracing::warn!(%stage, error = %err, "stage failed");
}
