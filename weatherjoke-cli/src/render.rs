//! Human-friendly rendering of session events.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::style::{Color, Stylize};
use weatherjoke_core::{
    Outcome, PlaceResolution, Reporter, SessionEvent, Stage, TemperatureBand, TranslatedJoke,
    WeatherReading,
};

use crate::spinner::Spinner;

const CORAL: Color = Color::Rgb { r: 0xFF, g: 0x6B, b: 0x6B };
const TEAL: Color = Color::Rgb { r: 0x4E, g: 0xCD, b: 0xC4 };
const DEEP_TEAL: Color = Color::Rgb { r: 0x1A, g: 0x53, b: 0x5C };
const SNOW: Color = Color::Rgb { r: 0xF7, g: 0xFF, b: 0xF7 };
const SUN: Color = Color::Rgb { r: 0xFF, g: 0xD1, b: 0x66 };
const ROSE: Color = Color::Rgb { r: 0xEF, g: 0x47, b: 0x6F };
const SKY: Color = Color::Rgb { r: 0x1E, g: 0x90, b: 0xFF };
const INK: Color = Color::Rgb { r: 0x33, g: 0x33, b: 0x33 };

const RULE_WIDTH: usize = 50;
const BANNER_WIDTH: usize = 56;

pub const EMPTY_INPUT_MESSAGE: &str = "Please type a city name.";
pub const PLACE_NOT_FOUND_MESSAGE: &str = "City not found. Try again.";
pub const GEOCODING_UNAVAILABLE_MESSAGE: &str = "Could not reach the geocoding service.";
pub const WEATHER_UNAVAILABLE_MESSAGE: &str = "Could not get the weather right now.";
pub const JOKE_UNAVAILABLE_MESSAGE: &str = "Chuck Norris is too busy for jokes right now!";

#[derive(Debug, Clone, Copy)]
enum Badge {
    Oops,
    Warning,
    Error,
}

impl Badge {
    fn label(self) -> &'static str {
        match self {
            Badge::Oops => " OOPS ",
            Badge::Warning => " HEADS UP ",
            Badge::Error => " ERROR ",
        }
    }

    /// (background, badge text, message text)
    fn colors(self) -> (Color, Color, Color) {
        match self {
            Badge::Oops => (CORAL, Color::White, CORAL),
            Badge::Warning => (SUN, INK, SUN),
            Badge::Error => (ROSE, Color::White, ROSE),
        }
    }
}

fn spinner_message(stage: Stage) -> &'static str {
    match stage {
        Stage::Geocode => "Looking up your city...",
        Stage::Weather => "Fetching the weather...",
        Stage::Joke => "Fetching a joke...",
        Stage::Translation => "Translating the joke...",
    }
}

/// Writes the session transcript to `out`.
///
/// [`Reporter::report`] cannot fail, so the first write error is kept and
/// returned by [`Console::finish`].
pub struct Console<W: Write> {
    out: W,
    color: bool,
    spinners: bool,
    spinner: Option<Spinner>,
    error: Option<io::Error>,
}

impl Console<Stdout> {
    /// Colors and spinner only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn stdout() -> Self {
        let tty = io::stdout().is_terminal();
        let color = tty && std::env::var_os("NO_COLOR").is_none();
        Console::new(io::stdout(), color, tty)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool, spinners: bool) -> Self {
        Self { out, color, spinners, spinner: None, error: None }
    }

    pub fn banner(&mut self) {
        let stars = "★".repeat(BANNER_WIDTH);
        let lines = [
            String::new(),
            self.paint(&stars, CORAL, true),
            self.paint("         WEATHER & GIGGLES - BRIGHTEN YOUR DAY          ", TEAL, true),
            self.paint(&stars, CORAL, true),
            String::new(),
            self.paint("Hi! I'm your personal weather assistant 🌈", SNOW, false),
            self.paint("Tell me where you are and I'll bring you:", SUN, false),
            self.paint("✅ The current weather", TEAL, false),
            self.paint("✅ An epic Chuck Norris joke!", CORAL, false),
            String::new(),
        ];
        for line in lines {
            self.line(&line);
        }
    }

    /// Closing line once the session is over. Empty input already got its message.
    pub fn closing(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Done => {
                let line = self.paint("Have a great day! 😊", TEAL, true);
                self.line("");
                self.line(&line);
            }
            Outcome::AbortedLookupFailed { .. } => {
                let line =
                    self.paint("Looks like I couldn't get the weather. Try again later!", SUN, false);
                self.line("");
                self.line(&line);
            }
            Outcome::AbortedEmptyInput => {}
        }
    }

    /// Stop any spinner, flush, and surface the first write error.
    pub fn finish(&mut self) -> io::Result<()> {
        self.stop_spinner();
        if let Err(err) = self.out.flush() {
            self.error.get_or_insert(err);
        }
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn weather(&mut self, place: &PlaceResolution, reading: &WeatherReading) {
        let temperature_color = match reading.band() {
            TemperatureBand::Hot => CORAL,
            TemperatureBand::Cold => SKY,
            TemperatureBand::Mild => SUN,
        };

        let title = self.paint("WEATHER NOW", DEEP_TEAL, true);
        let location = format!(
            "{} {}",
            self.paint("📍 Location:", TEAL, true),
            self.paint(&place.label(), SNOW, false)
        );
        let temperature = format!(
            "{} {}",
            self.paint("🌡️  Temperature:", TEAL, true),
            self.paint(&reading.to_string(), temperature_color, true)
        );

        self.rule();
        self.line(&title);
        self.line(&location);
        self.line(&temperature);
        if let Some(observed_at) = reading.observed_at {
            let observed = format!(
                "{} {}",
                self.paint("🕒 Observed:", TEAL, true),
                self.paint(&observed_at.format("%H:%M GMT").to_string(), SNOW, false)
            );
            self.line(&observed);
        }
        self.rule();
    }

    fn joke(&mut self, joke: &TranslatedJoke) {
        let title = self.paint("😂  CHUCK NORRIS MOMENT", SUN, true);
        let body = self.paint(&format!("💬  {}", joke.text), SNOW, false);

        self.rule();
        self.line(&title);
        self.line(&body);
        self.rule();
    }

    fn notice(&mut self, badge: Badge, message: &str) {
        let (background, label_color, text_color) = badge.colors();
        let label = if self.color {
            badge.label().with(label_color).on(background).bold().to_string()
        } else {
            badge.label().to_string()
        };
        let text = self.paint(message, text_color, false);
        self.line(&format!("{label} {text}"));
    }

    fn rule(&mut self) {
        let rule = self.paint(&"━".repeat(RULE_WIDTH), Color::Grey, false);
        self.line(&rule);
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        match (self.color, bold) {
            (false, _) => text.to_string(),
            (true, false) => text.with(color).to_string(),
            (true, true) => text.with(color).bold().to_string(),
        }
    }

    fn line(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{text}") {
            self.error = Some(err);
        }
    }

    fn start_spinner(&mut self, stage: Stage) {
        self.stop_spinner();
        if self.spinners {
            let _ = self.out.flush();
            self.spinner = Some(Spinner::start(io::stdout(), spinner_message(stage).to_string()));
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
    }
}

impl<W: Write> Reporter for Console<W> {
    fn report(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StageStarted(stage) => self.start_spinner(stage),
            SessionEvent::StageFinished(_) => self.stop_spinner(),
            SessionEvent::EmptyInput => self.notice(Badge::Oops, EMPTY_INPUT_MESSAGE),
            SessionEvent::PlaceNotFound => self.notice(Badge::Warning, PLACE_NOT_FOUND_MESSAGE),
            SessionEvent::GeocodingUnavailable => {
                self.notice(Badge::Error, GEOCODING_UNAVAILABLE_MESSAGE)
            }
            SessionEvent::WeatherUnavailable => self.notice(Badge::Error, WEATHER_UNAVAILABLE_MESSAGE),
            SessionEvent::WeatherReport { place, reading } => self.weather(&place, &reading),
            SessionEvent::JokeUnavailable => self.notice(Badge::Error, JOKE_UNAVAILABLE_MESSAGE),
            SessionEvent::Joke(joke) => self.joke(&joke),
        }
    }
}
