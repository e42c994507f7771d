use std::io::{self, BufRead, IsTerminal};

use anyhow::{Context, Result};
use inquire::{
    CustomUserError, InquireError, Text,
    validator::Validation,
};

const CITY_PROMPT: &str = "📍 Which city are you in right now?";

/// Read the city name: an interactive prompt on a terminal, one plain line otherwise.
///
/// Cancelling the prompt (Esc / Ctrl-C) yields an empty answer, which the
/// session reports like any other blank input.
pub fn ask_city() -> Result<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return read_line(stdin.lock());
    }

    match Text::new(CITY_PROMPT).with_help_message("e.g. Lisbon, São Paulo, Paris").prompt() {
        Ok(city) => Ok(city),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(String::new()),
        Err(err) => Err(err).context("Failed to read the city name"),
    }
}

/// One line from `reader`; end of input counts as an empty answer.
pub fn read_line<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("Failed to read the city name from stdin")?;
    Ok(line)
}

/// Language codes like `en`, `pt` or `pt-BR`.
pub fn is_language_code(input: &str) -> bool {
    let mut parts = input.split('-');
    let primary = parts.next().unwrap_or_default();
    let region = parts.next();

    let primary_ok = (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    let region_ok = region.is_none_or(|r| {
        (2..=4).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
    });

    primary_ok && region_ok && parts.next().is_none()
}

pub fn validate_language(input: &str) -> Result<Validation, CustomUserError> {
    if is_language_code(input.trim()) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("Use a language code such as en, pt or pt-BR".into()))
    }
}

pub fn validate_timeout(secs: &u64) -> Result<Validation, CustomUserError> {
    if *secs > 0 {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid("The timeout must be at least one second".into()))
    }
}
