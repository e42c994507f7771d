use thiserror::Error;

/// The user gave nothing to look up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("place name is empty")]
    Empty,
}

/// Anything that went wrong talking to an upstream service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {service} failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with status {status}: {body}")]
    Status { service: &'static str, status: reqwest::StatusCode, body: String },

    #[error("{service} returned malformed JSON: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a lookup stage (geocode, weather, joke).
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{0} returned no usable result")]
    NotFound(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}

/// Failure of the translator. Never shown to the user; the original text is used instead.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("translation response had no translated text")]
    MissingText,

    #[error("translation service rejected the request ({status}): {detail}")]
    Rejected { status: String, detail: String },
}
