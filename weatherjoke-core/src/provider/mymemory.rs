use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::TranslationError, model::LanguagePair, provider::http::get_json};

use super::Translator;

const SERVICE: &str = "mymemory";

/// Machine translation through the MyMemory `get` endpoint.
#[derive(Debug, Clone)]
pub struct MyMemoryTranslator {
    http: Client,
    url: String,
    contact_email: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(http: Client, url: String, contact_email: Option<String>) -> Self {
        Self { http, url, contact_email }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        languages: &LanguagePair,
    ) -> Result<String, TranslationError> {
        let langpair = languages.to_string();
        let mut query = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = self.contact_email.as_deref() {
            query.push(("de", email));
        }

        let parsed: MmResponse = get_json(&self.http, SERVICE, &self.url, &query).await?;
        parsed.into_translation()
    }
}

#[derive(Debug, Deserialize)]
struct MmResponseData {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MmResponse {
    #[serde(rename = "responseData", default)]
    response_data: Option<MmResponseData>,
    /// A number on success, sometimes a quoted number on errors.
    #[serde(rename = "responseStatus", default)]
    response_status: Option<Value>,
    #[serde(rename = "responseDetails", default)]
    response_details: Option<Value>,
}

impl MmResponse {
    /// Quota and length warnings arrive with HTTP 200 and the warning as
    /// "translated" text, so the embedded status is checked first.
    fn into_translation(self) -> Result<String, TranslationError> {
        let rejected = self.response_status.as_ref().and_then(status_code).filter(|s| *s != 200);
        if let Some(status) = rejected {
            let detail = match self.response_details {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => String::new(),
            };
            return Err(TranslationError::Rejected { status: status.to_string(), detail });
        }

        self.response_data
            .and_then(|data| data.translated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(TranslationError::MissingText)
    }
}

fn status_code(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
