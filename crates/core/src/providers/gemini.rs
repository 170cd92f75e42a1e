use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::advice::{AdvisoryContext, FinancialAdvice, ParsedTransaction};
use crate::models::category::Category;
use super::traits::AdvisoryProvider;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const PROVIDER: &str = "Gemini";

/// Google Gemini `generateContent` provider.
///
/// - **Auth**: API key passed as the `key` query parameter.
/// - **Output**: JSON constrained by a `responseSchema`, returned as the
///   text of the first candidate.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            model,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different endpoint (proxy, local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Send one prompt with a response schema and return the raw JSON text.
    async fn generate(&self, prompt: String, schema: Value) -> Result<String, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Advisor {
                provider: PROVIDER.into(),
                message: format!("HTTP {status}"),
            });
        }

        let resp: GenerateResponse = response.json().await.map_err(|e| CoreError::Advisor {
            provider: PROVIDER.into(),
            message: format!("Failed to parse response: {e}"),
        })?;

        resp.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| CoreError::Advisor {
                provider: PROVIDER.into(),
                message: "Response contained no text".into(),
            })
    }
}

// ── Gemini API response types ───────────────────────────────────────

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAdvice {
    summary: String,
    #[serde(default)]
    suggestions: Vec<String>,
    health_score: f64,
}

// ── Prompts and response decoding ───────────────────────────────────

pub fn transaction_prompt(text: &str, categories: &[Category], today: NaiveDate) -> String {
    let category_list = categories
        .iter()
        .map(|c| format!("{}:{}", c.id, c.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Parse the following bookkeeping text into JSON. Text: \"{text}\". \
         Today's date: {today}. Categories: {category_list}. \
         Identify the amount, the type (expense or income), the category id, a short note and the date."
    )
}

pub fn advice_prompt(context: &AdvisoryContext) -> Result<String, CoreError> {
    let data = serde_json::to_string(context)?;
    Ok(format!(
        "Analyse this financial data and give professional, friendly advice. Data: {data}. \
         Provide a health score (0-100), a summary of spending habits and 3 actionable suggestions."
    ))
}

fn transaction_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "amount": { "type": "NUMBER" },
            "type": { "type": "STRING", "description": "expense or income" },
            "categoryId": { "type": "STRING" },
            "note": { "type": "STRING" },
            "date": { "type": "STRING", "description": "YYYY-MM-DD" }
        },
        "required": ["amount", "type", "categoryId", "note", "date"]
    })
}

fn advice_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "healthScore": { "type": "NUMBER" }
        },
        "required": ["summary", "suggestions", "healthScore"]
    })
}

/// Decode the model's JSON answer for a transaction.
pub fn decode_transaction(text: &str) -> Result<ParsedTransaction, CoreError> {
    serde_json::from_str(text).map_err(|e| CoreError::Advisor {
        provider: PROVIDER.into(),
        message: format!("Unusable transaction answer: {e}"),
    })
}

/// Decode the model's JSON answer for advice. The score is rounded and
/// clamped into 0..=100.
pub fn decode_advice(text: &str) -> Result<FinancialAdvice, CoreError> {
    let raw: RawAdvice = serde_json::from_str(text).map_err(|e| CoreError::Advisor {
        provider: PROVIDER.into(),
        message: format!("Unusable advice answer: {e}"),
    })?;
    if !raw.health_score.is_finite() {
        return Err(CoreError::Advisor {
            provider: PROVIDER.into(),
            message: "Health score is not a number".into(),
        });
    }
    Ok(FinancialAdvice {
        summary: raw.summary,
        suggestions: raw.suggestions,
        health_score: raw.health_score.round().clamp(0.0, 100.0) as u8,
    })
}

#[async_trait]
impl AdvisoryProvider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn parse_transaction(
        &self,
        text: &str,
        categories: &[Category],
        today: NaiveDate,
    ) -> Result<ParsedTransaction, CoreError> {
        let prompt = transaction_prompt(text, categories, today);
        let answer = self.generate(prompt, transaction_schema()).await?;
        let parsed = decode_transaction(&answer)?;
        if parsed.amount <= Decimal::ZERO {
            return Err(CoreError::Advisor {
                provider: PROVIDER.into(),
                message: format!("Parsed amount {} is not positive", parsed.amount),
            });
        }
        Ok(parsed)
    }

    async fn financial_advice(
        &self,
        context: &AdvisoryContext,
    ) -> Result<FinancialAdvice, CoreError> {
        let prompt = advice_prompt(context)?;
        let answer = self.generate(prompt, advice_schema()).await?;
        decode_advice(&answer)
    }
}
