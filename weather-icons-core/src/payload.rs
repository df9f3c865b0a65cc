//! Adapters for weather payloads served by the dashboard backend.
//!
//! Only `is_day` and `condition.code` matter for icon lookup; every other
//! field of the response is ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    code::{ConditionCode, TimeOfDay},
    resolver::IconRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid weather payload JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("weather payload has no `{0}` object")]
    MissingSection(&'static str),
}

/// Condition fields extracted from a `current` block or a forecast hour.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionPayload {
    pub code: ConditionCode,
    pub time_of_day: TimeOfDay,
    pub text: Option<String>,
}

impl ConditionPayload {
    /// Parse either a full response (with a `current` block) or a bare condition object.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(json)?;
        let block = value.get("current").unwrap_or(&value);
        Self::from_value(block)
    }

    pub fn from_value(value: &Value) -> Result<Self, PayloadError> {
        let raw = RawBlock::deserialize(value)?;
        Ok(raw.into())
    }

    /// Every hourly entry of `forecast.forecastday[].hour[]`, in payload order.
    pub fn forecast_hours(json: &str) -> Result<Vec<Self>, PayloadError> {
        let value: Value = serde_json::from_str(json)?;
        let raw = RawForecastResponse::deserialize(&value)?;
        let forecast = raw.forecast.ok_or(PayloadError::MissingSection("forecast"))?;

        Ok(forecast
            .forecastday
            .into_iter()
            .flat_map(|day| day.hour)
            .map(Self::from)
            .collect())
    }

    pub fn to_request(&self) -> IconRequest {
        IconRequest::new(self.code, self.time_of_day)
    }
}

impl From<&ConditionPayload> for IconRequest {
    fn from(payload: &ConditionPayload) -> Self {
        payload.to_request()
    }
}

/// Numbers arrive as ints, floats, booleans or numeric strings depending on
/// which backend path produced them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Loose {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Loose::Number(n) => Some(*n),
            Loose::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Loose::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawCondition {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    code: Option<Loose>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBlock {
    #[serde(default)]
    is_day: Option<Loose>,
    #[serde(default)]
    condition: Option<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawForecastDay {
    #[serde(default)]
    hour: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    #[serde(default)]
    forecastday: Vec<RawForecastDay>,
}

#[derive(Debug, Deserialize)]
struct RawForecastResponse {
    #[serde(default)]
    forecast: Option<RawForecast>,
}

impl From<RawBlock> for ConditionPayload {
    fn from(raw: RawBlock) -> Self {
        let condition = raw.condition.unwrap_or_default();

        // The backend fills in 1000 when the provider omitted the code.
        let code = ConditionCode::normalize(condition.code.as_ref().and_then(Loose::as_f64));
        let time_of_day = TimeOfDay::normalize(raw.is_day.as_ref().and_then(Loose::as_f64));

        Self { code, time_of_day, text: condition.text }
    }
}
