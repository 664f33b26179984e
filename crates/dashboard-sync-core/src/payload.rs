use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// Body of `GET /api/balance`. The balance object stays raw until `success`
/// says it is worth reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub balance: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePayload {
    pub balance: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSnapshot {
    pub amount: f64,
    pub currency: String,
}

impl BalanceResponse {
    /// Decodes the balance object, ignoring the `success` flag.
    pub fn snapshot(&self) -> Result<BalanceSnapshot, FetchError> {
        let Some(raw) = self.balance.as_ref() else {
            return Err(FetchError::decode("successful balance response has no balance object"));
        };
        let payload = BalancePayload::deserialize(raw)
            .map_err(|error| FetchError::decode(format!("malformed balance object: {error}")))?;
        Ok(BalanceSnapshot {
            amount: payload.balance,
            currency: payload.currency,
        })
    }
}

impl BalanceSnapshot {
    /// `"{amount} {currency}"`, with the amount written the way a JS template
    /// literal writes a number.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{} {}", js_number_text(self.amount), self.currency)
    }
}

/// `Number.prototype.toString()` in radix 10: plain decimals for exponents in
/// `-7..21`, exponent form outside, and `-0` written as `0`.
fn js_number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value < 0.0 {
        return format!("-{}", js_number_text(-value));
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `4.25e1`.
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits = mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    let digit_count = digits.len() as i32;
    let point = exponent.parse::<i32>().unwrap_or(0) + 1;

    if digit_count <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - digit_count) as usize))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{whole}.{fraction}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let sign = if point > 0 { '+' } else { '-' };
        let shown = (point - 1).unsigned_abs();
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{shown}")
        } else {
            format!("{lead}.{rest}e{sign}{shown}")
        }
    }
}

/// Body of `GET /api/transactions`. Records stay opaque; any JSON value decodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct TransactionBatch {
    pub success: bool,
    pub records: Vec<Value>,
}

impl TransactionBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Value> for TransactionBatch {
    fn from(value: Value) -> Self {
        let Value::Object(mut object) = value else {
            return Self::default();
        };
        let success = object
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let records = match object.remove("transactions") {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        };
        Self { success, records }
    }
}
