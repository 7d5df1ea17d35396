pub mod address;
pub mod catalog;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod shipping;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::money::to_cents;

/// Clients send amounts either as JSON numbers or as strings. Anything else
/// is passed on as-is so validation rejects it by field name.
pub(crate) fn amount_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn money(amount: &BigDecimal) -> String {
    to_cents(amount).to_string()
}

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339()
}
