//! Locale-aware monetary formatter.
//!
//! Symbol choice follows the ISO 4217 code; placement and separators
//! follow the request language. An explicit `precision` pins both the
//! minimum and maximum fraction digits; otherwise the currency's
//! conventional digits apply.

use serde_json::Value;

use super::numeric::format_grouped;
use super::{FormatContext, FormatError};
use crate::locale::language_of;

pub(super) fn format(value: &Value, ctx: &FormatContext<'_>) -> Result<String, FormatError> {
    let Some(payload) = value.as_object() else {
        // A bare scalar carries no currency code.
        return Err(FormatError::MissingCurrency);
    };
    let amount = payload
        .get("value")
        .and_then(Value::as_f64)
        .ok_or_else(|| FormatError::InvalidAmount(value.to_string()))?;
    let code = match payload.get("currency") {
        None | Some(Value::Null) => return Err(FormatError::MissingCurrency),
        Some(Value::String(code)) => validate_code(code)?,
        Some(other) => return Err(FormatError::InvalidCurrency(other.to_string())),
    };
    let precision = payload
        .get("precision")
        .and_then(Value::as_u64)
        .map_or_else(|| default_precision(&code), |digits| digits as usize);

    let number = format_grouped(amount, precision, ctx.locale);
    Ok(place_symbol(&number, &code, ctx.locale))
}

fn validate_code(code: &str) -> Result<String, FormatError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(FormatError::InvalidCurrency(code.to_owned()))
    }
}

/// Conventional fraction digits per ISO 4217.
fn default_precision(code: &str) -> usize {
    match code {
        "CLP" | "JPY" | "KRW" | "VND" => 0,
        _ => 2,
    }
}

fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "CNY" | "JPY" => Some("¥"),
        "KRW" => Some("₩"),
        "INR" => Some("₹"),
        "RUB" => Some("₽"),
        "BRL" => Some("R$"),
        _ => None,
    }
}

/// English and the East Asian locales prefix the symbol; the European
/// locales suffix it with a space. Codes without a symbol always trail.
fn place_symbol(number: &str, code: &str, locale: &str) -> String {
    match symbol(code) {
        Some(mark) => match language_of(locale) {
            "en" | "ja" | "ko" | "zh" => format!("{mark}{number}"),
            _ => format!("{number} {mark}"),
        },
        None => format!("{number} {code}"),
    }
}
