//! Inline value formatters.
//!
//! Templates reference formatters through the `{{name, format}}` marker
//! form. Each formatter renders a typed placeholder payload under the
//! request locale and effective timezone. Unknown format names are a
//! no-op: the interpolator emits the placeholder's raw value instead.

mod currency;
mod datetime;
mod duration;
pub(crate) mod numeric;

use chrono_tz::Tz;
use serde_json::Value;
use thiserror::Error;

/// Faults raised while rendering a typed placeholder.
///
/// The engine converts these into a structured failure marker on the
/// affected node; the rest of the tree keeps translating.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A currency payload had no currency code.
    #[error("Currency code is required")]
    MissingCurrency,
    /// A currency code was not a three-letter ISO 4217 identifier.
    #[error("currency code '{0}' is not a valid ISO 4217 code")]
    InvalidCurrency(String),
    /// A date payload could not be read as ISO 8601, RFC 3339, or epoch
    /// milliseconds.
    #[error("'{0}' is not a valid date value")]
    InvalidDate(String),
    /// A duration payload had no millisecond value.
    #[error("'{0}' is not a valid duration value")]
    InvalidDuration(String),
    /// A currency payload had no numeric amount.
    #[error("'{0}' is not a valid currency amount")]
    InvalidAmount(String),
    /// A timezone name was not a known IANA zone.
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
}

/// Locale and zone context a formatter renders under.
#[derive(Debug, Clone)]
pub struct FormatContext<'a> {
    /// Full request locale tag.
    pub locale: &'a str,
    /// Engine-level timezone, overridden by a payload-level zone.
    pub timezone: Option<Tz>,
}

/// Dispatch a named formatter.
///
/// Returns `None` for an unknown format name so the caller can fall back
/// to the placeholder's raw value.
pub fn apply(name: &str, value: &Value, ctx: &FormatContext<'_>) -> Option<Result<String, FormatError>> {
    match name {
        "date" => Some(datetime::format_date(value, ctx)),
        "time" => Some(datetime::format_time(value, ctx)),
        "datetime" => Some(datetime::format_datetime(value, ctx)),
        "duration" => Some(duration::format(value, ctx)),
        "currency" => Some(currency::format(value, ctx)),
        _ => None,
    }
}
