//! Calendar and clock formatters (`date`, `time`, `datetime`).
//!
//! Date-like payloads accept RFC 3339 strings, ISO 8601 date or
//! date-time strings without an offset (read as UTC), or epoch
//! milliseconds, optionally wrapped in `{ value, timezone }`. The
//! effective zone is the payload zone, else the engine zone, else the
//! value's own offset.

use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde_json::Value;

use super::{FormatContext, FormatError};
use crate::locale::language_of;

#[derive(Debug, Clone, Copy)]
enum Style {
    Date,
    Time,
    DateTime,
}

pub(super) fn format_date(value: &Value, ctx: &FormatContext<'_>) -> Result<String, FormatError> {
    render(value, ctx, Style::Date)
}

pub(super) fn format_time(value: &Value, ctx: &FormatContext<'_>) -> Result<String, FormatError> {
    render(value, ctx, Style::Time)
}

pub(super) fn format_datetime(value: &Value, ctx: &FormatContext<'_>) -> Result<String, FormatError> {
    render(value, ctx, Style::DateTime)
}

fn render(value: &Value, ctx: &FormatContext<'_>, style: Style) -> Result<String, FormatError> {
    let (moment, payload_zone) = parse_payload(value)?;
    let pattern = pattern_for(style, ctx.locale);
    let locale = chrono_locale(ctx.locale);
    match payload_zone.or(ctx.timezone) {
        Some(zone) => Ok(moment
            .with_timezone(&zone)
            .format_localized(pattern, locale)
            .to_string()),
        None => Ok(moment.format_localized(pattern, locale).to_string()),
    }
}

/// Extract the moment and any payload-level zone override.
fn parse_payload(value: &Value) -> Result<(DateTime<FixedOffset>, Option<Tz>), FormatError> {
    match value {
        Value::Object(payload) => {
            let inner = payload
                .get("value")
                .ok_or_else(|| FormatError::InvalidDate(value.to_string()))?;
            let (moment, _) = parse_payload(inner)?;
            let zone = match payload.get("timezone") {
                None | Some(Value::Null) => None,
                Some(Value::String(name)) => Some(parse_zone(name)?),
                Some(other) => return Err(FormatError::UnknownTimezone(other.to_string())),
            };
            Ok((moment, zone))
        }
        Value::String(text) => Ok((parse_moment(text)?, None)),
        Value::Number(epoch) => {
            let millis = epoch
                .as_i64()
                .ok_or_else(|| FormatError::InvalidDate(epoch.to_string()))?;
            let moment = DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| FormatError::InvalidDate(epoch.to_string()))?;
            Ok((moment.fixed_offset(), None))
        }
        other => Err(FormatError::InvalidDate(other.to_string())),
    }
}

fn parse_moment(text: &str) -> Result<DateTime<FixedOffset>, FormatError> {
    if let Ok(moment) = DateTime::parse_from_rfc3339(text) {
        return Ok(moment);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }
    Err(FormatError::InvalidDate(text.to_owned()))
}

fn parse_zone(name: &str) -> Result<Tz, FormatError> {
    name.parse::<Tz>()
        .map_err(|_| FormatError::UnknownTimezone(name.to_owned()))
}

/// English keeps the 12-hour clock with a day-period marker; every other
/// language uses the 24-hour clock.
fn pattern_for(style: Style, locale: &str) -> &'static str {
    let twelve_hour = language_of(locale) == "en";
    match (style, twelve_hour) {
        (Style::Date, _) => "%-d %B %Y",
        (Style::Time, true) => "%-I:%M %p",
        (Style::Time, false) => "%H:%M",
        (Style::DateTime, true) => "%A %-d %B %Y %-I:%M %p",
        (Style::DateTime, false) => "%A %-d %B %Y %H:%M",
    }
}

/// Map a language onto the closed glibc-style locale set chrono renders
/// with. Unknown languages render with POSIX month and weekday names.
fn chrono_locale(tag: &str) -> Locale {
    match language_of(tag) {
        "ar" => Locale::ar_SA,
        "de" => Locale::de_DE,
        "en" => Locale::en_US,
        "es" => Locale::es_ES,
        "fr" => Locale::fr_FR,
        "it" => Locale::it_IT,
        "ja" => Locale::ja_JP,
        "ko" => Locale::ko_KR,
        "nl" => Locale::nl_NL,
        "pt" => Locale::pt_PT,
        "ru" => Locale::ru_RU,
        "zh" => Locale::zh_CN,
        _ => Locale::POSIX,
    }
}
