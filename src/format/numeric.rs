//! Locale-aware numeric rendering shared by the currency and duration
//! formatters.
//!
//! Separator conventions follow common usage per language: English and the
//! East Asian locales group with `,` and use `.` decimals, French groups
//! with a space and uses `,` decimals, and the remaining European locales
//! group with `.` and use `,` decimals.

use crate::locale::language_of;

pub(crate) fn decimal_separator(locale: &str) -> char {
    match language_of(locale) {
        "de" | "es" | "fr" | "it" | "pt" | "ru" => ',',
        _ => '.',
    }
}

fn group_separator(locale: &str) -> char {
    match language_of(locale) {
        "fr" => ' ',
        "de" | "es" | "it" | "pt" | "ru" => '.',
        _ => ',',
    }
}

/// Render a value with a fixed number of fraction digits, thousands
/// grouping, and the locale's separators.
pub(crate) fn format_grouped(value: f64, precision: usize, locale: &str) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.precision$}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped: Vec<char> = int_part.chars().collect();
    let group = group_separator(locale);
    let mut at = grouped.len();
    while at > 3 {
        at -= 3;
        grouped.insert(at, group);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.extend(grouped);
    if !frac_part.is_empty() {
        out.push(decimal_separator(locale));
        out.push_str(frac_part);
    }
    out
}

/// Render a count without grouping: whole values print as integers,
/// fractional values keep their shortest float form with the locale's
/// decimal separator.
pub(crate) fn format_count(value: f64, locale: &str) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let separator = decimal_separator(locale);
    value.to_string().replace('.', &separator.to_string())
}
