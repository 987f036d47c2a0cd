//! Humanized elapsed-time formatter.
//!
//! Renders a millisecond count as a comma-separated list of units, largest
//! first. `units` restricts the emitted unit set, `precision` caps how many
//! units appear, and `round` trades the fractional tail of the smallest
//! emitted unit for whole-unit rounding. Only the language half of the
//! locale selects the vocabulary.

use serde_json::Value;

use super::numeric::format_count;
use super::{FormatContext, FormatError};
use crate::locale::language_of;

struct UnitSpec {
    singular: &'static str,
    plural: &'static str,
    millis: f64,
}

const UNIT_COUNT: usize = 8;

const UNITS: [UnitSpec; UNIT_COUNT] = [
    UnitSpec { singular: "year", plural: "years", millis: 31_557_600_000.0 },
    UnitSpec { singular: "month", plural: "months", millis: 2_629_800_000.0 },
    UnitSpec { singular: "week", plural: "weeks", millis: 604_800_000.0 },
    UnitSpec { singular: "day", plural: "days", millis: 86_400_000.0 },
    UnitSpec { singular: "hour", plural: "hours", millis: 3_600_000.0 },
    UnitSpec { singular: "minute", plural: "minutes", millis: 60_000.0 },
    UnitSpec { singular: "second", plural: "seconds", millis: 1_000.0 },
    UnitSpec { singular: "millisecond", plural: "milliseconds", millis: 1.0 },
];

/// Vocabulary for one language: `(singular, plural)` per unit, largest
/// first.
fn vocabulary(locale: &str) -> [(&'static str, &'static str); UNIT_COUNT] {
    match language_of(locale) {
        "fr" => [
            ("an", "ans"),
            ("mois", "mois"),
            ("semaine", "semaines"),
            ("jour", "jours"),
            ("heure", "heures"),
            ("minute", "minutes"),
            ("seconde", "secondes"),
            ("milliseconde", "millisecondes"),
        ],
        "es" => [
            ("año", "años"),
            ("mes", "meses"),
            ("semana", "semanas"),
            ("día", "días"),
            ("hora", "horas"),
            ("minuto", "minutos"),
            ("segundo", "segundos"),
            ("milisegundo", "milisegundos"),
        ],
        "de" => [
            ("Jahr", "Jahre"),
            ("Monat", "Monate"),
            ("Woche", "Wochen"),
            ("Tag", "Tage"),
            ("Stunde", "Stunden"),
            ("Minute", "Minuten"),
            ("Sekunde", "Sekunden"),
            ("Millisekunde", "Millisekunden"),
        ],
        _ => [
            ("year", "years"),
            ("month", "months"),
            ("week", "weeks"),
            ("day", "days"),
            ("hour", "hours"),
            ("minute", "minutes"),
            ("second", "seconds"),
            ("millisecond", "milliseconds"),
        ],
    }
}

struct Options {
    millis: f64,
    precision: Option<usize>,
    unit_filter: Option<Vec<usize>>,
    round: bool,
}

pub(super) fn format(value: &Value, ctx: &FormatContext<'_>) -> Result<String, FormatError> {
    let options = parse_payload(value)?;
    Ok(humanize(&options, ctx.locale))
}

fn parse_payload(value: &Value) -> Result<Options, FormatError> {
    match value {
        Value::Number(millis) => Ok(Options {
            millis: millis
                .as_f64()
                .ok_or_else(|| FormatError::InvalidDuration(millis.to_string()))?,
            precision: None,
            unit_filter: None,
            round: false,
        }),
        Value::Object(payload) => {
            let millis = payload
                .get("value")
                .and_then(Value::as_f64)
                .ok_or_else(|| FormatError::InvalidDuration(value.to_string()))?;
            let precision = payload
                .get("precision")
                .and_then(Value::as_u64)
                .map(|cap| cap as usize)
                .filter(|cap| *cap > 0);
            let unit_filter = payload.get("units").map(parse_unit_filter).unwrap_or(None);
            let round = payload
                .get("round")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            Ok(Options {
                millis,
                precision,
                unit_filter,
                round,
            })
        }
        other => Err(FormatError::InvalidDuration(other.to_string())),
    }
}

/// Map unit names (singular or plural, canonical English) onto indices
/// into [`UNITS`]. Unknown names are skipped; an empty result is treated
/// as unset.
fn parse_unit_filter(names: &Value) -> Option<Vec<usize>> {
    let names = names.as_array()?;
    let mut selected: Vec<usize> = names
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|name| {
            UNITS
                .iter()
                .position(|unit| name == unit.singular || name == unit.plural)
        })
        .collect();
    selected.sort_unstable();
    selected.dedup();
    if selected.is_empty() { None } else { Some(selected) }
}

fn humanize(options: &Options, locale: &str) -> String {
    let selected: Vec<usize> = options
        .unit_filter
        .clone()
        .unwrap_or_else(|| (0..UNIT_COUNT).collect());
    let total = options.millis.abs();

    // Whole counts for every unit except the last, which absorbs the
    // remainder.
    let mut remaining = total;
    let mut pieces: Vec<(usize, f64)> = Vec::with_capacity(selected.len());
    for (position, &unit) in selected.iter().enumerate() {
        let millis = UNITS[unit].millis;
        if position + 1 == selected.len() {
            pieces.push((unit, remaining / millis));
        } else {
            let count = (remaining / millis).floor();
            remaining -= count * millis;
            pieces.push((unit, count));
        }
    }

    let mut visible: Vec<(usize, f64)> = pieces
        .iter()
        .copied()
        .filter(|(_, count)| *count != 0.0)
        .collect();
    if visible.is_empty() {
        // Nothing reached a whole unit: report zero of the smallest.
        let smallest = *selected.last().unwrap_or(&(UNIT_COUNT - 1));
        visible.push((smallest, 0.0));
    }
    if let Some(cap) = options.precision
        && visible.len() > cap
    {
        visible.truncate(cap);
        // The retained tail re-absorbs everything the cap dropped.
        let last = visible.len() - 1;
        let consumed: f64 = visible[..last]
            .iter()
            .map(|(unit, count)| count * UNITS[*unit].millis)
            .sum();
        let tail_unit = visible[last].0;
        visible[last] = (tail_unit, (total - consumed) / UNITS[tail_unit].millis);
    }
    if options.round
        && let Some(tail) = visible.last_mut()
    {
        tail.1 = tail.1.round();
    }

    let names = vocabulary(locale);
    let rendered: Vec<String> = visible
        .iter()
        .map(|(unit, count)| {
            let (singular, plural) = names[*unit];
            let name = if (*count - 1.0).abs() < f64::EPSILON {
                singular
            } else {
                plural
            };
            format!("{} {name}", format_count(*count, locale))
        })
        .collect();
    rendered.join(", ")
}
