//! Integration tests for the formatter pipeline through the public
//! translation path.

use anyhow::{Result, ensure};
use kotoba::{Engine, EngineConfig, Loader, LoaderConfig, Translator};
use rstest::rstest;
use serde_json::{Value, json};

fn translator() -> Result<Translator> {
    let engine = Engine::init(EngineConfig::default());
    let loader = Loader::init(LoaderConfig::default())?;
    Ok(Translator::new(engine, loader))
}

fn render(template: &str, placeholders: Value, locale: &str, timezone: Option<&str>) -> Result<String> {
    let node = json!({"@translate": {
        "key": "x",
        "fallback": template,
        "placeholders": placeholders,
    }});
    let out = translator()?.translate(&node, Some(locale), timezone)?;
    out.as_str()
        .map(str::to_owned)
        .ok_or_else(|| anyhow::anyhow!("expected a string, got {out:?}"))
}

#[rstest]
fn duration_spreads_across_requested_units() -> Result<()> {
    let out = render(
        "Dans {{d, duration}}",
        json!({"d": {"value": 7_205_000, "units": ["minutes", "seconds"]}}),
        "fr-FR",
        None,
    )?;
    ensure!(
        out == "Dans 120 minutes, 5 secondes",
        "expected the French unit spread, got {out:?}",
    );
    Ok(())
}

#[rstest]
#[case("en-US")]
#[case("en-GB")]
fn duration_ignores_the_region_suffix(#[case] locale: &str) -> Result<()> {
    let out = render(
        "{{d, duration}}",
        json!({"d": {"value": 7_205_000, "units": ["minutes", "seconds"]}}),
        locale,
        None,
    )?;
    ensure!(
        out == "120 minutes, 5 seconds",
        "expected English humanizing for {locale}, got {out:?}",
    );
    Ok(())
}

#[rstest]
fn unrounded_duration_uses_the_locale_decimal_separator() -> Result<()> {
    let english = render(
        "{{d, duration}}",
        json!({"d": {"value": 85_179_000, "units": ["days"], "round": false}}),
        "en",
        None,
    )?;
    ensure!(english.starts_with("0.9858"), "expected a dot separator, got {english:?}");

    let french = render(
        "{{d, duration}}",
        json!({"d": {"value": 85_179_000, "units": ["days"], "round": false}}),
        "fr",
        None,
    )?;
    ensure!(french.starts_with("0,9858"), "expected a comma separator, got {french:?}");
    Ok(())
}

#[rstest]
fn currency_without_code_produces_an_error_marker() -> Result<()> {
    let node = json!({"@translate": {
        "key": "p",
        "fallback": "{{a, currency}}",
        "placeholders": {"a": {"value": 12.34, "currency": null}},
    }});
    let out = translator()?.translate(&node, Some("en"), None)?;
    let marker = out
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("expected a marker object, got {out:?}"))?;
    ensure!(
        marker.get("@translate") == node.get("@translate"),
        "the original payload must be preserved",
    );
    let message = marker
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    ensure!(
        message.contains("Currency code is required"),
        "expected the currency message, got {message:?}",
    );
    Ok(())
}

#[rstest]
#[case("en", "USD", "$1,234.50")]
#[case("fr", "EUR", "1 234,50 €")]
#[case("de", "EUR", "1.234,50 €")]
fn currency_follows_locale_conventions(
    #[case] locale: &str,
    #[case] code: &str,
    #[case] expected: &str,
) -> Result<()> {
    let out = render(
        "{{a, currency}}",
        json!({"a": {"value": 1234.5, "currency": code}}),
        locale,
        None,
    )?;
    ensure!(out == expected, "expected {expected:?}, got {out:?}");
    Ok(())
}

#[rstest]
fn long_dates_localize() -> Result<()> {
    let english = render("{{t, date}}", json!({"t": "2016-02-03T16:05:06Z"}), "en", None)?;
    ensure!(english == "3 February 2016", "got {english:?}");

    let french = render("{{t, date}}", json!({"t": "2016-10-30T12:00:00Z"}), "fr", None)?;
    ensure!(french == "30 octobre 2016", "got {french:?}");
    Ok(())
}

#[rstest]
// 00:05 UTC is still summer time in Paris; 02:05 UTC is past the
// transition.
#[case("2016-10-30T00:05:06Z", "02:05")]
#[case("2016-10-30T02:05:06Z", "03:05")]
fn datetime_respects_the_paris_dst_transition(
    #[case] instant: &str,
    #[case] expected_time: &str,
) -> Result<()> {
    let out = render(
        "{{t, datetime}}",
        json!({"t": instant}),
        "fr",
        Some("Europe/Paris"),
    )?;
    let expected = format!("dimanche 30 octobre 2016 {expected_time}");
    ensure!(out == expected, "expected {expected:?}, got {out:?}");
    Ok(())
}

#[rstest]
fn placeholder_timezone_overrides_the_request_zone() -> Result<()> {
    let out = render(
        "{{t, time}}",
        json!({"t": {"value": "2016-02-03T16:05:06Z", "timezone": "America/New_York"}}),
        "en",
        Some("Europe/Paris"),
    )?;
    ensure!(out == "11:05 AM", "expected the payload zone, got {out:?}");
    Ok(())
}

#[rstest]
fn unknown_format_emits_the_raw_value() -> Result<()> {
    let out = render("{{n, sparkle}}", json!({"n": 7}), "en", None)?;
    ensure!(out == "7", "expected the raw value, got {out:?}");
    Ok(())
}
