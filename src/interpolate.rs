//! Placeholder interpolation.
//!
//! Templates carry `{{name}}` and `{{name, format}}` markers plus
//! `$t(other-key)` references to sibling templates. Marker delimiters are
//! configurable; output is emitted verbatim with no HTML escaping.

use serde_json::{Map, Value};

use crate::format::{self, FormatContext, FormatError};

/// Marker delimiters recognized by the interpolator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationOptions {
    /// Opening marker, `{{` by default.
    pub prefix: String,
    /// Closing marker, `}}` by default.
    pub suffix: String,
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            prefix: "{{".to_owned(),
            suffix: "}}".to_owned(),
        }
    }
}

/// Source of sibling templates for `$t(...)` references.
pub(crate) trait TemplateSource {
    fn template_for(&self, key: &str) -> Option<String>;
}

const REFERENCE_OPEN: &str = "$t(";
const MAX_REFERENCE_DEPTH: usize = 5;

/// Render a template against a placeholder mapping.
///
/// Missing or null placeholders become the empty string. A known format
/// name dispatches to the formatter pipeline and propagates its errors;
/// an unknown one emits the placeholder's raw value.
pub(crate) fn render_template(
    template: &str,
    placeholders: &Map<String, Value>,
    options: &InterpolationOptions,
    ctx: &FormatContext<'_>,
    source: &dyn TemplateSource,
) -> Result<String, FormatError> {
    render_at_depth(template, placeholders, options, ctx, source, 0)
}

fn render_at_depth(
    template: &str,
    placeholders: &Map<String, Value>,
    options: &InterpolationOptions,
    ctx: &FormatContext<'_>,
    source: &dyn TemplateSource,
    depth: usize,
) -> Result<String, FormatError> {
    let substituted = substitute_markers(template, placeholders, options, ctx)?;
    resolve_references(&substituted, placeholders, options, ctx, source, depth)
}

fn substitute_markers(
    template: &str,
    placeholders: &Map<String, Value>,
    options: &InterpolationOptions,
    ctx: &FormatContext<'_>,
) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(&options.prefix) {
        out.push_str(&rest[..start]);
        let after_prefix = &rest[start + options.prefix.len()..];
        let Some(end) = after_prefix.find(&options.suffix) else {
            // Unterminated marker: emit the remainder literally.
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let marker = &after_prefix[..end];
        out.push_str(&expand_marker(marker, placeholders, ctx)?);
        rest = &after_prefix[end + options.suffix.len()..];
    }
    out.push_str(rest);
    Ok(out)
}

fn expand_marker(
    marker: &str,
    placeholders: &Map<String, Value>,
    ctx: &FormatContext<'_>,
) -> Result<String, FormatError> {
    let (name, format_name) = match marker.split_once(',') {
        Some((name, format_name)) => (name.trim(), Some(format_name.trim())),
        None => (marker.trim(), None),
    };
    let value = placeholders.get(name).unwrap_or(&Value::Null);
    if let Some(format_name) = format_name
        && !value.is_null()
        && let Some(rendered) = format::apply(format_name, value, ctx)
    {
        return rendered;
    }
    Ok(stringify(value))
}

fn resolve_references(
    text: &str,
    placeholders: &Map<String, Value>,
    options: &InterpolationOptions,
    ctx: &FormatContext<'_>,
    source: &dyn TemplateSource,
    depth: usize,
) -> Result<String, FormatError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(REFERENCE_OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + REFERENCE_OPEN.len()..];
        let Some(end) = after_open.find(')') else {
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let key = after_open[..end].trim();
        match source.template_for(key) {
            Some(template) if depth < MAX_REFERENCE_DEPTH => {
                out.push_str(&render_at_depth(
                    &template,
                    placeholders,
                    options,
                    ctx,
                    source,
                    depth + 1,
                )?);
            }
            // Unresolvable references surface the key itself.
            _ => out.push_str(key),
        }
        rest = &after_open[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Stringify a raw placeholder value. Whole numbers drop their float
/// suffix, null becomes empty, and structured values render as compact
/// JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.as_f64().map_or_else(
            || number.to_string(),
            |float| {
                if float.fract() == 0.0 && float.abs() < 9_007_199_254_740_992.0 {
                    format!("{}", float as i64)
                } else {
                    float.to_string()
                }
            },
        ),
        Value::Bool(flag) => flag.to_string(),
        structured => serde_json::to_string(structured).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct StubSource(HashMap<&'static str, &'static str>);

    impl TemplateSource for StubSource {
        fn template_for(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|template| (*template).to_owned())
        }
    }

    fn render(template: &str, placeholders: Value) -> String {
        let ctx = FormatContext {
            locale: "en",
            timezone: None,
        };
        let placeholders = placeholders.as_object().cloned().unwrap_or_default();
        render_template(
            template,
            &placeholders,
            &InterpolationOptions::default(),
            &ctx,
            &StubSource(HashMap::new()),
        )
        .expect("render")
    }

    #[test]
    fn substitutes_named_placeholders() {
        assert_eq!(
            render("Good bye {{john}}", json!({"john": "John"})),
            "Good bye John",
        );
        assert_eq!(render("{{ spaced }}!", json!({"spaced": "ok"})), "ok!");
    }

    #[test]
    fn missing_and_null_become_empty() {
        assert_eq!(render("[{{gone}}]", json!({})), "[]");
        assert_eq!(render("[{{gone}}]", json!({"gone": null})), "[]");
    }

    #[test]
    fn whole_numbers_drop_the_float_suffix() {
        assert_eq!(render("{{count}} dogs", json!({"count": 3.0})), "3 dogs");
        assert_eq!(render("{{ratio}}", json!({"ratio": 1.5})), "1.5");
    }

    #[test]
    fn unknown_format_emits_raw_value() {
        assert_eq!(render("{{n, sparkle}}", json!({"n": 7})), "7");
    }

    #[test]
    fn known_format_dispatches() {
        assert_eq!(
            render("{{when, time}}", json!({"when": "2016-02-03T16:05:06Z"})),
            "4:05 PM",
        );
    }

    #[test]
    fn formatter_failures_propagate() {
        let ctx = FormatContext {
            locale: "en",
            timezone: None,
        };
        let placeholders = json!({"a": {"value": 12.34, "currency": null}});
        let result = render_template(
            "{{a, currency}}",
            placeholders.as_object().expect("map"),
            &InterpolationOptions::default(),
            &ctx,
            &StubSource(HashMap::new()),
        );
        assert!(matches!(result, Err(FormatError::MissingCurrency)));
    }

    #[test]
    fn markup_passes_through_verbatim() {
        assert_eq!(
            render("<b>{{name}}</b> & co", json!({"name": "Ada"})),
            "<b>Ada</b> & co",
        );
    }

    #[test]
    fn unterminated_marker_is_literal() {
        assert_eq!(render("oops {{name", json!({"name": "x"})), "oops {{name");
    }

    #[test]
    fn references_resolve_against_the_source() {
        let source = StubSource(HashMap::from([("brand", "Kotoba {{name}}")]));
        let ctx = FormatContext {
            locale: "en",
            timezone: None,
        };
        let placeholders = json!({"name": "engine"});
        let out = render_template(
            "Welcome to $t(brand)!",
            placeholders.as_object().expect("map"),
            &InterpolationOptions::default(),
            &ctx,
            &source,
        )
        .expect("render");
        assert_eq!(out, "Welcome to Kotoba engine!");
    }

    #[test]
    fn unresolvable_reference_emits_the_key() {
        assert_eq!(render("see $t(missing.key)", json!({})), "see missing.key");
    }

    #[test]
    fn cyclic_references_stop_at_depth_cap() {
        let source = StubSource(HashMap::from([("loop", "again $t(loop)")]));
        let ctx = FormatContext {
            locale: "en",
            timezone: None,
        };
        let out = render_template(
            "$t(loop)",
            &Map::new(),
            &InterpolationOptions::default(),
            &ctx,
            &source,
        )
        .expect("render");
        assert_eq!(out, "again again again again again loop");
    }

    #[test]
    fn custom_markers_apply() {
        let options = InterpolationOptions {
            prefix: "%(".to_owned(),
            suffix: ")%".to_owned(),
        };
        let ctx = FormatContext {
            locale: "en",
            timezone: None,
        };
        let placeholders = json!({"who": "world"});
        let out = render_template(
            "hello %(who)%",
            placeholders.as_object().expect("map"),
            &options,
            &ctx,
            &StubSource(HashMap::new()),
        )
        .expect("render");
        assert_eq!(out, "hello world");
    }
}
