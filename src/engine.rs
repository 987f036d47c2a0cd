//! Single-template resolution.
//!
//! The engine owns the locale pair, the optional timezone, the logger
//! capability, and a shared catalog. Each `Translate` call works on a
//! per-request clone so concurrent requests never observe each other's
//! locale or timezone.

use std::collections::HashMap;
use std::sync::Arc;

use chrono_tz::Tz;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::format::{FormatContext, FormatError};
use crate::interpolate::{self, InterpolationOptions, TemplateSource};
use crate::locale::{consulted_locales, normalize_locale_tag};
use crate::logging::{self, Logger};
use crate::node::TranslateRequest;

/// Locale consulted after the request locale misses.
pub const DEFAULT_LOCALE: &str = "en";

/// Faults raised at the engine API boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A timezone name was not a known IANA zone.
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
}

/// Construction-time engine settings.
#[derive(Debug, Default)]
pub struct EngineConfig {
    /// Initial request locale; defaults to [`DEFAULT_LOCALE`].
    pub locale: Option<String>,
    /// Seed catalogs keyed by locale tag.
    pub translations: Option<HashMap<String, Value>>,
    /// Marker delimiters for the interpolator.
    pub interpolation: Option<InterpolationOptions>,
}

/// Template resolver bound to a locale, timezone, and catalog.
pub struct Engine {
    locale: String,
    default_locale: String,
    timezone: Option<Tz>,
    interpolation: InterpolationOptions,
    logger: Arc<dyn Logger>,
    catalog: Arc<Catalog>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::init(EngineConfig::default())
    }
}

impl Engine {
    /// Build an engine from configuration.
    #[must_use]
    pub fn init(config: EngineConfig) -> Self {
        let mut engine = Self {
            locale: DEFAULT_LOCALE.to_owned(),
            default_locale: DEFAULT_LOCALE.to_owned(),
            timezone: None,
            interpolation: config.interpolation.unwrap_or_default(),
            logger: logging::default_logger(),
            catalog: Arc::new(Catalog::new()),
        };
        if let Some(locale) = config.locale {
            engine.set_locale(&locale);
        }
        if let Some(translations) = config.translations {
            for (locale, templates) in &translations {
                engine.catalog.add(locale, templates);
            }
        }
        engine
    }

    /// Deep-merge templates for one locale into the shared catalog.
    pub fn add_translations(&self, locale: &str, templates: &Value) -> &Self {
        self.catalog.add(locale, templates);
        self
    }

    /// Replace the logger capability.
    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = logger;
    }

    /// Rebind the request locale.
    ///
    /// Raw tags normalize when possible (`en_US.UTF-8` becomes `en-US`);
    /// unparseable tags are kept verbatim and simply miss the catalog.
    pub fn set_locale(&mut self, locale: &str) {
        self.locale = normalize_locale_tag(locale).unwrap_or_else(|| locale.to_owned());
    }

    /// Rebind the engine timezone; `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTimezone`] when the name is not a
    /// known IANA zone.
    pub fn set_timezone(&mut self, zone: Option<&str>) -> Result<(), EngineError> {
        self.timezone = match zone {
            Some(name) => Some(
                name.parse::<Tz>()
                    .map_err(|_| EngineError::UnknownTimezone(name.to_owned()))?,
            ),
            None => None,
        };
        Ok(())
    }

    /// Current request locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The ordered locale chain consulted by lookups.
    #[must_use]
    pub fn locales(&self) -> Vec<String> {
        consulted_locales(&self.locale, &self.default_locale)
    }

    /// Clone this engine for one request.
    ///
    /// The clone shares the catalog, copies the logger handle, and
    /// rebinds locale and timezone without touching the parent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTimezone`] for an unknown zone name.
    pub fn clone_for_request(
        &self,
        locale: Option<&str>,
        timezone: Option<&str>,
    ) -> Result<Self, EngineError> {
        let mut clone = Self {
            locale: self.locale.clone(),
            default_locale: self.default_locale.clone(),
            timezone: self.timezone,
            interpolation: self.interpolation.clone(),
            logger: Arc::clone(&self.logger),
            catalog: Arc::clone(&self.catalog),
        };
        if let Some(locale) = locale {
            clone.set_locale(locale);
        }
        if let Some(zone) = timezone {
            clone.set_timezone(Some(zone))?;
        }
        Ok(clone)
    }

    /// Resolve a translation node payload at this engine's position.
    ///
    /// Successful resolutions become strings. A formatter failure logs on
    /// the configured logger and yields the original node augmented with
    /// an `error` member, so one bad placeholder never aborts the walk.
    #[must_use]
    pub fn resolve_node(&self, request: &TranslateRequest, original: &Value) -> Value {
        match self.resolve_request(request) {
            Ok(text) => Value::String(text),
            Err(err) => {
                self.logger
                    .error(&format!("translating '{}' failed: {err}", request.key));
                failure_marker(original, &err)
            }
        }
    }

    /// Resolve a template to text.
    ///
    /// Lookup walks the consulted locale chain with plural selection;
    /// a miss falls back to the inline `fallback` template, and finally
    /// to the key itself, verbatim.
    ///
    /// # Errors
    ///
    /// Propagates formatter failures from interpolation.
    pub fn resolve_request(&self, request: &TranslateRequest) -> Result<String, FormatError> {
        let mut placeholders = request.placeholders.clone();
        if let Some(quantity) = request.quantity {
            placeholders.insert("count".to_owned(), Value::from(quantity));
        }

        let template = self
            .locales()
            .iter()
            .find_map(|locale| {
                self.catalog
                    .lookup_with_plural(locale, &request.key, request.quantity)
            })
            .or_else(|| request.fallback.clone());
        let Some(template) = template else {
            return Ok(request.key.clone());
        };

        let ctx = FormatContext {
            locale: &self.locale,
            timezone: self.timezone,
        };
        interpolate::render_template(&template, &placeholders, &self.interpolation, &ctx, self)
    }
}

impl TemplateSource for Engine {
    fn template_for(&self, key: &str) -> Option<String> {
        self.locales()
            .iter()
            .find_map(|locale| self.catalog.lookup(locale, key))
    }
}

fn failure_marker(original: &Value, err: &FormatError) -> Value {
    let mut marker = original.as_object().cloned().unwrap_or_default();
    let mut detail = Map::new();
    detail.insert("message".to_owned(), Value::String(err.to_string()));
    marker.insert("error".to_owned(), Value::Object(detail));
    Value::Object(marker)
}
