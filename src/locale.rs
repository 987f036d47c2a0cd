//! Locale tag helpers shared by the catalog, engine, and formatters.
//!
//! These helpers centralize tag normalization and the consulted-locale
//! chain so catalog lookup and formatter dispatch resolve locales the same
//! way.

use icu_locale_core::Locale;

/// Coerce a raw environment-style tag into canonical BCP 47 form.
///
/// Tags arrive in shapes like `en_US.UTF-8` or `pt_BR@latin`: everything
/// from the first `.` or `@` onward is an encoding or variant marker and
/// is dropped, and `_` separators become `-`. The remainder must parse as
/// a language identifier, so strings like `C` or free text yield `None`.
///
/// # Examples
///
/// ```rust
/// use kotoba::locale::normalize_locale_tag;
///
/// assert_eq!(normalize_locale_tag("pt_BR@latin"), Some("pt-BR".to_string()));
/// assert_eq!(normalize_locale_tag("fr-FR"), Some("fr-FR".to_string()));
/// assert_eq!(normalize_locale_tag("  "), None);
/// ```
#[must_use]
pub fn normalize_locale_tag(raw: &str) -> Option<String> {
    let tag: String = raw
        .trim()
        .chars()
        .take_while(|c| !matches!(c, '.' | '@'))
        .map(|c| if c == '_' { '-' } else { c })
        .collect();
    Locale::try_from_str(&tag)
        .ok()
        .map(|parsed| parsed.to_string())
}

/// Return the `<lang>` half of a `<lang>[-<region>]` tag.
///
/// # Examples
///
/// ```rust
/// use kotoba::locale::language_of;
///
/// assert_eq!(language_of("en-GB"), "en");
/// assert_eq!(language_of("fr"), "fr");
/// ```
#[must_use]
pub fn language_of(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Build the ordered, deduplicated list of locales consulted for a lookup.
///
/// The chain is request locale, its base language, the default locale, and
/// the default's base language. Inheritance only walks up to the base
/// language; a catalog striped under one region is never consulted for a
/// sibling region.
///
/// # Examples
///
/// ```rust
/// use kotoba::locale::consulted_locales;
///
/// assert_eq!(
///     consulted_locales("en-GB", "en"),
///     vec!["en-GB".to_string(), "en".to_string()],
/// );
/// assert_eq!(
///     consulted_locales("fr-FR", "en"),
///     vec!["fr-FR".to_string(), "fr".to_string(), "en".to_string()],
/// );
/// ```
#[must_use]
pub fn consulted_locales(request: &str, default_locale: &str) -> Vec<String> {
    let mut chain = Vec::with_capacity(4);
    for tag in [
        request,
        language_of(request),
        default_locale,
        language_of(default_locale),
    ] {
        if !tag.is_empty() && !chain.iter().any(|seen| seen == tag) {
            chain.push(tag.to_owned());
        }
    }
    chain
}
