//! CLDR plural category resolution.
//!
//! Catalog templates may carry a plural variant as a sibling key with a
//! category suffix (`plural-dog_few`, `plural-dog_3`, or the legacy
//! `plural-dog_plural`). This module resolves the CLDR cardinal category
//! for a `(locale, count)` pair and exposes the suffix search order used by
//! catalog lookup.
//!
//! Rules instances are cached per thread per language to avoid re-creating
//! `PluralRules` on every call.

use std::cell::RefCell;
use std::collections::HashMap;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::locale::language_of;

thread_local! {
    static RULES_CACHE: RefCell<HashMap<String, PluralRules>> = RefCell::new(HashMap::new());
}

fn build_rules(language: &str) -> PluralRules {
    let locale = Locale::try_from_str(language).unwrap_or_else(|_| Locale::UNKNOWN);
    PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into())
        .unwrap_or_else(|_| {
            PluralRules::try_new(Locale::UNKNOWN.into(), PluralRuleType::Cardinal.into())
                .expect("root locale plural rules are always available")
        })
}

fn category_name(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// CLDR category index used by numeric catalog suffixes (`_0` … `_5`).
fn category_index(category: PluralCategory) -> usize {
    match category {
        PluralCategory::Zero => 0,
        PluralCategory::One => 1,
        PluralCategory::Two => 2,
        PluralCategory::Few => 3,
        PluralCategory::Many => 4,
        PluralCategory::Other => 5,
    }
}

fn category_for(language: &str, count: i64) -> PluralCategory {
    RULES_CACHE.with_borrow_mut(|cache| {
        let rules = cache
            .entry(language.to_owned())
            .or_insert_with(|| build_rules(language));
        rules.category_for(count)
    })
}

/// Resolve the CLDR cardinal category name for `(locale, count)`.
///
/// Only the language half of the tag selects the rules, so `en-US` and
/// `en-GB` categorize identically. Fractional counts have no cardinal
/// operands here and resolve to `other`.
///
/// # Examples
///
/// ```rust
/// use kotoba::plural::category;
///
/// assert_eq!(category("en", 1.0), "one");
/// assert_eq!(category("en", 2.0), "other");
/// assert_eq!(category("ar", 3.0), "few");
/// ```
#[must_use]
pub fn category(locale: &str, count: f64) -> &'static str {
    if count.fract() != 0.0 {
        return "other";
    }
    category_name(category_for(language_of(locale), count as i64))
}

/// Catalog key suffixes to try for a pluralized lookup, most specific
/// first: the named category, the CLDR category index, and the legacy
/// `plural` suffix.
#[must_use]
pub fn suffixes(locale: &str, count: f64) -> [String; 3] {
    if count.fract() != 0.0 {
        return ["other".to_owned(), "5".to_owned(), "plural".to_owned()];
    }
    let resolved = category_for(language_of(locale), count as i64);
    [
        category_name(resolved).to_owned(),
        category_index(resolved).to_string(),
        "plural".to_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", 0.0, "other")]
    #[case("en", 1.0, "one")]
    #[case("en-GB", 1.0, "one")]
    #[case("ru", 2.0, "few")]
    #[case("ru", 5.0, "many")]
    #[case("ar", 0.0, "zero")]
    #[case("ar", 2.0, "two")]
    #[case("ar", 3.0, "few")]
    #[case("ar", 11.0, "many")]
    fn categories_follow_cldr(#[case] locale: &str, #[case] count: f64, #[case] expected: &str) {
        assert_eq!(category(locale, count), expected);
    }

    #[test]
    fn suffix_order_prefers_named_category() {
        assert_eq!(
            suffixes("ar", 3.0),
            ["few".to_owned(), "3".to_owned(), "plural".to_owned()],
        );
    }

    #[test]
    fn unknown_language_falls_back_to_root_rules() {
        assert_eq!(category("zz-ZZ", 1.0), "other");
    }
}
