// src/i18n/mod.rs
pub mod dictionary;
pub mod error;

pub use dictionary::{Dictionary, Entries};
pub use error::TranslationError;

use crate::core::constants::LANGUAGE_PICKER_ORDER;
use crate::core::helpers::slugify;
use std::sync::Arc;

pub const DEFAULT_LANGUAGE: &str = "en";

const PRODUCT_PREFIX: &str = "product.";

/// Fills `{0}`, `{1}` ... and then bare `{}` placeholders in order.
pub fn format_entry(text: &str, params: &[&str]) -> String {
    params
        .iter()
        .enumerate()
        .fold(text.to_string(), |mut text, (i, param)| {
            let indexed = format!("{{{}}}", i);
            if text.contains(&indexed) {
                text = text.replace(&indexed, param);
            } else if text.contains("{}") {
                text = text.replacen("{}", param, 1);
            }
            text
        })
}

/// Translation key for a product display name (`"Green Chilli"` -> `product.green_chilli`).
pub fn product_key(name: &str) -> String {
    format!("{}{}", PRODUCT_PREFIX, slugify(name.trim()))
}

/// Speech-recognition locale for a language code; unknown codes pass through.
pub fn speech_locale(code: &str) -> String {
    match code {
        "en" => "en-IN".into(),
        "hi" => "hi-IN".into(),
        "ta" => "ta-IN".into(),
        "kn" => "kn-IN".into(),
        "ml" => "ml-IN".into(),
        other => other.into(),
    }
}

/// Resolves dotted keys against a shared dictionary for one active language.
///
/// Lookups are total: a missing key never panics, it falls back to the
/// default language and then to `None`.
#[derive(Debug, Clone)]
pub struct Translator {
    dictionary: Arc<Dictionary>,
    default_language: String,
    language: String,
}

impl Translator {
    pub fn new(dictionary: Arc<Dictionary>, default_language: &str) -> Self {
        let default_language = default_language.to_lowercase();
        Self {
            dictionary,
            language: default_language.clone(),
            default_language,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn set_language(&mut self, code: &str) -> Result<(), TranslationError> {
        let code = code.trim().to_lowercase();
        if !self.dictionary.contains_language(&code) {
            return Err(TranslationError::InvalidLanguage(code));
        }
        if code != self.language {
            log::debug!("Translator language {} -> {}", self.language, code);
            self.language = code;
        }
        Ok(())
    }

    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.dictionary
            .get(&self.language, key)
            .or_else(|| self.dictionary.get(&self.default_language, key))
    }

    /// Resolves and fills placeholders.
    pub fn translate(&self, key: &str, params: &[&str]) -> Option<String> {
        self.resolve(key).map(|text| format_entry(text, params))
    }

    /// Like [`translate`](Self::translate) but degrades to `fallback` (also formatted).
    pub fn text_or(&self, key: &str, fallback: &str, params: &[&str]) -> String {
        self.translate(key, params)
            .unwrap_or_else(|| format_entry(fallback, params))
    }

    pub fn has_translation(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    /// Maps free-form localized text back to its default-language label.
    ///
    /// Two linear passes over the active language in dictionary order: exact
    /// (case-insensitive, trimmed) value match first, then substring match in
    /// either direction. First matching key wins. Unmatched input is returned
    /// unchanged.
    pub fn canonicalize(&self, query: &str) -> String {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return query.to_string();
        }

        let Some(active) = self.dictionary.entries(&self.language) else {
            return query.to_string();
        };

        let exact = |value: &str| value == needle;
        let partial = |value: &str| value.contains(&needle) || needle.contains(value);

        self.first_canonical(active, exact)
            .or_else(|| self.first_canonical(active, partial))
            .unwrap_or_else(|| query.to_string())
    }

    fn first_canonical(&self, active: &Entries, matches: impl Fn(&str) -> bool) -> Option<String> {
        for (key, value) in active {
            let value = value.trim().to_lowercase();
            if value.is_empty() || !matches(&value) {
                continue;
            }

            let canonical = self.dictionary.get(&self.default_language, key);
            if let Some(tail) = key.strip_prefix(PRODUCT_PREFIX) {
                return Some(
                    canonical
                        .map(str::to_string)
                        .unwrap_or_else(|| tail.split('.').collect::<Vec<_>>().join(" ")),
                );
            }
            if let Some(canonical) = canonical {
                return Some(canonical.to_string());
            }
        }
        None
    }

    /// Native display name of a language, or the code itself.
    pub fn language_label(&self, code: &str) -> String {
        self.dictionary
            .get(code, "language.name")
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string())
    }

    /// Codes for a language picker: regional languages first, then any
    /// other available code in the given order.
    pub fn picker_order(&self, available: &[String]) -> Vec<String> {
        let mut ordered: Vec<String> = LANGUAGE_PICKER_ORDER
            .iter()
            .filter(|code| available.iter().any(|a| a == *code))
            .map(|code| code.to_string())
            .collect();
        for code in available {
            if !ordered.contains(code) {
                ordered.push(code.clone());
            }
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator(lang: &str) -> Translator {
        let mut dict = Dictionary::new();
        dict.insert_json(
            "en",
            r#"{
                "nav.buy": "Buy",
                "nav.market": "Market",
                "product.tomato": "Tomato",
                "product.onion": "Onion",
                "cart.added": "Added \"{}\" to cart",
                "only.en": "English only"
            }"#,
        )
        .unwrap();
        dict.insert_json(
            "ta",
            r#"{
                "nav.buy": "வாங்க",
                "nav.market": "சந்தை",
                "product.tomato": "தக்காளி",
                "product.onion": "வெங்காயம்",
                "product.green_chilli": "பச்சை மிளகாய்",
                "ta.only": "சந்தை விலை"
            }"#,
        )
        .unwrap();
        let mut t = Translator::new(Arc::new(dict), "en");
        t.set_language(lang).unwrap();
        t
    }

    #[test]
    fn resolve_returns_stored_string() {
        let t = translator("ta");
        assert_eq!(t.resolve("nav.buy"), Some("வாங்க"));
        assert_eq!(t.resolve("product.tomato"), Some("தக்காளி"));
    }

    #[test]
    fn resolve_falls_back_to_default_then_none() {
        let t = translator("ta");
        assert_eq!(t.resolve("only.en"), Some("English only"));
        assert_eq!(t.resolve("does.not.exist"), None);
        assert_eq!(t.resolve(""), None);
    }

    #[test]
    fn set_language_rejects_unknown() {
        let mut t = translator("en");
        assert_eq!(
            t.set_language("fr"),
            Err(TranslationError::InvalidLanguage("fr".into()))
        );
        assert_eq!(t.language(), "en");
        t.set_language(" TA ").unwrap();
        assert_eq!(t.language(), "ta");
    }

    #[test]
    fn format_fills_placeholders() {
        let t = translator("en");
        assert_eq!(
            t.translate("cart.added", &["Tomato"]).as_deref(),
            Some("Added \"Tomato\" to cart")
        );
        assert_eq!(format_entry("{1} then {0}", &["a", "b"]), "b then a");
        assert_eq!(t.text_or("missing", "Fallback {}", &["x"]), "Fallback x");
    }

    #[test]
    fn canonicalize_exact_match() {
        let t = translator("ta");
        assert_eq!(t.canonicalize("தக்காளி"), "Tomato");
        assert_eq!(t.canonicalize("  சந்தை "), "Market");
    }

    #[test]
    fn canonicalize_product_without_english_uses_key_tail() {
        let t = translator("ta");
        assert_eq!(t.canonicalize("பச்சை மிளகாய்"), "green_chilli");
    }

    #[test]
    fn canonicalize_substring_first_match_wins() {
        let t = translator("ta");
        // "சந்தை" is contained in "சந்தை விலை" and matches nav.market first
        assert_eq!(t.canonicalize("சந்தை விலை இன்று"), "Market");
        // query contained in a value
        assert_eq!(t.canonicalize("வெங்கா"), "Onion");
    }

    #[test]
    fn canonicalize_skips_non_product_without_english() {
        let t = translator("ta");
        // "ta.only" has no English entry, so the scan moves on; nothing else matches
        assert_eq!(t.canonicalize("விலை"), "விலை");
    }

    #[test]
    fn canonicalize_unknown_returns_input() {
        let t = translator("ta");
        assert_eq!(t.canonicalize("mango"), "mango");
        assert_eq!(t.canonicalize(""), "");
    }

    #[test]
    fn canonicalize_is_idempotent_on_canonical_input() {
        for lang in ["en", "ta"] {
            let t = translator(lang);
            for input in ["Tomato", "tomato", "Onion", "Market", "Buy", "mango", "tom"] {
                let once = t.canonicalize(input);
                assert_eq!(t.canonicalize(&once), once, "lang {} input {}", lang, input);
            }
        }
    }

    #[test]
    fn labels_and_picker_order() {
        let t = Translator::new(Arc::new(Dictionary::embedded().unwrap()), "en");
        assert_eq!(t.language_label("ta"), "தமிழ்");
        assert_eq!(t.language_label("xx"), "xx");

        let available: Vec<String> = ["en", "hi", "ta", "kn", "ml", "mr"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            t.picker_order(&available),
            vec!["ta", "hi", "ml", "kn", "en", "mr"]
        );
    }

    #[test]
    fn product_keys_and_speech_locales() {
        assert_eq!(product_key(" Green Chilli "), "product.green_chilli");
        assert_eq!(speech_locale("ta"), "ta-IN");
        assert_eq!(speech_locale("mr"), "mr");
    }
}
