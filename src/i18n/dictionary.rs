// src/i18n/dictionary.rs
use super::error::TranslationError;
use indexmap::IndexMap;
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "src/i18n/langs/"]
struct Langs;

/// Dotted key -> display string, in source order.
pub type Entries = IndexMap<String, String>;

/// Read-only translation table: language code -> entries.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    languages: IndexMap<String, Entries>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `<code>.json` file bundled into the binary.
    pub fn embedded() -> Result<Self, TranslationError> {
        let mut files: Vec<String> = Langs::iter().map(|f| f.into_owned()).collect();
        files.sort();

        let mut dictionary = Self::new();
        for filename in files {
            let Some(code) = filename.strip_suffix(".json") else {
                continue;
            };
            let content = Langs::get(&filename).ok_or_else(|| {
                TranslationError::LoadError(format!("File not found: {}", filename))
            })?;
            let text = std::str::from_utf8(content.data.as_ref())
                .map_err(|e| TranslationError::LoadError(format!("{}: {}", filename, e)))?;
            dictionary.insert_json(code, text)?;
        }

        log::debug!(
            "Loaded {} embedded languages: {}",
            dictionary.languages.len(),
            dictionary.codes().collect::<Vec<_>>().join(", ")
        );
        Ok(dictionary)
    }

    /// Parses a flat JSON object and stores it under `code`, replacing any
    /// previous entries for that language.
    pub fn insert_json(&mut self, code: &str, json: &str) -> Result<(), TranslationError> {
        let entries: Entries = serde_json::from_str(json)
            .map_err(|e| TranslationError::LoadError(format!("{}.json: {}", code, e)))?;
        self.insert(code, entries);
        Ok(())
    }

    pub fn insert(&mut self, code: &str, entries: Entries) {
        self.languages.insert(code.to_lowercase(), entries);
    }

    pub fn entries(&self, code: &str) -> Option<&Entries> {
        self.languages.get(&code.to_lowercase())
    }

    pub fn get(&self, code: &str, key: &str) -> Option<&str> {
        self.entries(code)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn contains_language(&self, code: &str) -> bool {
        self.languages.contains_key(&code.to_lowercase())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
