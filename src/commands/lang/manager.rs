// commands/lang/manager.rs - LANGUAGE STATE

use crate::core::config::LanguageConfig;
use crate::core::prelude::*;
use crate::store::{StoreHandle, LANG_KEY};
use crate::view::document::Document;
use crate::view::header::LANG_CURRENT;
use crate::view::translate::apply_all;

/// Keeps the persisted language code, the translator and the document in step.
#[derive(Debug, Clone)]
pub struct LanguageManager {
    store: StoreHandle,
    config: LanguageConfig,
}

impl LanguageManager {
    pub fn new(store: StoreHandle, config: LanguageConfig) -> Self {
        Self { store, config }
    }

    pub fn available(&self) -> &[String] {
        &self.config.available
    }

    pub fn default_language(&self) -> &str {
        &self.config.default
    }

    /// Persisted code if it is one of the configured languages, else the default.
    pub fn current(&self) -> String {
        match self.store.get(LANG_KEY).map(|v| v.map(|c| c.trim().to_lowercase())) {
            Ok(Some(code)) if self.config.is_available(&code) => code,
            Ok(Some(code)) => {
                log::debug!("Ignoring stored language '{}'", code);
                self.config.default.clone()
            }
            Ok(None) => self.config.default.clone(),
            Err(e) => {
                log::warn!("Could not read language: {}", e);
                self.config.default.clone()
            }
        }
    }

    /// Persists `code`, sets the document language and re-applies translations.
    pub fn set_language(
        &self,
        translator: &mut Translator,
        document: &mut Document,
        code: &str,
    ) -> Result<usize> {
        let code = code.trim().to_lowercase();
        if !self.config.is_available(&code) || !translator.dictionary().contains_language(&code) {
            return Err(TranslationError::InvalidLanguage(code).into());
        }

        self.store.set(LANG_KEY, &code)?;
        log::info!("Language set to {}", code.to_uppercase());
        Ok(self.apply(translator, document))
    }

    /// Brings the translator and document up to the persisted language.
    pub fn apply(&self, translator: &mut Translator, document: &mut Document) -> usize {
        let code = self.current();
        if let Err(e) = translator.set_language(&code) {
            log::warn!("{}; keeping {}", e, translator.language());
        }

        let updated = apply_all(document, translator);
        let label = translator.language_label(translator.language());
        document.set_text(LANG_CURRENT, &label);
        updated
    }
}
