// src/view/translate.rs
use super::document::Document;
use crate::i18n::Translator;

/// Substitutes translated text into every bound element of `document`.
///
/// Input-like elements receive the text as placeholder; everything else as
/// content. Elements whose key does not resolve are left as they are.
/// Returns how many elements were updated.
pub fn apply_all(document: &mut Document, translator: &Translator) -> usize {
    let mut updated = 0;
    for element in document.elements_mut() {
        let Some(binding) = &element.binding else {
            continue;
        };
        let key = binding.key();
        let Some(text) = translator.resolve(&key) else {
            log::trace!("No translation for {} ({})", element.id, key);
            continue;
        };

        if element.kind.takes_placeholder() {
            element.placeholder = Some(text.to_string());
        } else {
            element.text = text.to_string();
        }
        updated += 1;
    }
    document.set_lang(translator.language());
    updated
}
