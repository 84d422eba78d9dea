// =====================================================
// FILE: src/commands/search/links.rs - NAVIGATION TARGETS
// =====================================================

use crate::i18n::Translator;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Market search target for free-form (possibly localized) input.
///
/// The query is mapped back to its default-language label first, so
/// `"தக்காளி"` searches for `Tomato`. Blank input yields `None`.
pub fn search_url(translator: &Translator, query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    let canonical = translator.canonicalize(query);
    Some(format!("/market?q={}", encode(&canonical)))
}

/// Where "contact seller" leads: a `mailto:` link for email sellers,
/// the sell page otherwise. `None` when there is no seller.
pub fn contact_link(seller: Option<&str>, product: Option<&str>) -> Option<String> {
    let seller = seller.map(str::trim).filter(|s| !s.is_empty())?;
    let product = product.map(str::trim).filter(|p| !p.is_empty());

    if seller.contains('@') {
        let subject = match product {
            Some(p) => encode(&format!("Interested in {}", p)),
            None => "Interested".to_string(),
        };
        return Some(format!("mailto:{}?subject={}", seller, subject));
    }

    let mut url = format!("/sell.html?contact={}", encode(seller));
    if let Some(p) = product {
        url.push_str("&product=");
        url.push_str(&encode(p));
    }
    Some(url)
}
