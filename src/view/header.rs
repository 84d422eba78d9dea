// src/view/header.rs
//! Site header: brand, search, navigation, badges and toggles.
use super::document::{Element, ElementKind};

pub const BRAND_TEXT: &str = "brand-text";
pub const SEARCH_BOX: &str = "search-box";
pub const SEARCH_BUTTON: &str = "search-btn";
pub const VOICE_BUTTON: &str = "voice-btn";
pub const CART_COUNT: &str = "cart-count";
pub const FLOATING_CART_COUNT: &str = "floating-cart-count";
pub const THEME_TOGGLE: &str = "theme-toggle";
pub const LANG_CURRENT: &str = "lang-current";
pub const PROFILE_BLOCK: &str = "profile-block";

/// Icon on the theme toggle for the given mode.
pub fn theme_icon(dark: bool) -> &'static str {
    if dark {
        "🌙"
    } else {
        "☀️"
    }
}

pub fn header_elements() -> Vec<Element> {
    vec![
        Element::bound(BRAND_TEXT, ElementKind::Text, "Agri360", "nav.brand"),
        Element::input(SEARCH_BOX, "Search products, e.g. tomato", "search.placeholder"),
        Element::new(VOICE_BUTTON, ElementKind::Button, "🎤"),
        Element::bound(SEARCH_BUTTON, ElementKind::Button, "Search", "search.button"),
        Element::bound("nav-buy", ElementKind::Link, "Buy", "nav.buy"),
        Element::bound("nav-sell", ElementKind::Link, "Sell", "nav.sell"),
        Element::bound("nav-market", ElementKind::Link, "Market", "nav.market"),
        Element::bound("nav-detect", ElementKind::Link, "Detect", "nav.detect"),
        Element::bound("nav-weather", ElementKind::Link, "Weather", "nav.weather"),
        Element::bound("cart-link", ElementKind::Link, "Cart", "nav.cart"),
        Element::new(CART_COUNT, ElementKind::Text, "0"),
        Element::new(FLOATING_CART_COUNT, ElementKind::Text, "0"),
        Element::new(THEME_TOGGLE, ElementKind::Button, theme_icon(false)),
        Element::new(LANG_CURRENT, ElementKind::Text, "English"),
        Element::bound(PROFILE_BLOCK, ElementKind::Link, "Login", "profile.login"),
    ]
}
