//! Fixed choices offered by the market-price form.

pub const COMMODITIES: &[&str] = &[
    "Tomato",
    "Onion",
    "Potato",
    "Banana",
    "Paddy",
    "Maize",
    "Cotton",
    "Groundnut",
    "Sugarcane",
    "Turmeric",
    "Chilli",
    "Coriander",
];

pub const STATE_MARKETS: &[(&str, &[&str])] = &[
    (
        "Tamil Nadu",
        &["Coimbatore", "Erode", "Salem", "Madurai", "Tirunelveli"],
    ),
    ("Karnataka", &["Bangalore", "Mysore", "Hubli"]),
    ("Andhra Pradesh", &["Guntur", "Vijayawada"]),
    ("Kerala", &["Palakkad", "Thrissur"]),
];

/// Markets of a state, matched case-insensitively.
pub fn markets_for(state: &str) -> Option<&'static [&'static str]> {
    let state = state.trim();
    STATE_MARKETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(state))
        .map(|(_, markets)| *markets)
}

pub fn states() -> impl Iterator<Item = &'static str> {
    STATE_MARKETS.iter().map(|(name, _)| *name)
}
