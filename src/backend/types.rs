// src/backend/types.rs
use crate::core::helpers::parse_leading_int;
use serde::{Deserialize, Serialize};

// ---------------- admin ----------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminData {
    #[serde(default)]
    pub commodities: Vec<String>,
    #[serde(default)]
    pub diseases: Vec<Disease>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub name: String,
    #[serde(default)]
    pub solution: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DiseaseRequest<'a> {
    pub name: &'a str,
    pub solution: &'a str,
}

// ---------------- price ----------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceQuery {
    pub commodity: String,
    pub state: String,
    pub market: String,
    pub ai: bool,
}

impl PriceQuery {
    pub fn new(commodity: &str, state: &str, market: &str) -> Self {
        Self {
            commodity: commodity.to_string(),
            state: state.to_string(),
            market: market.to_string(),
            ai: true,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("commodity", self.commodity.clone()),
            ("state", self.state.clone()),
            ("market", self.market.clone()),
        ];
        if self.ai {
            params.push(("ai", "1".to_string()));
        }
        params
    }
}

/// Prices arrive either as JSON numbers or as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    /// Integer part, parsed leniently from strings.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Number(_) => None,
            Self::Text(s) => parse_leading_int(s),
        }
    }
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(default)]
    pub commodity: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub market: String,
    pub modal_price: PriceValue,
    #[serde(default)]
    pub arrival_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub data: Vec<PriceRecord>,
    #[serde(default)]
    pub ai: Option<AiSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSummary {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub parsed: Option<AiRecommendation>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiRecommendation {
    #[serde(default)]
    pub recommended_modal_price: Option<PriceValue>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
}

// ---------------- predict ----------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub disease: String,
    /// 0..1
    pub confidence: f64,
    #[serde(default)]
    pub solution: String,
}

// ---------------- user ----------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub logged: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub email: Option<String>,
}

impl UserInfo {
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}
