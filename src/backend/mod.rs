pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{
    AdminData, AiRecommendation, AiSummary, Disease, PriceQuery, PriceRecord, PriceResponse,
    PriceValue, Prediction, UserInfo, UserProfile,
};
