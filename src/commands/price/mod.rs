pub mod catalog;
pub mod command;
pub mod render;

pub use catalog::{markets_for, COMMODITIES, STATE_MARKETS};
pub use command::PriceCommand;
pub use render::{ai_summary, card_elements, PriceSeries, CARD_PREFIX};
