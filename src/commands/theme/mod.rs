pub mod command;
pub mod manager;

pub use command::ThemeCommand;
pub use manager::{Theme, ThemeManager};
