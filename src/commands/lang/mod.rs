// commands/lang/mod.rs

pub mod command;
pub mod manager;

pub use command::LanguageCommand;
pub use manager::LanguageManager;
