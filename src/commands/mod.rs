// =====================================================
// FILE: commands/mod.rs - CONSOLE COMMANDS
// =====================================================

pub mod admin;
pub mod cart;
pub mod command;
pub mod exit;
pub mod handler;
pub mod help;
pub mod lang;
pub mod parsing;
pub mod predict;
pub mod price;
pub mod registry;
pub mod search;
pub mod theme;
pub mod user;
pub mod version;

pub use command::Command;
pub use handler::{CommandHandler, CommandResult};
pub use registry::CommandRegistry;
