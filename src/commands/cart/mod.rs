pub mod command;
pub mod manager;

pub use command::CartCommand;
pub use manager::{CartItem, CartManager};
