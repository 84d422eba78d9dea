pub mod command;
pub mod links;

pub use command::{ContactCommand, SearchCommand};
pub use links::{contact_link, search_url};
