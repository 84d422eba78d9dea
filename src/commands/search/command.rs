use super::links::{contact_link, search_url};
use crate::commands::command::Command;
use crate::core::prelude::*;
use crate::view::header::SEARCH_BOX;
use crate::view::Page;

#[derive(Debug, Default)]
pub struct SearchCommand;

#[async_trait::async_trait]
impl Command for SearchCommand {
    fn name(&self) -> &'static str {
        "search"
    }

    fn description(&self) -> &'static str {
        "Search the market in any language (search <text>)"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "search" | "find")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        let query = args.join(" ");
        if let Some(search_box) = page.document().get_mut(SEARCH_BOX) {
            search_box.text = query.clone();
        }

        let url = search_url(&page.translator(), &query);
        Ok(url.unwrap_or_else(|| page.tr("search.empty", "Enter something to search", &[])))
    }

    fn priority(&self) -> u8 {
        55
    }
}

#[derive(Debug, Default)]
pub struct ContactCommand;

#[async_trait::async_trait]
impl Command for ContactCommand {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn description(&self) -> &'static str {
        "Contact a seller (contact <seller> [product])"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "contact")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        let seller = args.first().copied();
        let product = args.get(1).copied();
        Ok(contact_link(seller, product).unwrap_or_else(|| {
            page.tr("contact.unavailable", "Seller contact not available", &[])
        }))
    }

    fn priority(&self) -> u8 {
        40
    }
}
