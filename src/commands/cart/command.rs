use super::manager::CartItem;
use crate::backend::PriceValue;
use crate::commands::command::Command;
use crate::commands::parsing::parse_price;
use crate::core::prelude::*;
use crate::view::Page;

#[derive(Debug, Default)]
pub struct CartCommand;

impl CartCommand {
    pub fn new() -> Self {
        Self
    }

    fn show(page: &Page) -> String {
        let items = page.cart_items();
        if items.is_empty() {
            return page.tr("cart.empty", "Your cart is empty", &[]);
        }

        let mut lines: Vec<String> = items
            .iter()
            .map(|item| {
                let price = item
                    .price
                    .as_ref()
                    .map(|p| format!(" @ ₹{}", p))
                    .unwrap_or_default();
                format!(
                    "  {} x{} ({}){}",
                    item.product.as_deref().unwrap_or("?"),
                    item.quantity(),
                    item.seller.as_deref().unwrap_or("-"),
                    price
                )
            })
            .collect();
        let count = page.cart_count().to_string();
        lines.push(page.tr("cart.total", "{} item(s) in cart", &[&count]));
        lines.join("\n")
    }

    /// `add <product> [seller] [price]`
    fn add(page: &Page, args: &[&str]) -> String {
        let Some(product) = args.first().map(|p| p.trim()).filter(|p| !p.is_empty()) else {
            return page.tr("cart.unavailable", "Item not available", &[]);
        };

        let item = CartItem {
            product: Some(product.to_string()),
            seller: args.get(1).map(|s| s.to_string()),
            price: args.get(2).and_then(|p| parse_price(p)).map(PriceValue::Number),
            ..CartItem::default()
        };

        match page.add_to_cart(item) {
            Ok(line) => match line.product.as_deref() {
                Some(name) => page.tr("cart.added", "Added \"{}\" to cart", &[name]),
                None => page.tr("cart.added_generic", "Added to cart", &[]),
            },
            Err(e) => {
                log::error!("addToCart: {}", e);
                page.tr("cart.error", "Could not add to cart", &[])
            }
        }
    }
}

#[async_trait::async_trait]
impl Command for CartCommand {
    fn name(&self) -> &'static str {
        "cart"
    }

    fn description(&self) -> &'static str {
        "Show the cart or add an item (cart add <product> [seller] [price])"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "cart" | "basket")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        match args.first() {
            None | Some(&"list") => Ok(Self::show(page)),
            Some(&"add") => Ok(Self::add(page, &args[1..])),
            Some(&"count") => Ok(page.cart_count().to_string()),
            Some(other) => Err(AppError::Validation(format!(
                "Unknown cart action '{}'. Usage: cart [list|count|add <product> [seller] [price]]",
                other
            ))),
        }
    }

    fn priority(&self) -> u8 {
        60
    }
}
