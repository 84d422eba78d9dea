use super::catalog::{markets_for, states, COMMODITIES};
use super::render::{ai_summary, card_elements, cards_text, PriceSeries, CARD_PREFIX};
use crate::backend::{PriceQuery, PriceResponse};
use crate::commands::command::Command;
use crate::core::prelude::*;
use crate::view::Page;

#[derive(Debug, Default)]
pub struct PriceCommand;

impl PriceCommand {
    pub fn new() -> Self {
        Self
    }

    fn catalog(page: &Page) -> String {
        let translator = page.translator();
        let commodities = COMMODITIES
            .iter()
            .map(|name| translator.text_or(&crate::i18n::product_key(name), name, &[]))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}: {}\n{}: {}",
            translator.text_or("label.commodity", "Commodity", &[]),
            commodities,
            translator.text_or("label.state", "State", &[]),
            states().collect::<Vec<_>>().join(", ")
        )
    }

    /// Renders a price response into the page and returns its text form.
    pub fn render(page: &Page, response: &PriceResponse) -> String {
        if response.data.is_empty() {
            return page.tr("price.no_data", "No data found", &[]);
        }

        page.document().remove_prefixed(CARD_PREFIX);
        page.render(
            response
                .data
                .iter()
                .enumerate()
                .flat_map(|(i, record)| card_elements(i, record)),
        );

        let mut sections = Vec::new();
        if let Some(summary) = ai_summary(response.ai.as_ref(), &page.translator()) {
            sections.push(summary);
        }
        sections.push(cards_text(&page.document(), response.data.len()));

        let series = PriceSeries::from_records(&response.data);
        if !series.is_empty() {
            sections.push(series.render(&page.tr("price.chart", "Modal Price (₹)", &[])));
        }
        sections.join("\n\n")
    }
}

#[async_trait::async_trait]
impl Command for PriceCommand {
    fn name(&self) -> &'static str {
        "price"
    }

    fn description(&self) -> &'static str {
        "Daily market price (price <commodity> <state> <market> | price markets <state>)"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "price" | "market")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        match args {
            [] => Ok(Self::catalog(page)),
            ["markets", state] => Ok(match markets_for(state) {
                Some(markets) => markets.join(", "),
                None => page.tr("price.no_data", "No data found", &[]),
            }),
            [commodity, state, market] => {
                // Localized commodity names are sent in English.
                let commodity = page.canonicalize(commodity);
                let query = PriceQuery::new(&commodity, state, market);
                match page.backend().price(&query).await {
                    Ok(response) => Ok(Self::render(page, &response)),
                    Err(e) => {
                        log::error!("Price lookup failed: {}", e);
                        Ok(page.tr("price.no_data", "No data found", &[]))
                    }
                }
            }
            _ => Err(AppError::Validation(
                "Usage: price <commodity> <state> <market> | price markets <state>".to_string(),
            )),
        }
    }

    fn priority(&self) -> u8 {
        55
    }
}
