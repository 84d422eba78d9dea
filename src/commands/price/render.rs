// =====================================================
// FILE: src/commands/price/render.rs - PRICE VIEW OUTPUT
// =====================================================

use crate::backend::{AiSummary, PriceRecord};
use crate::i18n::Translator;
use crate::view::document::{Binding, Document, Element, ElementKind};

pub const CARD_PREFIX: &str = "price-card-";

const CARD_FIELDS: &[(&str, &str)] = &[
    ("commodity", "Commodity"),
    ("state", "State"),
    ("market", "Market"),
    ("modal_price", "Modal Price"),
    ("date", "Date"),
];

const BAR_WIDTH: usize = 30;

fn label_id(index: usize, field: &str) -> String {
    format!("{}{}-{}-label", CARD_PREFIX, index, field)
}

fn value_id(index: usize, field: &str) -> String {
    format!("{}{}-{}", CARD_PREFIX, index, field)
}

/// Elements for one market card. Labels bind to `label.<field>`; the
/// commodity value binds to its product translation.
pub fn card_elements(index: usize, record: &PriceRecord) -> Vec<Element> {
    let mut elements = Vec::with_capacity(CARD_FIELDS.len() * 2);
    for (field, fallback) in CARD_FIELDS {
        elements.push(
            Element::new(&label_id(index, field), ElementKind::Label, fallback)
                .with_binding(Binding::Label(field.to_string())),
        );

        let value = match *field {
            "commodity" => record.commodity.clone(),
            "state" => record.state.clone(),
            "market" => record.market.clone(),
            "modal_price" => format!("₹{}", record.modal_price),
            _ => record.arrival_date.clone(),
        };
        let mut element = Element::new(&value_id(index, field), ElementKind::Text, &value);
        if *field == "commodity" && !record.commodity.trim().is_empty() {
            element = element.with_binding(Binding::ProductName(record.commodity.clone()));
        }
        elements.push(element);
    }
    elements
}

/// Plain-text rendering of the first `count` cards in `document`.
pub fn cards_text(document: &Document, count: usize) -> String {
    (0..count)
        .map(|index| {
            CARD_FIELDS
                .iter()
                .map(|(field, _)| {
                    format!(
                        "{}: {}",
                        document.text(&label_id(index, field)).unwrap_or(*field),
                        document.text(&value_id(index, field)).unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// AI block shown above the cards, if the response carries one worth showing.
pub fn ai_summary(ai: Option<&AiSummary>, translator: &Translator) -> Option<String> {
    let ai = ai?;
    match ai.enabled {
        Some(true) => {
            let parsed = ai.parsed.as_ref()?;
            let price = parsed.recommended_modal_price.as_ref()?;
            let currency = parsed.currency.as_deref().unwrap_or("INR");
            let unit = parsed.unit.as_deref().unwrap_or("100kg");
            let symbol = if currency == "INR" { "₹" } else { "" };

            let mut text = format!(
                "{}: {}{} / {}",
                translator.text_or("price.ai_recommended", "AI Recommended Price", &[]),
                symbol,
                price,
                unit
            );
            if let Some(rationale) = parsed.rationale.as_deref().filter(|r| !r.is_empty()) {
                text.push_str(&format!(
                    "\n{}: {}",
                    translator.text_or("price.ai_why", "Why", &[]),
                    rationale
                ));
            }
            Some(text)
        }
        Some(false) => {
            let reason = ai
                .reason
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| {
                    translator.text_or("price.ai_unavailable", "AI summary unavailable", &[])
                });
            Some(format!(
                "{}: {}",
                translator.text_or("price.ai_summary", "AI Summary", &[]),
                reason
            ))
        }
        None => None,
    }
}

/// Chart data in chronological order (the backend lists newest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub labels: Vec<String>,
    pub values: Vec<Option<i64>>,
}

impl PriceSeries {
    pub fn from_records(records: &[PriceRecord]) -> Self {
        Self {
            labels: records.iter().rev().map(|r| r.arrival_date.clone()).collect(),
            values: records
                .iter()
                .rev()
                .map(|r| r.modal_price.as_integer())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Horizontal bar chart; unparsable prices show as gaps.
    pub fn render(&self, title: &str) -> String {
        let max = self.values.iter().flatten().copied().max().unwrap_or(0).max(1);
        let width = self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut out = title.to_string();
        for (label, value) in self.labels.iter().zip(&self.values) {
            let row = match value {
                Some(v) => {
                    let len = ((*v).max(0) as usize * BAR_WIDTH) / max as usize;
                    format!("{} {}", "█".repeat(len), v)
                }
                None => "-".to_string(),
            };
            out.push_str(&format!("\n{:>width$} | {}", label, row, width = width));
        }
        out
    }
}
