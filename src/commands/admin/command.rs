use crate::backend::AdminData;
use crate::commands::command::Command;
use crate::commands::parsing::split_pair;
use crate::core::prelude::*;
use crate::view::Page;

#[derive(Debug, Default)]
pub struct AdminCommand;

impl AdminCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn render(page: &Page, data: &AdminData) -> String {
        let mut out = format!("{}:", page.tr("admin.commodities", "Commodities", &[]));
        for name in &data.commodities {
            out.push_str(&format!("\n  - {}", name));
        }
        out.push_str(&format!("\n{}:", page.tr("admin.diseases", "Diseases", &[])));
        for disease in &data.diseases {
            out.push_str(&format!("\n  - {}: {}", disease.name, disease.solution));
        }
        out
    }

    /// Reloads the lists; runs after every change, failed or not.
    async fn reload(page: &Page) -> Result<String> {
        match page.backend().admin_data().await {
            Ok(data) => Ok(Self::render(page, &data)),
            Err(e) => {
                log::error!("Admin data: {}", e);
                Ok(page.tr("admin.unavailable", "Admin data unavailable", &[]))
            }
        }
    }
}

#[async_trait::async_trait]
impl Command for AdminCommand {
    fn name(&self) -> &'static str {
        "admin"
    }

    fn description(&self) -> &'static str {
        "Manage commodities and diseases (admin [add|delete|disease] ...)"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "admin")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        let rest = args.get(1..).unwrap_or_default().join(" ");
        match args.first().copied() {
            None | Some("list") => {}
            Some("add") => {
                let name = rest.trim();
                if name.is_empty() {
                    return Self::reload(page).await;
                }
                match page.backend().add_commodity(name).await {
                    Ok(()) => log::info!("Commodity added: {}", name),
                    Err(e) => log::error!("Add commodity {}: {}", name, e),
                }
            }
            Some("delete") => {
                let name = rest.trim();
                if name.is_empty() {
                    return Self::reload(page).await;
                }
                match page.backend().delete_commodity(name).await {
                    Ok(()) => log::info!("Commodity deleted: {}", name),
                    Err(e) => log::error!("Delete commodity {}: {}", name, e),
                }
            }
            Some("disease") => {
                let (name, solution) = split_pair(&rest);
                if name.is_empty() || solution.is_empty() {
                    return Self::reload(page).await;
                }
                match page.backend().add_disease(&name, &solution).await {
                    Ok(()) => log::info!("Disease added: {}", name),
                    Err(e) => log::error!("Add disease {}: {}", name, e),
                }
            }
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "Unknown admin action '{}'. Usage: admin [list|add <name>|delete <name>|disease <name>|<solution>]",
                    other
                )))
            }
        }
        Self::reload(page).await
    }

    fn priority(&self) -> u8 {
        30
    }
}
