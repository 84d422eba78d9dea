use crate::commands::command::Command;
use crate::core::prelude::*;
use crate::view::Page;

/// Lists the commands registered before it.
#[derive(Debug, Default)]
pub struct HelpCommand {
    entries: Vec<(&'static str, &'static str)>,
}

impl HelpCommand {
    pub fn new(entries: Vec<(&'static str, &'static str)>) -> Self {
        Self { entries }
    }

    fn entries(&self) -> Vec<(&'static str, &'static str)> {
        let mut entries = self.entries.clone();
        if !entries.iter().any(|(name, _)| *name == self.name()) {
            entries.push((self.name(), self.description()));
        }
        entries
    }

    /// Build the formatted default help list
    fn create_formatted_list(&self, page: &Page) -> String {
        let mut categorized = std::collections::BTreeMap::new();
        for (name, description) in self.entries() {
            categorized
                .entry(Self::determine_category(name))
                .or_insert_with(Vec::new)
                .push((name, description));
        }

        let mut result = page.tr("help.header", "Available commands", &[]);
        result.push_str("\n\n");

        for (category_key, commands) in categorized {
            let category_name = page.tr(
                &format!("help.category.{}", category_key),
                Self::fallback_category_name(category_key),
                &[],
            );
            result.push_str(&format!("{}:\n", category_name));
            for (name, description) in commands {
                result.push_str(&format!("  {:10} - {}\n", name, description));
            }
            result.push('\n');
        }

        result.push_str(&page.tr("help.footer", "Type 'help <command>' for details", &[]));
        result
    }

    fn create_simple_list(&self) -> String {
        self.entries()
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn show_command_help(&self, page: &Page, command_name: &str) -> String {
        let wanted = command_name.trim().to_lowercase();
        match self.entries().into_iter().find(|(name, _)| *name == wanted) {
            Some((name, description)) => format!("{} - {}", name, description),
            None => page.tr("system.unknown", "Unknown command: {}", &[command_name]),
        }
    }

    /// Determine the category for a command by name
    fn determine_category(command_name: &str) -> &'static str {
        match command_name {
            "language" | "theme" => "preferences",
            "search" | "contact" | "cart" | "price" => "market",
            "predict" | "admin" => "farm",
            "user" | "logout" => "account",
            "help" | "version" => "information",
            "exit" => "system",
            _ => "other",
        }
    }

    fn fallback_category_name(category_key: &str) -> &'static str {
        match category_key {
            "preferences" => "Preferences",
            "market" => "Market",
            "farm" => "Farm Tools",
            "account" => "Account",
            "information" => "Information",
            "system" => "System",
            _ => "Other",
        }
    }
}

#[async_trait::async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Show all available commands"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "help" | "?" | "commands")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        match args.first() {
            None => Ok(self.create_formatted_list(page)),
            Some(&"--simple" | &"-s") => Ok(self.create_simple_list()),
            Some(&command_name) => Ok(self.show_command_help(page, command_name)),
        }
    }

    fn priority(&self) -> u8 {
        95
    }
}
