// =====================================================
// FILE: src/commands/handler.rs - CONSOLE DISPATCH
// =====================================================

use super::parsing::tokenize;
use super::registry::CommandRegistry;
use crate::core::prelude::*;
use crate::view::Page;

pub const SIG_EXIT: &str = "__EXIT__";

#[derive(Debug)]
pub struct CommandResult {
    pub message: String,
    pub success: bool,
    pub should_exit: bool,
}

impl CommandResult {
    fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            should_exit: false,
        }
    }
}

/// Routes console lines to commands acting on one [`Page`].
#[derive(Debug)]
pub struct CommandHandler {
    registry: CommandRegistry,
    page: Arc<Page>,
}

impl CommandHandler {
    pub fn new(page: Arc<Page>) -> Self {
        Self {
            registry: crate::create_default_registry(),
            page,
        }
    }

    pub fn with_registry(registry: CommandRegistry, page: Arc<Page>) -> Self {
        Self { registry, page }
    }

    pub fn page(&self) -> &Arc<Page> {
        &self.page
    }

    pub async fn handle_input(&self, input: &str) -> CommandResult {
        let input = input.trim();
        if input.is_empty() {
            return CommandResult::failure(String::new());
        }

        let tokens = match tokenize(input) {
            Ok(tokens) if !tokens.is_empty() => tokens,
            Ok(_) => return CommandResult::failure(String::new()),
            Err(e) => return CommandResult::failure(e.to_string()),
        };
        let parts: Vec<&str> = tokens.iter().map(String::as_str).collect();

        log::debug!("Processing command: '{}'", input);

        match self.registry.execute(&self.page, parts[0], &parts[1..]).await {
            Some(Ok(msg)) => {
                let preview = if msg.chars().count() > 100 {
                    format!("{}...", msg.chars().take(97).collect::<String>())
                } else {
                    msg.clone()
                };
                log::debug!("Command returned {} chars: '{}'", msg.chars().count(), preview);

                let should_exit = msg.starts_with(SIG_EXIT);
                CommandResult {
                    message: msg,
                    success: true,
                    should_exit,
                }
            }
            Some(Err(e)) => {
                log::error!("Command error: {}", e);
                CommandResult::failure(e.to_string())
            }
            None => {
                log::warn!("Unknown command: {}", input);
                CommandResult::failure(self.page.tr("system.unknown", "Unknown command: {}", &[parts[0]]))
            }
        }
    }

    pub fn add_command<T: crate::commands::command::Command>(&mut self, command: T) {
        self.registry.register(command);
        self.registry.initialize();
    }

    pub fn list_commands(&self) -> Vec<(&'static str, &'static str)> {
        self.registry.list_commands()
    }

    pub fn debug_info(&self) -> String {
        self.registry.debug_info()
    }
}
