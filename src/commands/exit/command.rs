use crate::commands::command::Command;
use crate::commands::handler::SIG_EXIT;
use crate::core::prelude::*;
use crate::view::Page;

#[derive(Debug, Default)]
pub struct ExitCommand;

#[async_trait::async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the application"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "exit" | "q" | "quit")
    }

    async fn execute(&self, _page: &Page, _args: &[&str]) -> Result<String> {
        Ok(SIG_EXIT.to_string())
    }

    fn priority(&self) -> u8 {
        100
    }
}
