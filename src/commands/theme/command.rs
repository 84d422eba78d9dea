use super::manager::Theme;
use crate::commands::command::Command;
use crate::core::prelude::*;
use crate::view::header::theme_icon;
use crate::view::Page;

#[derive(Debug, Default)]
pub struct ThemeCommand;

impl ThemeCommand {
    pub fn new() -> Self {
        Self
    }

    fn confirmation(page: &Page, theme: Theme) -> String {
        let text = if theme.is_dark() {
            page.tr("theme.dark", "Dark mode on", &[])
        } else {
            page.tr("theme.light", "Light mode on", &[])
        };
        format!("{} {}", theme_icon(theme.is_dark()), text)
    }
}

#[async_trait::async_trait]
impl Command for ThemeCommand {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn description(&self) -> &'static str {
        "Toggle light/dark mode (theme [dark|light|status])"
    }

    fn matches(&self, command: &str) -> bool {
        command.trim().to_lowercase().starts_with("theme")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        let theme = match args.first() {
            None | Some(&"toggle") => page.toggle_theme()?,
            Some(&"status") => page.theme(),
            Some(&name) => match Theme::parse(name) {
                Some(theme) => page.set_theme(theme)?,
                None => {
                    return Err(AppError::Validation(format!(
                        "Unknown theme '{}'. Usage: theme [dark|light|status]",
                        name
                    )))
                }
            },
        };
        Ok(Self::confirmation(page, theme))
    }

    fn priority(&self) -> u8 {
        65
    }
}
