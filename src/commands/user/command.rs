use crate::commands::command::Command;
use crate::core::prelude::*;
use crate::view::Page;

/// Refreshes the profile block from the session.
#[derive(Debug, Default)]
pub struct UserCommand;

impl UserCommand {
    pub async fn refresh(page: &Page) -> String {
        match page.backend().user().await {
            Ok(info) => {
                let label = page.render_profile(Some(&info));
                match info.email() {
                    Some(email) if info.logged => {
                        page.tr("profile.logged_in", "Signed in as {}", &[email])
                    }
                    _ => label,
                }
            }
            Err(e) => {
                log::warn!("User lookup failed: {}", e);
                page.render_profile(None)
            }
        }
    }
}

#[async_trait::async_trait]
impl Command for UserCommand {
    fn name(&self) -> &'static str {
        "user"
    }

    fn description(&self) -> &'static str {
        "Show who is signed in"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "user" | "whoami" | "profile")
    }

    async fn execute(&self, page: &Page, _args: &[&str]) -> Result<String> {
        Ok(Self::refresh(page).await)
    }

    fn priority(&self) -> u8 {
        35
    }
}

#[derive(Debug, Default)]
pub struct LogoutCommand;

#[async_trait::async_trait]
impl Command for LogoutCommand {
    fn name(&self) -> &'static str {
        "logout"
    }

    fn description(&self) -> &'static str {
        "Sign out"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "logout")
    }

    async fn execute(&self, page: &Page, _args: &[&str]) -> Result<String> {
        if let Err(e) = page.backend().logout().await {
            log::error!("Logout failed: {}", e);
            return Ok(page.tr("profile.logout_failed", "Logout failed", &[]));
        }
        // The page reloads after logout; the profile block follows the session.
        UserCommand::refresh(page).await;
        Ok(page.tr("profile.logout", "Logged out", &[]))
    }

    fn priority(&self) -> u8 {
        35
    }
}
