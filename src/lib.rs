#[macro_export]
macro_rules! matches_exact {
    ($cmd:expr, $($pattern:literal)|+) => {
        matches!($cmd.trim().to_lowercase().as_str(), $($pattern)|+)
    };
}

// Module definitions
pub mod backend;
pub mod commands;
pub mod core;
pub mod i18n;
pub mod setup;
pub mod store;
pub mod view;

// Essential re-exports
pub use commands::{Command, CommandHandler, CommandRegistry, CommandResult};
pub use core::config::Config;
pub use core::error::{AppError, Result};
pub use i18n::{Dictionary, Translator};
pub use store::{FileStore, MemoryStore, Store, StoreHandle};
pub use view::{spawn_storage_listener, Page};

use std::sync::Arc;

pub fn create_default_registry() -> CommandRegistry {
    use commands::{
        admin::AdminCommand, cart::CartCommand, exit::ExitCommand, help::HelpCommand,
        lang::LanguageCommand, predict::PredictCommand, price::PriceCommand,
        search::{ContactCommand, SearchCommand}, theme::ThemeCommand,
        user::{LogoutCommand, UserCommand}, version::VersionCommand,
    };

    let mut registry = CommandRegistry::new();

    registry.register(LanguageCommand::new());
    registry.register(ThemeCommand::new());
    registry.register(CartCommand::new());
    registry.register(SearchCommand);
    registry.register(ContactCommand);
    registry.register(PriceCommand::new());
    registry.register(PredictCommand::new());
    registry.register(AdminCommand::new());
    registry.register(UserCommand);
    registry.register(LogoutCommand);
    registry.register(VersionCommand);
    registry.register(ExitCommand);

    let entries = registry.list_commands();
    registry.register(HelpCommand::new(entries));

    registry.initialize();
    registry
}

/// Opens one view on `store` and runs the page-load sequence.
pub fn open_page(config: &Config, store: StoreHandle, dictionary: Arc<Dictionary>) -> Result<Arc<Page>> {
    let page = Arc::new(Page::new(config, store, dictionary)?);
    page.load();
    Ok(page)
}

// Main entry point
pub async fn run() -> Result<()> {
    let config = Config::load().await?;
    run_with_config(config).await
}

/// Console session over the file store named in `config`.
pub async fn run_with_config(config: Config) -> Result<()> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    let dictionary = Arc::new(Dictionary::embedded()?);
    let file_store = FileStore::open(config.resolved_storage_path())?;
    if let Err(e) = file_store.watch() {
        log::warn!("Storage changes from other sessions will not be seen: {}", e);
    }
    let store: Arc<dyn Store> = Arc::new(file_store);

    let page = open_page(&config, StoreHandle::new(store), dictionary)?;
    let listener = spawn_storage_listener(page.clone());
    let handler = CommandHandler::new(page.clone());

    // Best effort: the profile block falls back to "Login".
    commands::user::UserCommand::refresh(&page).await;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{}\n", core::constants::APP_TITLE).as_bytes())
        .await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let result = handler.handle_input(&line).await;
        if result.should_exit {
            break;
        }
        if !result.message.is_empty() {
            stdout.write_all(format!("{}\n", result.message).as_bytes()).await?;
        }
    }

    listener.abort();
    log::info!("Session closed");
    Ok(())
}

pub async fn load_config() -> Result<Config> {
    Config::load().await
}
