use crate::commands::command::Command;
use crate::core::prelude::*;
use crate::i18n::speech_locale;
use crate::view::Page;

#[derive(Debug, Default)]
pub struct LanguageCommand;

impl LanguageCommand {
    pub fn new() -> Self {
        Self
    }

    fn show_status(page: &Page) -> String {
        let translator = page.translator();
        let current = translator.language();
        let available = translator
            .picker_order(page.languages().available())
            .into_iter()
            .map(|code| format!("{} ({})", translator.language_label(&code), code))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{}\n{}\nVoice: {}",
            translator.text_or(
                "lang.current",
                "Current language: {}",
                &[&translator.language_label(current)]
            ),
            translator.text_or("lang.available", "Available: {}", &[&available]),
            speech_locale(current)
        )
    }
}

#[async_trait::async_trait]
impl Command for LanguageCommand {
    fn name(&self) -> &'static str {
        "language"
    }

    fn description(&self) -> &'static str {
        "Show or change the portal language"
    }

    fn matches(&self, command: &str) -> bool {
        command.trim().to_lowercase().starts_with("lang")
    }

    async fn execute(&self, page: &Page, args: &[&str]) -> Result<String> {
        match args.first() {
            None => Ok(Self::show_status(page)),
            Some(&code) => match page.set_language(code) {
                Ok(()) => {
                    let code = page.language();
                    let label = page.translator().language_label(&code);
                    Ok(page.tr("lang.changed", "Language changed to {}", &[&label]))
                }
                Err(AppError::Translation(e)) => {
                    log::warn!("{}", e);
                    Ok(page.tr("lang.invalid", "Unknown language: {}", &[code]))
                }
                Err(e) => Err(e),
            },
        }
    }

    fn priority(&self) -> u8 {
        70
    }
}
