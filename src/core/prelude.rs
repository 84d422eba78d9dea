// src/core/prelude.rs

// Core essentials
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, Result};

// Standard library essentials
pub use std::sync::Arc;
pub use std::time::Duration;

// i18n essentials
pub use crate::i18n::{TranslationError, Translator, DEFAULT_LANGUAGE};
