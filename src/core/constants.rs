pub const APP_TITLE: &str = "AGRI360 PORTAL";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_STORAGE_PATH: &str = ".agri/storage.json";

/// Fallback language set when the config lists none.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "hi", "ta", "kn", "ml"];

/// Picker order: regional languages first, English last.
pub const LANGUAGE_PICKER_ORDER: &[&str] = &["ta", "hi", "ml", "kn", "en"];

pub const DARK_MODE_CLASS: &str = "dark-mode";
