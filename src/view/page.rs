// src/view/page.rs
use super::document::{Binding, Document, Element};
use super::header::{header_elements, PROFILE_BLOCK};
use crate::backend::{BackendClient, UserInfo};
use crate::commands::cart::{CartItem, CartManager};
use crate::commands::lang::LanguageManager;
use crate::commands::theme::{Theme, ThemeManager};
use crate::core::helpers::email_local_part;
use crate::core::prelude::*;
use crate::i18n::Dictionary;
use crate::store::{StorageEvent, StoreHandle, LANG_KEY};
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard};
use tokio::task::JoinHandle;

/// One open view of the portal: its document, its translator and its
/// handle on the shared store.
///
/// Lock order is translator, then document. No lock is held across an await.
#[derive(Debug)]
pub struct Page {
    store: StoreHandle,
    translator: RwLock<Translator>,
    document: Mutex<Document>,
    languages: LanguageManager,
    themes: ThemeManager,
    cart: CartManager,
    backend: BackendClient,
}

impl Page {
    pub fn new(config: &Config, store: StoreHandle, dictionary: Arc<Dictionary>) -> Result<Self> {
        let backend = BackendClient::new(&config.backend)?;
        let translator = Translator::new(dictionary, &config.language.default);

        Ok(Self {
            languages: LanguageManager::new(store.clone(), config.language.clone()),
            themes: ThemeManager::new(store.clone()),
            cart: CartManager::new(store.clone()),
            translator: RwLock::new(translator),
            document: Mutex::new(Document::new()),
            backend,
            store,
        })
    }

    /// Page-load sequence: theme first, then header, translations and badges.
    pub fn load(&self) {
        let mut translator = self.translator.write().unwrap_or_else(|p| p.into_inner());
        let mut document = self.document.lock().unwrap_or_else(|p| p.into_inner());

        self.themes.apply_stored_theme(&mut document);
        document.extend(header_elements());
        // Header was just re-created: its toggle needs the icon again.
        self.themes.apply_stored_theme(&mut document);
        let updated = self.languages.apply(&mut translator, &mut document);
        self.cart.refresh_badges(&mut document);

        log::debug!(
            "View {} loaded: {} elements, {} translated",
            self.store.id(),
            document.len(),
            updated
        );
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn translator(&self) -> RwLockReadGuard<'_, Translator> {
        self.translator.read().unwrap_or_else(|p| p.into_inner())
    }

    pub fn document(&self) -> MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.document().text(id).map(str::to_string)
    }

    /// Translated text, or `fallback` when the key is missing everywhere.
    pub fn tr(&self, key: &str, fallback: &str, params: &[&str]) -> String {
        self.translator().text_or(key, fallback, params)
    }

    pub fn language(&self) -> String {
        self.translator().language().to_string()
    }

    pub fn languages(&self) -> &LanguageManager {
        &self.languages
    }

    pub fn set_language(&self, code: &str) -> Result<()> {
        let mut translator = self.translator.write().unwrap_or_else(|p| p.into_inner());
        let mut document = self.document.lock().unwrap_or_else(|p| p.into_inner());
        self.languages
            .set_language(&mut translator, &mut document, code)
            .map(|_| ())
    }

    /// Re-applies translations from the persisted language.
    pub fn sync_language(&self) -> usize {
        let mut translator = self.translator.write().unwrap_or_else(|p| p.into_inner());
        let mut document = self.document.lock().unwrap_or_else(|p| p.into_inner());
        self.languages.apply(&mut translator, &mut document)
    }

    /// Reacts to a change made by another view. Returns whether it was handled.
    pub fn on_storage_event(&self, event: &StorageEvent) -> bool {
        if event.key != LANG_KEY {
            return false;
        }
        let updated = self.sync_language();
        log::debug!(
            "View {} picked up language {:?} ({} elements)",
            self.store.id(),
            event.new_value,
            updated
        );
        true
    }

    /// Inserts elements and translates them in the current language.
    pub fn render(&self, elements: impl IntoIterator<Item = Element>) {
        let translator = self.translator();
        let mut document = self.document();
        document.extend(elements);
        super::translate::apply_all(&mut document, &translator);
    }

    pub fn canonicalize(&self, query: &str) -> String {
        self.translator().canonicalize(query)
    }

    // ---------------- theme ----------------

    pub fn theme(&self) -> Theme {
        ThemeManager::displayed_theme(&self.document())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Theme> {
        self.themes.set_theme(&mut self.document(), theme)
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        self.themes.toggle_theme(&mut self.document())
    }

    // ---------------- cart ----------------

    pub fn add_to_cart(&self, item: CartItem) -> Result<CartItem> {
        let line = self.cart.add_item(item)?;
        self.cart.refresh_badges(&mut self.document());
        Ok(line)
    }

    pub fn cart_items(&self) -> Vec<CartItem> {
        self.cart.items()
    }

    pub fn cart_count(&self) -> u32 {
        self.cart.count()
    }

    // ---------------- profile ----------------

    /// Updates the profile block from `/api/user`; `None` means the call failed.
    pub fn render_profile(&self, user: Option<&UserInfo>) -> String {
        let (label, binding) = match user {
            Some(info) if info.logged => {
                let email = info.email().unwrap_or("user");
                (email_local_part(email).to_string(), None)
            }
            _ => (
                self.tr("profile.login", "Login", &[]),
                Some(Binding::Key("profile.login".into())),
            ),
        };

        // A signed-in name must survive later language switches.
        let mut document = self.document();
        if let Some(block) = document.get_mut(PROFILE_BLOCK) {
            block.text = label.clone();
            block.binding = binding;
        }
        label
    }
}

/// Applies foreign storage changes to `page` until the store goes away.
pub fn spawn_storage_listener(page: Arc<Page>) -> JoinHandle<()> {
    let mut subscription = page.store().subscribe();
    tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            page.on_storage_event(&event);
        }
        log::debug!("Storage listener for view {} stopped", page.store().id());
    })
}
