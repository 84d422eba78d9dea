// =====================================================
// FILE: tests/sync_tests.rs - CROSS-VIEW STATE
// =====================================================

use agri_portal::commands::cart::CartItem;
use agri_portal::commands::theme::Theme;
use agri_portal::store::{LANG_KEY, THEME_KEY};
use agri_portal::view::header::{CART_COUNT, FLOATING_CART_COUNT, LANG_CURRENT, THEME_TOGGLE};
use agri_portal::{
    open_page, spawn_storage_listener, Config, Dictionary, FileStore, MemoryStore, Page, Store,
    StoreHandle,
};
use std::sync::Arc;
use std::time::Duration;

fn dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::embedded().expect("embedded languages load"))
}

fn two_views() -> (Arc<Page>, Arc<Page>) {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let handle = StoreHandle::new(store);
    let config = Config::default();
    let first = open_page(&config, handle.clone(), dictionary()).unwrap();
    let second = open_page(&config, handle.open_view(), dictionary()).unwrap();
    (first, second)
}

async fn wait_for(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}

#[tokio::test]
async fn language_change_reaches_other_view() {
    let (first, second) = two_views();
    let listener = spawn_storage_listener(second.clone());

    first.set_language("ta").unwrap();
    assert_eq!(first.text("nav-buy").as_deref(), Some("வாங்க"));

    assert!(wait_for(|| second.language() == "ta").await);
    assert_eq!(second.text("nav-buy").as_deref(), Some("வாங்க"));
    assert_eq!(second.text(LANG_CURRENT).as_deref(), Some("தமிழ்"));
    assert_eq!(second.document().lang(), "ta");

    listener.abort();
}

#[tokio::test]
async fn writer_does_not_react_to_its_own_change() {
    let (first, _second) = two_views();
    let mut own = first.store().subscribe();

    first.set_language("hi").unwrap();
    assert!(own.try_recv().is_none());
}

#[test]
fn theme_persists_across_reload_but_is_not_pushed_live() {
    let (first, second) = two_views();

    assert_eq!(first.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(second.theme(), Theme::Light);

    // a fresh page load picks it up
    let reloaded = open_page(&Config::default(), second.store().clone(), dictionary()).unwrap();
    assert_eq!(reloaded.theme(), Theme::Dark);
    assert_eq!(reloaded.text(THEME_TOGGLE).as_deref(), Some("🌙"));

    // toggled twice is back where it started
    assert_eq!(first.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(first.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));
}

#[test]
fn cart_counts_are_shared_through_the_store() {
    let (first, second) = two_views();

    first.add_to_cart(CartItem::new("Tomato", "a@x.com", 20.0)).unwrap();
    second.add_to_cart(CartItem::new("Tomato", "a@x.com", 20.0)).unwrap();
    second.add_to_cart(CartItem::new("Onion", "b@x.com", 30.0)).unwrap();

    let items = first.cart_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].qty, Some(2));
    assert_eq!(first.cart_count(), 3);

    // badges refresh on the view that wrote
    assert_eq!(second.text(CART_COUNT).as_deref(), Some("3"));
    assert_eq!(second.text(FLOATING_CART_COUNT).as_deref(), Some("3"));
}

#[tokio::test]
async fn file_store_change_from_another_process_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    // "this process"
    let local = Arc::new(FileStore::open(&path).unwrap());
    let local_dyn: Arc<dyn Store> = local.clone();
    let page = open_page(&Config::default(), StoreHandle::new(local_dyn), dictionary()).unwrap();
    let listener = spawn_storage_listener(page.clone());

    // "another process" writes the same file
    let remote = FileStore::open(&path).unwrap();
    let remote_view = StoreHandle::new(Arc::new(remote));
    remote_view.set(LANG_KEY, "kn").unwrap();

    assert_eq!(local.reload().unwrap(), 1);
    assert!(wait_for(|| page.language() == "kn").await);
    assert_eq!(page.text("nav-sell").as_deref(), Some("ಮಾರಾಟ"));

    listener.abort();
}

#[tokio::test]
async fn watched_file_store_picks_up_other_process_without_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let local = FileStore::open(&path).unwrap();
    local.watch().unwrap();
    let handle = StoreHandle::new(Arc::new(local));
    let mut inbox = handle.subscribe();
    let page = open_page(&Config::default(), handle.open_view(), dictionary()).unwrap();
    let listener = spawn_storage_listener(page.clone());

    let remote = StoreHandle::new(Arc::new(FileStore::open(&path).unwrap()));
    remote.set(LANG_KEY, "hi").unwrap();

    let event = tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            match inbox.recv().await {
                Some(event) if event.key == LANG_KEY => return event,
                Some(_) => continue,
                None => panic!("store dropped"),
            }
        }
    })
    .await
    .expect("foreign language change observed");
    assert_eq!(event.origin, None);
    assert_eq!(event.new_value.as_deref(), Some("hi"));

    assert!(wait_for(|| page.language() == "hi").await);
    assert_eq!(page.text("nav-buy").as_deref(), Some("खरीदें"));

    listener.abort();
}

#[test]
fn stored_language_outside_configured_set_falls_back() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let handle = StoreHandle::new(store);
    handle.set(LANG_KEY, "fr").unwrap();

    let page = open_page(&Config::default(), handle, dictionary()).unwrap();
    assert_eq!(page.language(), "en");
    assert_eq!(page.text("nav-buy").as_deref(), Some("Buy"));
}
