//! Session integration tests: menu load, commits, sync and refresh

use lather_client::connectivity::{self, ConnectivityStatus};
use lather_client::{CartStore, InMemoryCartStore, InMemoryMenuSource, SessionConfig, StoreSession};
use rust_decimal_macros::dec;
use shared::models::{ItemChoice, MenuItem, Store, StoreMenu};
use shared::selection::SelectionState;
use std::sync::Arc;
use std::time::Duration;

fn store() -> Store {
    let mut store = Store::new("store-1", "Sudsy Corner", "1 Main St").with_location(40.0, -74.0);
    store.menu_ids = vec!["menu-1".into()];
    store
}

fn washing_menu() -> StoreMenu {
    let wash_fold = MenuItem::new("wf-1", "Wash & Fold", "Washing", dec!(10.00), "menu-1")
        .with_choices(vec![
            ItemChoice::new("Small", "Size", dec!(0.00), true, 1),
            ItemChoice::new("Large", "Size", dec!(3.00), true, 1),
            ItemChoice::new("Softener", "Add-ons", dec!(1.00), false, 2),
        ]);
    let duvet = MenuItem::new("dv-1", "Duvet", "Bedding", dec!(15.00), "menu-1");
    StoreMenu::new("menu-1", "Washing").with_items(vec![wash_fold, duvet])
}

async fn open_session(
    cart_store: Arc<InMemoryCartStore>,
    status: ConnectivityStatus,
) -> (StoreSession, tokio::sync::watch::Sender<ConnectivityStatus>) {
    let menus = Arc::new(InMemoryMenuSource::new());
    menus.insert(washing_menu()).await;
    let (tx, rx) = connectivity::channel(status);
    let session = StoreSession::open(
        store(),
        "user-1",
        menus,
        cart_store,
        rx,
        SessionConfig::default().with_sync_retry_interval(Duration::from_millis(100)),
    )
    .await;
    (session, tx)
}

fn eligible_draft(session_menu: &StoreMenu) -> (MenuItem, SelectionState) {
    // edit flow works on a copy of the menu's item
    let mut draft = session_menu
        .items
        .iter()
        .find(|i| i.id == "wf-1")
        .cloned()
        .unwrap();
    draft.set_quantity(2);
    let mut selection = SelectionState::new();
    let large = draft.choices.iter().find(|c| c.name == "Large").cloned().unwrap();
    let softener = draft
        .choices
        .iter()
        .find(|c| c.name == "Softener")
        .cloned()
        .unwrap();
    selection.select(&draft, &large).unwrap();
    selection.select(&draft, &softener).unwrap();
    (draft, selection)
}

#[tokio::test(start_paused = true)]
async fn test_commit_syncs_to_cart_store() {
    let cart_store = Arc::new(InMemoryCartStore::new());
    let (session, _tx) = open_session(cart_store.clone(), ConnectivityStatus::Satisfied).await;
    assert!(session.load_menu("menu-1").await.unwrap());

    let (draft, selection) = {
        let menu = session.menu();
        let guard = menu.read().await;
        eligible_draft(guard.as_ref().unwrap())
    };
    assert!(session.commit_item(draft, &selection).await);
    // (10 + 3 + 1) * 2
    assert_eq!(session.subtotal().await, dec!(28.00));

    tokio::time::sleep(Duration::from_millis(50)).await;
    let remote = cart_store.fetch("store-1", "user-1").await.unwrap().unwrap();
    assert_eq!(remote.subtotal, dec!(28.00));
    assert_eq!(remote.total_quantity(), 2);

    session.close();
}

#[tokio::test(start_paused = true)]
async fn test_ineligible_commit_leaves_cart_untouched() {
    let cart_store = Arc::new(InMemoryCartStore::new());
    let (session, _tx) = open_session(cart_store, ConnectivityStatus::Satisfied).await;
    session.load_menu("menu-1").await.unwrap();

    // required Size category left empty
    let mut draft = MenuItem::new("wf-1", "Wash & Fold", "Washing", dec!(10.00), "menu-1")
        .with_choices(vec![ItemChoice::new("Small", "Size", dec!(0.00), true, 1)]);
    draft.set_quantity(1);
    let selection = SelectionState::new();

    assert!(!session.commit_item(draft, &selection).await);
    assert_eq!(session.total_quantity().await, 0);

    session.close();
}

#[tokio::test(start_paused = true)]
async fn test_absent_menu_is_not_an_error() {
    let cart_store = Arc::new(InMemoryCartStore::new());
    let (session, _tx) = open_session(cart_store, ConnectivityStatus::Satisfied).await;

    assert!(!session.load_menu("menu-dry-cleaning").await.unwrap());
    assert!(session.menu().read().await.is_none());

    session.close();
}

#[tokio::test(start_paused = true)]
async fn test_sync_deferred_until_connectivity_returns() {
    let cart_store = Arc::new(InMemoryCartStore::new());
    let (session, tx) = open_session(cart_store.clone(), ConnectivityStatus::Unsatisfied).await;
    session.load_menu("menu-1").await.unwrap();

    let (draft, selection) = {
        let menu = session.menu();
        let guard = menu.read().await;
        eligible_draft(guard.as_ref().unwrap())
    };
    assert!(session.commit_item(draft, &selection).await);

    // offline: nothing pushed
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(cart_store.fetch("store-1", "user-1").await.unwrap().is_none());

    // connectivity returns and the deferred push drains
    tx.send(ConnectivityStatus::Satisfied).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(cart_store.fetch("store-1", "user-1").await.unwrap().is_some());

    session.close();
}

#[tokio::test(start_paused = true)]
async fn test_push_retries_after_store_failure() {
    let cart_store = Arc::new(InMemoryCartStore::new());
    let (session, _tx) = open_session(cart_store.clone(), ConnectivityStatus::Satisfied).await;
    session.load_menu("menu-1").await.unwrap();
    cart_store.set_unavailable(true);

    let (draft, selection) = {
        let menu = session.menu();
        let guard = menu.read().await;
        eligible_draft(guard.as_ref().unwrap())
    };
    session.commit_item(draft, &selection).await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    cart_store.set_unavailable(false);
    // past the retry interval the worker succeeds
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(cart_store.fetch("store-1", "user-1").await.unwrap().is_some());

    session.close();
}

#[tokio::test(start_paused = true)]
async fn test_refresh_supersedes_local_cart() {
    let cart_store = Arc::new(InMemoryCartStore::new());
    let (session, _tx) = open_session(cart_store.clone(), ConnectivityStatus::Satisfied).await;
    session.load_menu("menu-1").await.unwrap();

    // remote copy written by another device
    let mut remote_cart = shared::Cart::new("store-1", "user-1");
    let mut towels = MenuItem::new("tw-1", "Towels", "Bedding", dec!(4.00), "menu-1");
    towels.set_quantity(5);
    remote_cart.add_item(towels);
    cart_store.push(&remote_cart.snapshot()).await.unwrap();

    session.refresh().await.unwrap();
    assert_eq!(session.total_quantity().await, 5);
    assert_eq!(session.subtotal().await, dec!(20.00));

    session.close();
}

#[tokio::test(start_paused = true)]
async fn test_open_restores_persisted_cart() {
    let cart_store = Arc::new(InMemoryCartStore::new());

    let mut earlier = shared::Cart::new("store-1", "user-1");
    let mut duvet = MenuItem::new("dv-1", "Duvet", "Bedding", dec!(15.00), "menu-1");
    duvet.set_quantity(1);
    earlier.add_item(duvet);
    cart_store.push(&earlier.snapshot()).await.unwrap();

    let (session, _tx) = open_session(cart_store, ConnectivityStatus::Satisfied).await;
    assert_eq!(session.total_quantity().await, 1);
    assert_eq!(session.subtotal().await, dec!(15.00));

    session.close();
}
