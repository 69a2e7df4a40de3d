//! Collaborator traits
//!
//! The network boundary of the core: menu fetch and cart persistence are
//! black boxes behind these traits. Absence (no menu, no cart) is `None`,
//! never an error. In-memory implementations back the tests and local-only
//! operation.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use shared::cart::CartSnapshot;
use shared::models::StoreMenu;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Source of store menus
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetch a menu by id; `None` means the store does not offer this
    /// service type (not an error)
    async fn fetch_menu(&self, menu_id: &str) -> ClientResult<Option<StoreMenu>>;
}

/// Persisted cart storage keyed by (store, user)
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn exists(&self, store_id: &str, user_id: &str) -> ClientResult<bool>;
    async fn fetch(&self, store_id: &str, user_id: &str) -> ClientResult<Option<CartSnapshot>>;
    /// Create or replace; fire-and-forget from the model's perspective
    async fn push(&self, snapshot: &CartSnapshot) -> ClientResult<()>;
    async fn delete(&self, store_id: &str, user_id: &str) -> ClientResult<()>;
}

/// In-memory menu source
#[derive(Default)]
pub struct InMemoryMenuSource {
    menus: RwLock<HashMap<String, StoreMenu>>,
}

impl InMemoryMenuSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, menu: StoreMenu) {
        self.menus.write().await.insert(menu.id.clone(), menu);
    }
}

#[async_trait]
impl MenuSource for InMemoryMenuSource {
    async fn fetch_menu(&self, menu_id: &str) -> ClientResult<Option<StoreMenu>> {
        Ok(self.menus.read().await.get(menu_id).cloned())
    }
}

/// In-memory cart store
#[derive(Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<(String, String), CartSnapshot>>,
    /// When set, every call fails; lets tests exercise retry paths
    unavailable: std::sync::atomic::AtomicBool,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable
            .store(unavailable, std::sync::atomic::Ordering::SeqCst);
    }

    fn check_available(&self) -> ClientResult<()> {
        if self.unavailable.load(std::sync::atomic::Ordering::SeqCst) {
            Err(ClientError::Store("cart store unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn exists(&self, store_id: &str, user_id: &str) -> ClientResult<bool> {
        self.check_available()?;
        Ok(self
            .carts
            .read()
            .await
            .contains_key(&(store_id.to_string(), user_id.to_string())))
    }

    async fn fetch(&self, store_id: &str, user_id: &str) -> ClientResult<Option<CartSnapshot>> {
        self.check_available()?;
        Ok(self
            .carts
            .read()
            .await
            .get(&(store_id.to_string(), user_id.to_string()))
            .cloned())
    }

    async fn push(&self, snapshot: &CartSnapshot) -> ClientResult<()> {
        self.check_available()?;
        self.carts.write().await.insert(
            (snapshot.store_id.clone(), snapshot.user_id.clone()),
            snapshot.clone(),
        );
        Ok(())
    }

    async fn delete(&self, store_id: &str, user_id: &str) -> ClientResult<()> {
        self.check_available()?;
        self.carts
            .write()
            .await
            .remove(&(store_id.to_string(), user_id.to_string()));
        Ok(())
    }
}
