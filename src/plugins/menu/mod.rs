pub mod commands;
pub mod helpers;
pub mod storage;
pub mod types;
pub mod watcher;

use crate::shared::errors::StorageError;
use std::sync::RwLock;
use types::MenuData;

/// Thread-safe in-memory catalog with file persistence.
pub struct MenuStore(pub RwLock<MenuData>);

impl MenuStore {
    pub fn new(data: MenuData) -> Self {
        Self(RwLock::new(data))
    }

    pub fn read(&self) -> std::sync::RwLockReadGuard<'_, MenuData> {
        self.0.read().unwrap()
    }

    pub fn write(&self) -> std::sync::RwLockWriteGuard<'_, MenuData> {
        self.0.write().unwrap()
    }
}

/// Initialize the menu store, migrating from a legacy database if needed.
pub fn init_menu_store() -> Result<MenuStore, StorageError> {
    let data = storage::load_or_migrate()?;
    tracing::info!(
        target: "menu",
        "Menu store initialized: {} dishes, {} reviews",
        data.dishes.len(),
        data.review_count()
    );
    Ok(MenuStore::new(data))
}
