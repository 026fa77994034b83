//! Tag filter for the dish listing.
//!
//! The page renders one button per known tag plus a free-text search input.
//! All selection state lives here: the page measures its buttons, hands them
//! over with the input's initial value via `filter_init`, and from then on
//! only forwards clicks. Every command returns a full snapshot the page
//! applies verbatim (button styling, pinned widths, input value), so the
//! rendered state can never drift from the selection.

pub mod commands;
pub mod state;
pub mod types;

use state::FilterState;
use std::sync::RwLock;

/// Managed slot for the filter binding. `None` until `filter_init` runs,
/// and stays `None` when the page has no search input.
#[derive(Default)]
pub struct FilterStore(pub RwLock<Option<FilterState>>);

impl FilterStore {
    pub fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<FilterState>> {
        self.0.read().unwrap()
    }

    pub fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<FilterState>> {
        self.0.write().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_unbound() {
        let store = FilterStore::default();
        assert!(store.read().is_none());
    }
}
