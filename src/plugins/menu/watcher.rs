//! File watcher for the menu catalog.
//!
//! Watches the menu storage directory, reloads the catalog into the store
//! when `dishes.json` is modified externally, and emits a Tauri event so the
//! page can refresh. Debounced to avoid event spam when editors write files
//! in multiple operations; the storage layer's write registry keeps the
//! watcher from reacting to the app's own saves.

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tauri::{AppHandle, Emitter, Manager};

use super::storage::{cleanup_write_registry, get_menu_dir, reload_from_disk, should_suppress_event};
use super::MenuStore;

const DEBOUNCE_DURATION_MS: u64 = 200;
const EVENT_NAME: &str = "menu:storage-updated";

/// Payload emitted when the catalog changes on disk and is reloaded.
#[derive(Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUpdatedPayload {
    /// Version timestamp (milliseconds since UNIX epoch) for cache invalidation.
    pub version: i64,
}

/// Watches the menu directory for external modifications.
pub struct MenuFileWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    watched_path: PathBuf,
}

impl MenuFileWatcher {
    pub fn new(app_handle: AppHandle) -> Result<Self, notify::Error> {
        let menu_dir = get_menu_dir();

        if !menu_dir.exists() {
            std::fs::create_dir_all(&menu_dir).map_err(|e| {
                notify::Error::generic(&format!("Failed to create menu directory: {}", e))
            })?;
        }

        let (tx, rx) = channel::<Result<Vec<DebouncedEvent>, notify::Error>>();
        let debouncer = new_debouncer(Duration::from_millis(DEBOUNCE_DURATION_MS), tx)?;

        let handle = app_handle.clone();
        std::thread::spawn(move || {
            handle_events(rx, handle);
        });

        let mut watcher = Self {
            debouncer,
            watched_path: menu_dir,
        };
        watcher.start()?;

        tracing::info!(
            target: "menu::watcher",
            path = %watcher.watched_path.display(),
            "File watcher started"
        );

        Ok(watcher)
    }

    fn start(&mut self) -> Result<(), notify::Error> {
        self.debouncer
            .watcher()
            .watch(&self.watched_path, RecursiveMode::NonRecursive)
    }

    pub fn stop(&mut self) -> Result<(), notify::Error> {
        self.debouncer.watcher().unwatch(&self.watched_path)
    }
}

fn handle_events(rx: Receiver<Result<Vec<DebouncedEvent>, notify::Error>>, app_handle: AppHandle) {
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                for event in events {
                    process_event(&event, &app_handle);
                }
            }
            Ok(Err(e)) => {
                tracing::error!(
                    target: "menu::watcher",
                    error = %e,
                    "Watcher error"
                );
            }
            Err(_) => {
                // Channel closed, watcher was dropped
                tracing::info!(
                    target: "menu::watcher",
                    "Watcher channel closed, stopping event handler"
                );
                break;
            }
        }
    }
}

/// Returns current timestamp in milliseconds since UNIX epoch.
fn current_version() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Processes a single file event: reloads the catalog and emits an event.
fn process_event(event: &DebouncedEvent, app_handle: &AppHandle) {
    cleanup_write_registry();

    let path = &event.path;

    // Only the catalog file matters; backups carry a .bak extension.
    if path.extension().map_or(true, |ext| ext != "json") {
        return;
    }
    if path.file_name().map_or(true, |name| name != "dishes.json") {
        return;
    }

    if should_suppress_event(&path.to_path_buf()) {
        tracing::debug!(
            target: "menu::watcher",
            path = %path.display(),
            "Event suppressed (self-write)"
        );
        return;
    }

    tracing::info!(
        target: "menu::watcher",
        path = %path.display(),
        "Catalog changed on disk (external write), reloading"
    );

    match reload_from_disk() {
        Ok(data) => {
            if let Some(store) = app_handle.try_state::<MenuStore>() {
                *store.write() = data;
            }
        }
        Err(e) => {
            tracing::error!(
                target: "menu::watcher",
                error = %e,
                "Failed to reload catalog"
            );
            return;
        }
    }

    let payload = StorageUpdatedPayload {
        version: current_version(),
    };
    if let Err(e) = app_handle.emit(EVENT_NAME, payload) {
        tracing::error!(
            target: "menu::watcher",
            error = %e,
            "Failed to emit storage updated event"
        );
    }
}
