use super::types::{Dish, MenuData, Review};
use crate::shared::errors::StorageError;
use crate::shared::paths::{ensure_dir, get_plugin_dir, get_storage_dir};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

// ============================================================================
// Write Suppression Registry
// ============================================================================

/// Duration to suppress watcher events after an internal write.
const WRITE_SUPPRESSION_WINDOW_MS: u64 = 300;

/// Registry of recent internal writes (file path -> last write timestamp).
static WRITE_REGISTRY: once_cell::sync::Lazy<Mutex<HashMap<PathBuf, Instant>>> =
    once_cell::sync::Lazy::new(|| Mutex::new(HashMap::new()));

/// Records an internal write for a file path.
/// Called after saving to prevent the watcher from reacting to our own writes.
pub fn record_internal_write(path: &PathBuf) {
    if let Ok(mut registry) = WRITE_REGISTRY.lock() {
        registry.insert(path.clone(), Instant::now());
        tracing::trace!(
            target: "menu::storage",
            path = %path.display(),
            "Recorded internal write"
        );
    }
}

/// Checks if a file path was recently written by the app (within suppression window).
/// Returns true if the event should be suppressed, false if it should be processed.
pub fn should_suppress_event(path: &PathBuf) -> bool {
    let suppression_window = Duration::from_millis(WRITE_SUPPRESSION_WINDOW_MS);

    if let Ok(mut registry) = WRITE_REGISTRY.lock() {
        if let Some(write_time) = registry.get(path) {
            let elapsed = write_time.elapsed();
            if elapsed < suppression_window {
                tracing::debug!(
                    target: "menu::storage",
                    path = %path.display(),
                    elapsed_ms = elapsed.as_millis(),
                    "Suppressing event for self-write"
                );
                return true;
            }
            // Expired entry, remove it
            registry.remove(path);
        }
    }
    false
}

/// Cleans up expired entries from the write registry.
/// Call periodically to prevent memory buildup.
pub fn cleanup_write_registry() {
    let suppression_window = Duration::from_millis(WRITE_SUPPRESSION_WINDOW_MS);

    if let Ok(mut registry) = WRITE_REGISTRY.lock() {
        registry.retain(|_, write_time| write_time.elapsed() < suppression_window);
    }
}

// ============================================================================
// Path Helpers
// ============================================================================

pub fn get_menu_dir() -> PathBuf {
    get_plugin_dir("menu")
}

fn get_dishes_path() -> PathBuf {
    get_menu_dir().join("dishes.json")
}

fn get_sqlite_path() -> PathBuf {
    get_storage_dir().join("tastebud.db")
}

fn get_sqlite_backup_path() -> PathBuf {
    get_storage_dir().join("tastebud.db.bak")
}

// ============================================================================
// Load / Save
// ============================================================================

/// Loads the catalog, migrating from a legacy SQLite database if the JSON
/// storage does not exist yet.
pub fn load_or_migrate() -> Result<MenuData, StorageError> {
    let dishes_path = get_dishes_path();
    let sqlite_path = get_sqlite_path();

    if dishes_path.exists() {
        let mut data = load_from_json(&dishes_path)?;
        data.normalize();
        return Ok(data);
    }

    if sqlite_path.exists() {
        tracing::info!(target: "menu", "Found legacy database, migrating to JSON storage...");
        let data = migrate_from_sqlite(&sqlite_path)?;
        save_to_json(&data)?;

        let backup_path = get_sqlite_backup_path();
        std::fs::rename(&sqlite_path, &backup_path)?;
        tracing::info!(target: "menu", "Legacy database backed up to {:?}", backup_path);

        return Ok(data);
    }

    Ok(MenuData::default())
}

/// Reloads the catalog from disk; an absent file is an empty catalog.
/// Used by the watcher after an external modification.
pub fn reload_from_disk() -> Result<MenuData, StorageError> {
    let path = get_dishes_path();
    if !path.exists() {
        return Ok(MenuData::default());
    }
    let mut data = load_from_json(&path)?;
    data.normalize();
    Ok(data)
}

fn load_from_json(path: &Path) -> Result<MenuData, StorageError> {
    let content = std::fs::read_to_string(path)?;
    let data: MenuData = serde_json::from_str(&content)?;
    Ok(data)
}

/// Saves the catalog, keeping a timestamped backup of the previous file.
pub fn save_to_json(data: &MenuData) -> Result<(), StorageError> {
    let dir = get_menu_dir();
    ensure_dir(&dir).map_err(|e| StorageError::directory(e.to_string()))?;

    let path = get_dishes_path();
    if path.exists() {
        let backup = dir.join(format!(
            "dishes.json.{}.bak",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ));
        std::fs::rename(&path, &backup)?;
    }

    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(&path, &content)?;
    record_internal_write(&path);
    Ok(())
}

// ============================================================================
// Legacy Migration
// ============================================================================

/// List columns in the legacy schema hold JSON-encoded arrays; NULL or
/// malformed content degrades to an empty list.
fn decode_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

fn migrate_from_sqlite(path: &Path) -> Result<MenuData, StorageError> {
    use rusqlite::Connection;

    let conn = Connection::open(path)?;

    let mut dishes = Vec::new();
    {
        let mut stmt = conn.prepare(
            "SELECT id, name, description, image, ingredients, preparation, tags \
             FROM dishes ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;
        for row in rows {
            let (id, name, description, image, ingredients, preparation, tags) = row?;
            dishes.push(Dish {
                id,
                name,
                description: description.unwrap_or_default(),
                image: image.unwrap_or_default(),
                ingredients: decode_list(ingredients.as_deref()),
                preparation: decode_list(preparation.as_deref()),
                tags: decode_list(tags.as_deref()),
                reviews: Vec::new(),
                avg_rating: None,
            });
        }
    }

    let mut review_count = 0usize;
    {
        let mut stmt = conn.prepare(
            "SELECT r.dish_id, u.username, r.rating, r.comment, r.date \
             FROM reviews r JOIN users u ON u.id = r.user_id \
             ORDER BY r.date DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;
        for row in rows {
            let (dish_id, user, rating, comment, date) = row?;
            if let Some(dish) = dishes.iter_mut().find(|d| d.id == dish_id) {
                dish.reviews.push(Review {
                    id: Uuid::new_v4().to_string(),
                    user,
                    rating: rating.clamp(1, 5) as u8,
                    comment,
                    date,
                    created_at: 0,
                });
                review_count += 1;
            }
        }
    }

    let mut data = MenuData { dishes };
    data.normalize();

    tracing::info!(
        target: "menu",
        "Migrated {} dishes, {} reviews from SQLite",
        data.dishes.len(),
        review_count
    );

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list() {
        assert_eq!(
            decode_list(Some(r#"["spicy", "thai"]"#)),
            vec!["spicy".to_string(), "thai".to_string()]
        );
        assert_eq!(decode_list(Some("not json")), Vec::<String>::new());
        assert_eq!(decode_list(None), Vec::<String>::new());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dishes.json");

        let data = MenuData {
            dishes: vec![Dish {
                id: 7,
                name: "Pad Thai".to_string(),
                description: "Noodles".to_string(),
                image: "pad-thai.jpg".to_string(),
                ingredients: vec!["noodles".to_string()],
                preparation: vec!["wok".to_string()],
                tags: vec!["thai".to_string()],
                reviews: vec![],
                avg_rating: None,
            }],
        };

        let content = serde_json::to_string_pretty(&data).unwrap();
        std::fs::write(&path, content).unwrap();

        let loaded = load_from_json(&path).unwrap();
        assert_eq!(loaded.dishes.len(), 1);
        assert_eq!(loaded.dishes[0].id, 7);
        assert_eq!(loaded.dishes[0].tags, ["thai"]);
    }

    #[test]
    fn test_load_tolerates_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dishes.json");
        std::fs::write(&path, r#"{"dishes": [{"id": 1, "name": "Feijoada"}]}"#).unwrap();

        let loaded = load_from_json(&path).unwrap();
        assert_eq!(loaded.dishes[0].name, "Feijoada");
        assert!(loaded.dishes[0].tags.is_empty());
        assert!(loaded.dishes[0].reviews.is_empty());
    }

    #[test]
    fn test_write_registry_suppression() {
        let path = PathBuf::from("/tmp/tastebud-test-registry.json");
        record_internal_write(&path);
        assert!(should_suppress_event(&path));

        let other = PathBuf::from("/tmp/tastebud-test-other.json");
        assert!(!should_suppress_event(&other));
    }
}
