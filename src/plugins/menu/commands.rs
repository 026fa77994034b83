use super::helpers;
use super::storage::save_to_json;
use super::types::{Dish, DishListing, DishSummary, Review};
use super::MenuStore;
use crate::settings;
use tauri::State;
use uuid::Uuid;

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn validate_review(rating: u8, comment: &str) -> Result<(), String> {
    if !(1..=5).contains(&rating) {
        return Err("Rating must be between 1 and 5".to_string());
    }
    if comment.is_empty() {
        return Err("A comment is required".to_string());
    }
    Ok(())
}

/// The dish listing plus the tag universe for the tag buttons.
///
/// `search` uses the same comma-separated shape the tag filter writes into
/// the search input. `sort` falls back to the configured default.
#[tauri::command]
pub fn menu_get_dishes(
    store: State<MenuStore>,
    search: Option<String>,
    sort: Option<String>,
) -> DishListing {
    let data = store.read();
    let tags = helpers::all_tags(&data);

    let query = search.unwrap_or_default();
    let query = query.trim();
    let mut dishes: Vec<DishSummary> = if query.is_empty() {
        data.dishes.iter().map(DishSummary::from).collect()
    } else {
        helpers::search_dishes(&data, query)
            .into_iter()
            .map(DishSummary::from)
            .collect()
    };

    let sort = sort.unwrap_or_else(|| settings::load_settings().default_sort);
    helpers::sort_summaries(&mut dishes, &sort);

    DishListing { dishes, tags }
}

#[tauri::command]
pub fn menu_get_dish(store: State<MenuStore>, id: i64) -> Result<Dish, String> {
    let data = store.read();
    helpers::find_dish(&data, id)
        .cloned()
        .ok_or_else(|| format!("Dish not found: {}", id))
}

/// Appends a review attributed to the configured username, keeps reviews
/// newest-first, refreshes the average and persists the catalog.
#[tauri::command]
pub fn menu_rate_dish(
    store: State<MenuStore>,
    id: i64,
    rating: u8,
    comment: String,
) -> Result<Dish, String> {
    let comment = comment.trim().to_string();
    validate_review(rating, &comment)?;

    let user = settings::load_settings().username;

    let mut data = store.write();
    let dish = helpers::find_dish_mut(&mut data, id).ok_or_else(|| format!("Dish not found: {}", id))?;

    dish.reviews.push(Review {
        id: Uuid::new_v4().to_string(),
        user,
        rating,
        comment,
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        created_at: now_ms(),
    });
    super::types::sort_reviews(&mut dish.reviews);
    dish.recompute_avg_rating();

    let updated = dish.clone();
    save_to_json(&data).map_err(|e| e.to_string())?;

    tracing::info!(
        target: "menu",
        dish_id = id,
        rating = rating,
        "Review added"
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_review() {
        assert!(validate_review(1, "fine").is_ok());
        assert!(validate_review(5, "great").is_ok());
        assert!(validate_review(0, "too low").is_err());
        assert!(validate_review(6, "too high").is_err());
        assert!(validate_review(3, "").is_err());
    }
}
