use super::state::FilterState;
use super::types::{FilterSnapshot, TagButtonInit};
use super::FilterStore;
use tauri::State;

/// Binds the tag filter to the page's controls.
///
/// The page must measure each button's natural width *before* calling this
/// and before any active styling exists; the measurements are pinned as
/// fixed minimum widths for the life of the page.
///
/// `search_field` is the search input's current value, or `None` when the
/// page has no search input at all. In that case nothing is bound, the
/// command returns `None`, and the page must not register click handlers.
/// A valid configuration, not an error.
#[tauri::command]
pub fn filter_init(
    store: State<FilterStore>,
    buttons: Vec<TagButtonInit>,
    search_field: Option<String>,
) -> Option<FilterSnapshot> {
    let mut slot = store.write();

    let initial_query = match search_field {
        Some(value) => value,
        None => {
            tracing::info!(target: "filter", "No search field on page, tag filter left unbound");
            *slot = None;
            return None;
        }
    };

    let state = FilterState::bind(buttons, &initial_query);
    tracing::info!(
        target: "filter",
        buttons = state.button_count(),
        selected = state.selected_tags().len(),
        "Tag filter bound"
    );

    let snapshot = state.snapshot();
    *slot = Some(state);
    Some(snapshot)
}

/// Flips one tag button and returns the new snapshot. The search input is
/// rewritten from the returned `query` on every toggle.
#[tauri::command]
pub fn filter_toggle(
    store: State<FilterStore>,
    button_id: String,
) -> Result<FilterSnapshot, String> {
    let mut slot = store.write();
    let state = slot
        .as_mut()
        .ok_or_else(|| "Tag filter is not bound".to_string())?;

    state.toggle(&button_id)?;
    tracing::debug!(
        target: "filter",
        button_id = %button_id,
        query = %state.query(),
        "Tag toggled"
    );
    Ok(state.snapshot())
}
