//! Star-rating notifier.
//!
//! Stateless: a click on a rating element surfaces the clicked value as a
//! desktop notification and nothing else.

use crate::settings;
use tauri::AppHandle;
use tauri_plugin_notification::NotificationExt;

/// Shows a notification for a star-rating click. The rating comes straight
/// from the element's `data-rating` attribute and is treated as opaque text.
#[tauri::command]
pub fn rating_clicked(app: AppHandle, rating: String) {
    if !settings::load_settings().rating_notifications {
        tracing::debug!(target: "system", "Rating notification disabled in settings");
        return;
    }

    let result = app
        .notification()
        .builder()
        .title("tastebud")
        .body(format!("You rated this dish {} stars!", rating))
        .show();

    if let Err(e) = result {
        tracing::warn!(target: "system", error = %e, "Failed to show rating notification");
    }
}
