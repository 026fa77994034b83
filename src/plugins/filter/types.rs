use serde::{Deserialize, Serialize};

/// One tag button as discovered by the page at load time.
///
/// `width` is the button's natural layout width, measured before any active
/// styling has been applied.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagButtonInit {
    pub id: String,
    /// Raw declared tag attribute. May be empty on malformed markup.
    #[serde(default)]
    pub tag: String,
    pub width: f64,
}

/// Rendering state for one button.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
    pub id: String,
    pub active: bool,
    /// Width pinned at bind time; applied as a fixed minimum so toggling
    /// the active style never shifts neighbouring buttons.
    pub min_width: f64,
}

/// Full state the page applies after init or a toggle.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSnapshot {
    pub buttons: Vec<ButtonState>,
    /// Serialized selection, written verbatim into the search input.
    pub query: String,
}
