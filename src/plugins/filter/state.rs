use super::types::{ButtonState, FilterSnapshot, TagButtonInit};

/// Canonical form of a tag: trimmed and lowercased.
///
/// Total on any input; empty and whitespace-only strings canonicalize to the
/// empty tag, which is a valid (degenerate) value.
pub fn canonical_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// One bound tag button. `active` is the single source of truth for the
/// button's selection state; the page derives styling from it and never
/// reports styling back.
#[derive(Clone, Debug)]
struct ButtonBinding {
    id: String,
    tag: String,
    active: bool,
    min_width: f64,
}

/// Selection state for the tag filter.
///
/// `selected` holds canonical tags in insertion order with no duplicates.
/// Serialization follows that order; removing and re-adding a tag moves it
/// to the end.
#[derive(Debug)]
pub struct FilterState {
    buttons: Vec<ButtonBinding>,
    selected: Vec<String>,
}

impl FilterState {
    /// Binds the filter to the page's controls in two phases: first pin each
    /// button's measured natural width (widths must be captured before any
    /// active styling is applied), then seed the selection from the search
    /// input's existing value.
    ///
    /// Seeding splits on commas, canonicalizes each token and drops empty
    /// ones; every button whose tag matches a seeded tag starts active. This
    /// is the only point at which the input's value is read.
    pub fn bind(buttons: Vec<TagButtonInit>, initial_query: &str) -> Self {
        let mut state = Self {
            buttons: buttons
                .into_iter()
                .map(|b| ButtonBinding {
                    tag: canonical_tag(&b.tag),
                    id: b.id,
                    active: false,
                    min_width: b.width,
                })
                .collect(),
            selected: Vec::new(),
        };

        for token in initial_query.split(',') {
            let tag = canonical_tag(token);
            if tag.is_empty() {
                continue;
            }
            state.insert(tag.clone());
            for button in &mut state.buttons {
                if button.tag == tag {
                    button.active = true;
                }
            }
        }

        state
    }

    fn insert(&mut self, tag: String) {
        if !self.selected.contains(&tag) {
            self.selected.push(tag);
        }
    }

    /// Flips one button's selection. An active button deactivates and its
    /// tag leaves the set; an inactive one activates and its tag is appended.
    pub fn toggle(&mut self, button_id: &str) -> Result<(), String> {
        let idx = self
            .buttons
            .iter()
            .position(|b| b.id == button_id)
            .ok_or_else(|| format!("Unknown tag button: {}", button_id))?;

        let tag = self.buttons[idx].tag.clone();
        if self.buttons[idx].active {
            self.buttons[idx].active = false;
            self.selected.retain(|t| t != &tag);
        } else {
            self.buttons[idx].active = true;
            self.insert(tag);
        }
        Ok(())
    }

    /// Serialized selection: members joined with `", "` in insertion order.
    /// An empty selection serializes to the empty string.
    pub fn query(&self) -> String {
        self.selected.join(", ")
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            buttons: self
                .buttons
                .iter()
                .map(|b| ButtonState {
                    id: b.id.clone(),
                    active: b.active,
                    min_width: b.min_width,
                })
                .collect(),
            query: self.query(),
        }
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected
    }
}
