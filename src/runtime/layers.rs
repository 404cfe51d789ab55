use std::collections::BTreeMap;

use crate::foundation::error::{ReferenceKind, SlideError, SlideResult};
use crate::project::model::Slide;

/// Runtime visibility of the current slide's layers.
///
/// Only the current slide has entries. [`LayerState::reset_for`] restores the authored
/// defaults and runs on every slide change, so runtime toggles never leak across visits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerState {
    visibility: BTreeMap<String, bool>,
}

impl LayerState {
    /// Restore every layer of `slide` to its authored visibility.
    pub fn reset_for(&mut self, slide: &Slide) {
        self.visibility = slide
            .layers
            .iter()
            .map(|l| (l.id.clone(), l.visible))
            .collect();
    }

    /// Forget all layers (no slide active).
    pub fn clear(&mut self) {
        self.visibility.clear();
    }

    /// Visibility of a layer of the current slide.
    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.visibility.get(id).copied()
    }

    /// Set one layer's visibility. Returns `true` if the value changed.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> SlideResult<bool> {
        let slot = self
            .visibility
            .get_mut(id)
            .ok_or_else(|| SlideError::dangling(ReferenceKind::Layer, id))?;
        let changed = *slot != visible;
        *slot = visible;
        Ok(changed)
    }

    /// Iterate `(layer id, visible)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.visibility.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/layers.rs"]
mod tests;
