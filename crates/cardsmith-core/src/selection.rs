//! Selection model: selected zones plus an optional alignment anchor.

use crate::zone::ZoneId;
use serde::{Deserialize, Serialize};

/// Fixed reference frame for alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyElement {
    /// Align to the printable (trim) boundary.
    Canvas,
    /// Align to a designated zone, which itself never moves.
    Zone(ZoneId),
}

/// Currently selected zone ids, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ZoneId>,
    key: Option<KeyElement>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ZoneId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: ZoneId) -> bool {
        self.ids.contains(&id)
    }

    pub fn key(&self) -> Option<KeyElement> {
        self.key
    }

    /// The key element's zone id, if the key is a zone.
    pub fn key_zone(&self) -> Option<ZoneId> {
        match self.key {
            Some(KeyElement::Zone(id)) => Some(id),
            _ => None,
        }
    }

    /// Replace the selection with a single zone.
    pub fn select_only(&mut self, id: ZoneId) {
        self.ids.clear();
        self.ids.push(id);
        if self.key_zone().is_some_and(|k| k != id) {
            self.key = None;
        }
    }

    /// Replace the selection with `ids` (order kept, duplicates dropped).
    pub fn set(&mut self, ids: impl IntoIterator<Item = ZoneId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        if let Some(k) = self.key_zone() {
            if !self.ids.contains(&k) {
                self.key = None;
            }
        }
    }

    /// Add or remove a zone from a multi-selection.
    pub fn toggle(&mut self, id: ZoneId) {
        if let Some(pos) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(pos);
            if self.key_zone() == Some(id) {
                self.key = None;
            }
        } else {
            self.ids.push(id);
        }
    }

    /// Set or clear the key element.
    pub fn set_key(&mut self, key: Option<KeyElement>) {
        self.key = key;
    }

    /// Toggle `key` as the key element.
    pub fn toggle_key(&mut self, key: KeyElement) {
        self.key = if self.key == Some(key) { None } else { Some(key) };
    }

    /// Interpret a click on a zone.
    ///
    /// Shift toggles membership. A plain click on a member of a
    /// multi-selection toggles it as the key element. Any other click
    /// selects only that zone.
    pub fn click(&mut self, id: ZoneId, shift: bool) {
        if shift {
            self.toggle(id);
        } else if self.ids.len() > 1 && self.contains(id) {
            self.toggle_key(KeyElement::Zone(id));
        } else {
            self.select_only(id);
        }
    }

    /// Drop removed zones; clears the key element if it was removed.
    pub fn forget(&mut self, removed: &[ZoneId]) {
        self.ids.retain(|id| !removed.contains(id));
        if self.key_zone().is_some_and(|k| removed.contains(&k)) {
            self.key = None;
        }
    }

    /// Clear ids and key element.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_shift_click_toggles() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut sel = Selection::new();
        sel.click(a, false);
        sel.click(b, true);
        assert_eq!(sel.ids(), &[a, b]);
        sel.click(a, true);
        assert_eq!(sel.ids(), &[b]);
    }

    #[test]
    fn test_plain_click_in_multi_selection_sets_key() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut sel = Selection::new();
        sel.set([a, b]);
        sel.click(b, false);
        assert_eq!(sel.key(), Some(KeyElement::Zone(b)));
        assert_eq!(sel.len(), 2);

        sel.click(b, false);
        assert_eq!(sel.key(), None);
    }

    #[test]
    fn test_forget_clears_key() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut sel = Selection::new();
        sel.set([a, b]);
        sel.set_key(Some(KeyElement::Zone(a)));
        sel.forget(&[a]);
        assert_eq!(sel.ids(), &[b]);
        assert_eq!(sel.key(), None);
    }

    #[test]
    fn test_canvas_key_survives_forget() {
        let a = Uuid::new_v4();
        let mut sel = Selection::new();
        sel.select_only(a);
        sel.toggle_key(KeyElement::Canvas);
        sel.forget(&[a]);
        assert!(sel.is_empty());
        assert_eq!(sel.key(), Some(KeyElement::Canvas));
    }
}
