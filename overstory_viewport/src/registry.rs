// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of scrollable containers, keyed by a caller-chosen handle.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;

/// Tracks which containers are scrollable and where they currently are.
///
/// The registry is host-agnostic: the key type `K` is any small, copy-cheap
/// handle (a node id, a widget handle, an interned name). Ancestry is not
/// modelled here; per query, the host supplies the root→origin key path and
/// [`ScrollableRegistry::ancestor_rects`] filters the registered containers
/// down to the ones on that path. The resulting rects feed the clipping
/// predicates in [`crate::scrolling_visibility`] — they play no part in fit
/// selection.
///
/// Registering an already-registered key replaces its rect.
#[derive(Clone, Debug, Default)]
pub struct ScrollableRegistry<K> {
    containers: HashMap<K, Rect>,
}

impl<K: Eq + Hash + Clone> ScrollableRegistry<K> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            containers: HashMap::new(),
        }
    }

    /// Register `key` as a scrollable container at `rect`, replacing any
    /// previous registration.
    pub fn register(&mut self, key: K, rect: Rect) {
        let _ = self.containers.insert(key, rect);
    }

    /// Update the rect of a registered container. Returns `false` if the key
    /// was never registered.
    pub fn update_rect(&mut self, key: &K, rect: Rect) -> bool {
        match self.containers.get_mut(key) {
            Some(entry) => {
                *entry = rect;
                true
            }
            None => false,
        }
    }

    /// Remove a container. Returns `false` if the key was not registered.
    pub fn deregister(&mut self, key: &K) -> bool {
        self.containers.remove(key).is_some()
    }

    /// Whether `key` is currently registered.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.containers.contains_key(key)
    }

    /// The current rect of a registered container.
    #[must_use]
    pub fn rect_of(&self, key: &K) -> Option<Rect> {
        self.containers.get(key).copied()
    }

    /// Number of registered containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// The rects of registered containers lying on the given root→origin key
    /// path, in path order.
    ///
    /// Keys on the path that are not registered (not scrollable) are skipped.
    #[must_use]
    pub fn ancestor_rects(&self, path: &[K]) -> Vec<Rect> {
        path.iter()
            .filter_map(|key| self.containers.get(key).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn register_update_deregister() {
        let mut registry: ScrollableRegistry<u32> = ScrollableRegistry::new();
        assert!(registry.is_empty());

        registry.register(1, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(registry.contains(&1));
        assert_eq!(registry.len(), 1);

        assert!(registry.update_rect(&1, Rect::new(0.0, 50.0, 100.0, 150.0)));
        assert_eq!(registry.rect_of(&1), Some(Rect::new(0.0, 50.0, 100.0, 150.0)));
        assert!(!registry.update_rect(&2, Rect::ZERO));

        assert!(registry.deregister(&1));
        assert!(!registry.deregister(&1));
        assert!(registry.is_empty());
    }

    #[test]
    fn re_registering_replaces_the_rect() {
        let mut registry: ScrollableRegistry<u32> = ScrollableRegistry::new();
        registry.register(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        registry.register(1, Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rect_of(&1), Some(Rect::new(5.0, 5.0, 15.0, 15.0)));
    }

    #[test]
    fn ancestor_rects_follow_path_order_and_skip_unregistered_keys() {
        let mut registry: ScrollableRegistry<&str> = ScrollableRegistry::new();
        let body = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let panel = Rect::new(100.0, 100.0, 500.0, 500.0);
        registry.register("body", body);
        registry.register("panel", panel);
        registry.register("sidebar", Rect::new(600.0, 0.0, 800.0, 1000.0));

        // "section" is on the path but is not scrollable; "sidebar" is
        // scrollable but not an ancestor.
        let rects = registry.ancestor_rects(&["body", "section", "panel"]);
        assert_eq!(rects, vec![body, panel]);
    }

    #[test]
    fn empty_path_yields_no_ancestors() {
        let mut registry: ScrollableRegistry<u32> = ScrollableRegistry::new();
        registry.register(1, Rect::ZERO);
        assert!(registry.ancestor_rects(&[]).is_empty());
    }
}
