// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! At most one overlay per host.
//!
//! [`OverlayRegistry`] maps host identity to the host's overlay. The application creates it
//! empty at startup (with the locale-resolved defaults) and drops or [`clear`]s it at teardown.
//!
//! Entries hold the host weakly. A weak reference keeps the host's allocation, not the host,
//! so a host address cannot be reused by another host while its entry exists. Dead entries
//! are dropped by [`prune`] or replaced on the next lookup.
//!
//! The host keeps its overlay after the registry forgets it, so a lookup for a host missing
//! from the map first asks the host for the overlay it already holds.
//!
//! [`clear`]: OverlayRegistry::clear
//! [`prune`]: OverlayRegistry::prune

extern crate alloc;

use alloc::rc::{Rc, Weak};
use core::fmt;

use hashbrown::HashMap;
use log::debug;

use crate::host::MapHost;
use crate::overlay::{OverlayHandle, ScaleBarConfig};

struct Entry<H> {
    host: Weak<H>,
    overlay: OverlayHandle<H>,
}

impl<H> Entry<H> {
    fn is_alive(&self) -> bool {
        self.host.strong_count() > 0
    }
}

/// The per-host overlay mapping.
///
/// Single-threaded: hosts are shared through [`Rc`], so the registry is neither `Send` nor
/// `Sync`.
pub struct OverlayRegistry<H> {
    defaults: ScaleBarConfig,
    entries: HashMap<usize, Entry<H>>,
}

impl<H> fmt::Debug for OverlayRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayRegistry")
            .field("defaults", &self.defaults)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl<H> Default for OverlayRegistry<H> {
    fn default() -> Self {
        Self::new(ScaleBarConfig::default())
    }
}

fn host_key<H>(host: &Rc<H>) -> usize {
    Rc::as_ptr(host).cast::<()>().addr()
}

impl<H> OverlayRegistry<H> {
    /// Creates an empty registry. New overlays start from `defaults`.
    pub fn new(defaults: ScaleBarConfig) -> Self {
        Self {
            defaults,
            entries: HashMap::new(),
        }
    }

    /// Configuration given to newly created overlays.
    pub fn defaults(&self) -> &ScaleBarConfig {
        &self.defaults
    }

    /// The overlay of `host`, if one was created and the host is alive.
    pub fn get(&self, host: &Rc<H>) -> Option<OverlayHandle<H>> {
        self.entries
            .get(&host_key(host))
            .filter(|entry| entry.is_alive())
            .map(|entry| entry.overlay.clone())
    }

    /// Drops entries whose host is gone. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_alive());
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!("pruned {removed} scale overlay(s) of dropped hosts");
        }
        removed
    }

    /// Number of entries, including ones whose host died since the last [`prune`](Self::prune).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    ///
    /// Hosts that are still alive keep their overlays; a later lookup re-registers them.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<H: MapHost> OverlayRegistry<H> {
    /// Returns the overlay of `host`, creating and attaching one on first request.
    ///
    /// Repeated calls for the same host return handles to the same overlay, including after
    /// [`clear`](Self::clear): an overlay the host already holds is registered again rather
    /// than replaced. The returned handle does not own the host, and the registry never keeps
    /// the host alive.
    pub fn get_or_create(&mut self, host: &Rc<H>) -> OverlayHandle<H> {
        if let Some(existing) = self.get(host) {
            return existing;
        }

        let key = host_key(host);
        let held = host
            .overlay()
            .filter(|overlay| overlay.host().is_some_and(|h| Rc::ptr_eq(&h, host)));
        let (overlay, created) = match held {
            Some(overlay) => (overlay, false),
            None => (
                OverlayHandle::new(Rc::downgrade(host), self.defaults.clone()),
                true,
            ),
        };
        let stale = self.entries.insert(
            key,
            Entry {
                host: Rc::downgrade(host),
                overlay: overlay.clone(),
            },
        );
        if stale.is_some() {
            debug!("replaced dead scale overlay entry for host {key:#x}");
        }
        if created {
            host.attach_overlay(overlay.clone());
            debug!("attached scale overlay to host {key:#x}");
        } else {
            debug!("re-registered scale overlay held by host {key:#x}");
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::host::MercatorViewport;
    use crate::layout::{ScalePosition, Size};
    use crate::overlay::tests::TestMap;
    use crate::style::ScaleStyle;
    use crate::units::MeasurementSystem;

    fn map() -> Rc<TestMap> {
        TestMap::new(MercatorViewport::new(12.0, 40.0, Size::new(640.0, 480.0)))
    }

    #[test]
    fn second_request_returns_same_overlay() {
        let mut registry = OverlayRegistry::default();
        let host = map();

        let a = registry.get_or_create(&host);
        let b = registry.get_or_create(&host);

        assert!(a.ptr_eq(&b));
        assert_eq!(registry.len(), 1);
        assert_eq!(host.attached.borrow().len(), 1, "attached only once");

        a.set_style(ScaleStyle::AlternatingBar);
        assert_eq!(b.config().style, ScaleStyle::AlternatingBar);
    }

    #[test]
    fn hosts_get_distinct_overlays() {
        let mut registry = OverlayRegistry::default();
        let h1 = map();
        let h2 = map();

        let a = registry.get_or_create(&h1);
        let b = registry.get_or_create(&h2);
        assert!(!a.ptr_eq(&b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn new_overlays_use_injected_defaults() {
        let defaults = ScaleBarConfig::new(MeasurementSystem::from_locale("en_US.UTF-8"))
            .with_position(ScalePosition::Bottom);
        let mut registry = OverlayRegistry::new(defaults);
        let overlay = registry.get_or_create(&map());
        let config = overlay.config();
        assert_eq!(config.system, MeasurementSystem::Imperial);
        assert_eq!(config.position, ScalePosition::Bottom);
        assert_eq!(config.style, ScaleStyle::Bar);
        assert_eq!(config.max_width, 300.0);
    }

    #[test]
    fn registry_does_not_keep_host_alive() {
        let mut registry = OverlayRegistry::default();
        let host = map();
        let overlay = registry.get_or_create(&host);
        let weak = Rc::downgrade(&host);

        // The host owns its overlay; dropping the host releases both.
        drop(host);
        assert!(weak.upgrade().is_none());
        assert!(overlay.host().is_none());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.prune(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn get_only_finds_created_overlays() {
        let mut registry = OverlayRegistry::default();
        let host = map();
        assert!(registry.get(&host).is_none());

        let created = registry.get_or_create(&host);
        assert!(registry.get(&host).unwrap().ptr_eq(&created));
    }

    #[test]
    fn clear_then_request_reuses_the_held_overlay() {
        let mut registry = OverlayRegistry::default();
        let host = map();
        let before = registry.get_or_create(&host);
        before.set_style(ScaleStyle::TapeMeasure);

        registry.clear();
        let after = registry.get_or_create(&host);

        assert!(after.ptr_eq(&before));
        assert_eq!(host.attached.borrow().len(), 1, "attached only once");
        assert_eq!(after.config().style, ScaleStyle::TapeMeasure);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn overlay_of_another_host_is_not_adopted() {
        let mut registry = OverlayRegistry::default();
        let (h1, h2) = (map(), map());
        let first = registry.get_or_create(&h1);
        // A confused host reporting someone else's overlay still gets its own.
        h2.attached.borrow_mut().push(first.clone());

        let second = registry.get_or_create(&h2);
        assert!(!second.ptr_eq(&first));
        assert_eq!(h2.attached.borrow().len(), 2);
    }

    #[test]
    fn clear_empties_the_registry() {
        let mut registry = OverlayRegistry::default();
        let hosts = [map(), map(), map()];
        for h in &hosts {
            registry.get_or_create(h);
        }
        assert_eq!(registry.len(), 3);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn update_through_registry_handle() {
        let mut registry = OverlayRegistry::default();
        let host = map();
        registry.get_or_create(&host).update();

        let shown = registry.get(&host).unwrap().result().unwrap();
        assert!(shown.pixel_length > 0.0);
        assert!(shown.pixel_length <= 300.0);
        assert_eq!(host.redraws.get(), 1);
    }
}
