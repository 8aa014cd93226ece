//! Scene registry: an owned, z-ordered list of drawables.
//!
//! Iteration order is always ascending `z_index`, ties in insertion order.
//! The list is stably re-sorted after every mutation, so hit-testing walks
//! it backwards (topmost first) without any further bookkeeping.
//!
//! Mutations report whether anything changed and notify subscribed
//! observers synchronously, in subscription order.

use crate::id::DrawableId;
use crate::model::Drawable;
use kurbo::{Point, Rect};
use std::fmt;

/// Change notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// The item list gained, lost, or reordered members.
    ItemsChanged,
    /// Anything that requires a repaint.
    SceneChanged,
}

/// Token returned by [`SceneRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

type Observer = Box<dyn FnMut(SceneEvent)>;

#[derive(Default)]
pub struct SceneRegistry {
    items: Vec<Drawable>,
    observers: Vec<(ObserverHandle, Observer)>,
    next_handle: u64,
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRegistry")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Append an item and restore z-order. Returns the item's identity.
    ///
    /// Ids are unique within a registry: an item whose id is already taken
    /// is re-minted as `<id>_<n>`, and the new id is returned.
    pub fn add(&mut self, mut item: Drawable) -> DrawableId {
        if self.get(item.id).is_some() {
            let fresh = DrawableId::with_prefix(item.id.as_str());
            log::warn!("scene: id {} already taken, re-minted as {fresh}", item.id);
            item.id = fresh;
        }
        let id = item.id;
        log::debug!("scene: add {id} (z={})", item.z_index);
        self.items.push(item);
        self.sort();
        self.notify_changed();
        id
    }

    /// Remove the item with `id`. Absent IDs are a silent no-op.
    pub fn remove(&mut self, id: DrawableId) -> Option<Drawable> {
        let pos = self.items.iter().position(|d| d.id == id)?;
        let removed = self.items.remove(pos);
        log::debug!("scene: remove {id}");
        self.notify_changed();
        Some(removed)
    }

    /// Drop every item. Always notifies. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        log::debug!("scene: clear ({n} items)");
        self.notify_changed();
        n
    }

    /// Mutate one item in place, then restore z-order and notify.
    /// Returns `false` if no item has `id`. The item keeps its id.
    pub fn update(&mut self, id: DrawableId, f: impl FnOnce(&mut Drawable)) -> bool {
        let Some(item) = self.items.iter_mut().find(|d| d.id == id) else {
            return false;
        };
        f(item);
        item.id = id;
        self.sort();
        self.notify_changed();
        true
    }

    fn sort(&mut self) {
        // `sort_by_key` is stable: equal z keeps insertion order.
        self.items.sort_by_key(|d| d.z_index);
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Items in render order (ascending z-index).
    pub fn items_in_z_order(&self) -> &[Drawable] {
        &self.items
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.items.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The highest visible, unlocked item containing `p`.
    pub fn topmost_at(&self, p: Point) -> Option<&Drawable> {
        self.items
            .iter()
            .rev()
            .filter(|d| d.is_interactive())
            .find(|d| d.contains_point(p))
    }

    /// Visible, unlocked items whose anchor position lies inside `region`.
    ///
    /// Only the anchor is tested, not the full bounds; see
    /// [`SceneRegistry::items_overlapping`] for true bounds intersection.
    /// `region` is normalized first, so negative extents are accepted.
    pub fn items_intersecting(&self, region: Rect) -> Vec<&Drawable> {
        let r = region.abs();
        self.items
            .iter()
            .filter(|d| d.is_interactive())
            .filter(|d| r.x0 <= d.x && d.x <= r.x1 && r.y0 <= d.y && d.y <= r.y1)
            .collect()
    }

    /// Visible, unlocked items whose bounding box touches `region`.
    pub fn items_overlapping(&self, region: Rect) -> Vec<&Drawable> {
        let r = region.abs();
        self.items
            .iter()
            .filter(|d| d.is_interactive())
            .filter(|d| {
                let b = d.bounding_box();
                b.x0 <= r.x1 && r.x0 <= b.x1 && b.y0 <= r.y1 && r.y0 <= b.y1
            })
            .collect()
    }

    // ─── Observers ───────────────────────────────────────────────────────

    pub fn subscribe(&mut self, observer: impl FnMut(SceneEvent) + 'static) -> ObserverHandle {
        let handle = ObserverHandle(self.next_handle);
        self.next_handle += 1;
        self.observers.push((handle, Box::new(observer)));
        handle
    }

    /// Returns `false` if the handle was already gone.
    pub fn unsubscribe(&mut self, handle: ObserverHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(h, _)| *h != handle);
        self.observers.len() != before
    }

    fn notify_changed(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(SceneEvent::ItemsChanged);
            observer(SceneEvent::SceneChanged);
        }
    }
}
