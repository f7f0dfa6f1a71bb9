//! Registry of attached GUI surfaces
//!
//! Surfaces form a forest: each has an optional parent, and detaching a
//! surface detaches everything nested under it.

use std::collections::BTreeMap;

use guictx_core::SurfaceId;

#[derive(Debug, Clone)]
struct SurfaceEntry {
    parent: Option<SurfaceId>,
    title: String,
}

/// Surface bookkeeping shared by the loop implementations
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    next_id: u64,
    surfaces: BTreeMap<SurfaceId, SurfaceEntry>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, parent: Option<SurfaceId>, title: &str) -> SurfaceId {
        self.next_id += 1;
        let id = SurfaceId::new(self.next_id);
        // A parent that is already gone leaves the new surface top-level.
        let parent = parent.filter(|p| self.surfaces.contains_key(p));
        self.surfaces.insert(
            id,
            SurfaceEntry {
                parent,
                title: title.to_owned(),
            },
        );
        id
    }

    /// Remove `id` and its descendants, returning how many were removed
    pub fn detach(&mut self, id: SurfaceId) -> usize {
        if !self.surfaces.contains_key(&id) {
            return 0;
        }
        let mut doomed = vec![id];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            doomed.extend(
                self.surfaces
                    .iter()
                    .filter(|(_, entry)| entry.parent == Some(current))
                    .map(|(child, _)| *child),
            );
            cursor += 1;
        }
        for surface in &doomed {
            self.surfaces.remove(surface);
        }
        doomed.len()
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    pub fn title(&self, id: SurfaceId) -> Option<&str> {
        self.surfaces.get(&id).map(|e| e.title.as_str())
    }

    pub fn parent(&self, id: SurfaceId) -> Option<SurfaceId> {
        self.surfaces.get(&id).and_then(|e| e.parent)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
