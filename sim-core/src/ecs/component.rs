// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Component kinds, presence masks, and typed pools
//!
//! The component vocabulary is a closed enumeration known at compile time.
//! Each kind owns exactly one pool, a dense array indexed by entity id, and
//! each entity carries a fixed-width presence bitmask that is the single
//! source of truth for which kinds are attached. Dispatch is static over
//! the enumeration; there is no runtime type erasure.

use crate::ecs::entity::EntityId;

/// The closed set of component kinds
///
/// The discriminant doubles as the presence-mask bit index and the pool
/// index, so the order here is part of the storage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Spatial placement: translation, scale, Euler rotation
    Transform,
    /// Renderable geometry reference plus cached local-space bounds
    Model,
    /// Rigid-body state consumed by the physics and collision passes
    Physics,
    /// Point light emission parameters
    PointLight,
    /// Texture binding; defaults to the no-texture placeholder
    Image,
    /// Sparse voxel octree parameters
    Octree,
}

/// Component kinds that are implicitly attached alongside another kind.
///
/// Every renderable is expected to carry texture information, and physics
/// requires a position to integrate, so `add_component` consults this table
/// and attaches the dependency (with a default value) before setting the
/// requested bit.
pub const IMPLIED_COMPONENTS: [(ComponentKind, ComponentKind); 2] = [
    (ComponentKind::Model, ComponentKind::Image),
    (ComponentKind::Physics, ComponentKind::Transform),
];

impl ComponentKind {
    /// Number of component kinds
    pub const COUNT: usize = 6;

    /// All kinds in bit-index order
    pub const ALL: [ComponentKind; Self::COUNT] = [
        ComponentKind::Transform,
        ComponentKind::Model,
        ComponentKind::Physics,
        ComponentKind::PointLight,
        ComponentKind::Image,
        ComponentKind::Octree,
    ];

    /// Stable bit/pool index for this kind
    pub fn index(self) -> usize {
        self as usize
    }

    /// The kind implicitly attached alongside this one, if any
    pub fn implied(self) -> Option<ComponentKind> {
        IMPLIED_COMPONENTS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, dependency)| *dependency)
    }
}

/// Per-entity presence bitmask, one bit per component kind
///
/// An entity is alive exactly while its mask is non-empty; clearing the
/// whole mask is how an entity is destroyed and its id freed for reuse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentMask(u32);

impl ComponentMask {
    /// Create an empty mask
    pub fn empty() -> Self {
        ComponentMask(0)
    }

    /// Check whether the bit for `kind` is set
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    /// Set the bit for `kind`
    pub fn set(&mut self, kind: ComponentKind) {
        self.0 |= 1 << kind.index();
    }

    /// Clear the bit for `kind`
    pub fn clear(&mut self, kind: ComponentKind) {
        self.0 &= !(1 << kind.index());
    }

    /// Clear every bit
    pub fn clear_all(&mut self) {
        self.0 = 0;
    }

    /// Check whether any bit is set
    pub fn any(&self) -> bool {
        self.0 != 0
    }
}

/// Dense value storage for one component kind, indexed by entity id
///
/// A slot holds `Some` only after a value has been written for that entity;
/// the presence bit can be set while the slot is still `None` (attached but
/// not yet populated), which is exactly the state `add_component` leaves an
/// entity in. The pool grows on demand to at least `id + 1` slots and is
/// never compacted.
#[derive(Debug)]
pub struct Pool<T> {
    slots: Vec<Option<T>>,
}

impl<T> Pool<T> {
    /// Create an empty pool
    pub fn new() -> Self {
        Pool { slots: Vec::new() }
    }

    /// Number of slots currently allocated
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether no slots are allocated
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Grow the pool so `entity` has a slot, and reset that slot to empty
    ///
    /// Used by component attachment: the slot exists afterwards but holds
    /// no value, so a stale value from a previous tenant of the id can
    /// never leak through a fresh attachment.
    pub fn reset_slot(&mut self, entity: EntityId) {
        let index = entity.index();
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = None;
    }

    /// Write a value for `entity`, growing the pool if needed
    pub fn write(&mut self, entity: EntityId, value: T) {
        let index = entity.index();
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(value);
    }

    /// Get the value for `entity`, if one has been written
    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.slots.get(entity.index()).and_then(|slot| slot.as_ref())
    }

    /// Get the value for `entity` mutably, if one has been written
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.slots
            .get_mut(entity.index())
            .and_then(|slot| slot.as_mut())
    }

    /// Drop the value for `entity`, leaving the slot allocated
    pub fn clear_slot(&mut self, entity: EntityId) {
        if let Some(slot) = self.slots.get_mut(entity.index()) {
            *slot = None;
        }
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices_are_stable() {
        for (expected, kind) in ComponentKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), expected);
        }
        assert_eq!(ComponentKind::ALL.len(), ComponentKind::COUNT);
    }

    #[test]
    fn test_dependency_table() {
        assert_eq!(ComponentKind::Model.implied(), Some(ComponentKind::Image));
        assert_eq!(
            ComponentKind::Physics.implied(),
            Some(ComponentKind::Transform)
        );
        assert_eq!(ComponentKind::Transform.implied(), None);
        assert_eq!(ComponentKind::Image.implied(), None);
        assert_eq!(ComponentKind::PointLight.implied(), None);
        assert_eq!(ComponentKind::Octree.implied(), None);
    }

    #[test]
    fn test_mask_set_clear() {
        let mut mask = ComponentMask::empty();
        assert!(!mask.any());

        mask.set(ComponentKind::Physics);
        assert!(mask.contains(ComponentKind::Physics));
        assert!(!mask.contains(ComponentKind::Transform));
        assert!(mask.any());

        mask.set(ComponentKind::Transform);
        mask.clear(ComponentKind::Physics);
        assert!(!mask.contains(ComponentKind::Physics));
        assert!(mask.contains(ComponentKind::Transform));

        mask.clear_all();
        assert!(!mask.any());
    }

    #[test]
    fn test_pool_write_and_get() {
        let mut pool = Pool::<i32>::new();
        let entity = EntityId::new(3);

        assert!(pool.get(entity).is_none());
        pool.write(entity, 17);
        assert_eq!(pool.len(), 4); // grown to id + 1
        assert_eq!(pool.get(entity), Some(&17));

        *pool.get_mut(entity).unwrap() = 18;
        assert_eq!(pool.get(entity), Some(&18));
    }

    #[test]
    fn test_pool_reset_slot_discards_value() {
        let mut pool = Pool::<i32>::new();
        let entity = EntityId::new(0);

        pool.write(entity, 5);
        pool.reset_slot(entity);
        assert!(pool.get(entity).is_none());
        assert_eq!(pool.len(), 1); // slot stays allocated
    }

    #[test]
    fn test_pool_clear_slot_is_not_compaction() {
        let mut pool = Pool::<i32>::new();
        pool.write(EntityId::new(0), 1);
        pool.write(EntityId::new(5), 2);

        pool.clear_slot(EntityId::new(0));
        assert!(pool.get(EntityId::new(0)).is_none());
        assert_eq!(pool.get(EntityId::new(5)), Some(&2));
        assert_eq!(pool.len(), 6);
    }

    #[test]
    fn test_pool_get_out_of_range() {
        let pool = Pool::<i32>::new();
        assert!(pool.get(EntityId::new(100)).is_none());
    }
}
