//! Registry: entity directory and component storage
//!
//! The Registry is the central container for all simulation data. It
//! allocates and recycles entity ids, tracks per-entity presence masks, and
//! owns one typed pool per component kind. It is constructed with a fixed
//! maximum entity capacity and owns every component value for the lifetime
//! of the process (or until explicit destroy).

use crate::ecs::component::{ComponentKind, ComponentMask, Pool};
use crate::ecs::components::{Image, Model, Octree, Physics, PointLight, Transform};
use crate::ecs::entity::EntityId;
use crate::ecs::error::EcsError;
use log::debug;

/// Maps a component payload type to its kind and its pool in the registry
///
/// This is the typed face of the closed [`ComponentKind`] enumeration: each
/// payload type names its kind at compile time and resolves to exactly one
/// statically-typed pool, so generic accessors dispatch without any runtime
/// casting.
pub trait ComponentData: Sized {
    /// The kind whose presence bit and pool this payload belongs to
    const KIND: ComponentKind;

    /// Borrow this type's pool from the registry
    fn pool(registry: &Registry) -> &Pool<Self>;

    /// Mutably borrow this type's pool from the registry
    fn pool_mut(registry: &mut Registry) -> &mut Pool<Self>;
}

impl ComponentData for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn pool(registry: &Registry) -> &Pool<Self> {
        &registry.transforms
    }

    fn pool_mut(registry: &mut Registry) -> &mut Pool<Self> {
        &mut registry.transforms
    }
}

impl ComponentData for Model {
    const KIND: ComponentKind = ComponentKind::Model;

    fn pool(registry: &Registry) -> &Pool<Self> {
        &registry.models
    }

    fn pool_mut(registry: &mut Registry) -> &mut Pool<Self> {
        &mut registry.models
    }
}

impl ComponentData for Physics {
    const KIND: ComponentKind = ComponentKind::Physics;

    fn pool(registry: &Registry) -> &Pool<Self> {
        &registry.physics
    }

    fn pool_mut(registry: &mut Registry) -> &mut Pool<Self> {
        &mut registry.physics
    }
}

impl ComponentData for PointLight {
    const KIND: ComponentKind = ComponentKind::PointLight;

    fn pool(registry: &Registry) -> &Pool<Self> {
        &registry.point_lights
    }

    fn pool_mut(registry: &mut Registry) -> &mut Pool<Self> {
        &mut registry.point_lights
    }
}

impl ComponentData for Image {
    const KIND: ComponentKind = ComponentKind::Image;

    fn pool(registry: &Registry) -> &Pool<Self> {
        &registry.images
    }

    fn pool_mut(registry: &mut Registry) -> &mut Pool<Self> {
        &mut registry.images
    }
}

impl ComponentData for Octree {
    const KIND: ComponentKind = ComponentKind::Octree;

    fn pool(registry: &Registry) -> &Pool<Self> {
        &registry.octrees
    }

    fn pool_mut(registry: &mut Registry) -> &mut Pool<Self> {
        &mut registry.octrees
    }
}

/// Entity directory and component store with a fixed entity capacity
///
/// Ids are recycled lowest-first: `create_entity` returns the smallest id
/// whose presence mask is empty, and destroying an entity clears its mask
/// without compacting pool slots. Component reads and writes are checked
/// against the presence mask; violations surface as [`EcsError`] values
/// rather than undefined behavior.
///
/// # Examples
///
/// ```
/// use sim_core::ecs::{ComponentKind, Registry};
/// use sim_core::ecs::components::Physics;
///
/// let mut registry = Registry::new(16);
/// let entity = registry.create_entity()?;
/// registry.add_component(entity, ComponentKind::Physics)?;
/// registry.set_component(entity, Physics::default())?;
/// assert!(registry.has_component::<Physics>(entity));
/// # Ok::<(), sim_core::ecs::EcsError>(())
/// ```
pub struct Registry {
    max_entities: usize,
    masks: Vec<ComponentMask>,
    transforms: Pool<Transform>,
    models: Pool<Model>,
    physics: Pool<Physics>,
    point_lights: Pool<PointLight>,
    images: Pool<Image>,
    octrees: Pool<Octree>,
}

impl Registry {
    /// Create a registry with the given maximum entity capacity
    pub fn new(max_entities: usize) -> Self {
        Registry {
            max_entities,
            masks: vec![ComponentMask::empty(); max_entities],
            transforms: Pool::new(),
            models: Pool::new(),
            physics: Pool::new(),
            point_lights: Pool::new(),
            images: Pool::new(),
            octrees: Pool::new(),
        }
    }

    /// The configured maximum entity capacity
    pub fn capacity(&self) -> usize {
        self.max_entities
    }

    /// Number of entities currently holding at least one component
    pub fn entity_count(&self) -> usize {
        self.masks.iter().filter(|mask| mask.any()).count()
    }

    /// Allocate the lowest id whose presence mask is empty
    ///
    /// The returned id only becomes visible to `entity_exists` and
    /// iteration once a component is attached; until then a second
    /// `create_entity` call will hand out the same id again.
    ///
    /// # Errors
    ///
    /// [`EcsError::CapacityExceeded`] when every id in `[0, capacity)` has
    /// a non-empty mask. Allocation never wraps or aliases.
    pub fn create_entity(&mut self) -> Result<EntityId, EcsError> {
        for (id, mask) in self.masks.iter().enumerate() {
            if !mask.any() {
                return Ok(EntityId::new(id as u32));
            }
        }
        Err(EcsError::CapacityExceeded {
            capacity: self.max_entities,
        })
    }

    /// Destroy an entity by clearing its presence mask
    ///
    /// Pool slots keep their values but become logically invisible; they
    /// are reset, not reused, when the id's next tenant attaches
    /// components. Idempotent on non-existent and out-of-range ids.
    pub fn destroy_entity(&mut self, entity: EntityId) {
        if let Some(mask) = self.masks.get_mut(entity.index()) {
            mask.clear_all();
        }
    }

    /// Check whether an id is in range and holds at least one component
    pub fn entity_exists(&self, entity: EntityId) -> bool {
        self.masks
            .get(entity.index())
            .map(|mask| mask.any())
            .unwrap_or(false)
    }

    fn check_bounds(&self, entity: EntityId) -> Result<(), EcsError> {
        if entity.index() < self.max_entities {
            Ok(())
        } else {
            Err(EcsError::InvalidEntity {
                entity,
                capacity: self.max_entities,
            })
        }
    }

    /// Set a presence bit and write the kind's default value
    ///
    /// Used for dependency attachment, where the component must be usable
    /// immediately without a separate `set_component` call.
    fn attach_default(&mut self, entity: EntityId, kind: ComponentKind) {
        self.masks[entity.index()].set(kind);
        match kind {
            ComponentKind::Transform => self.transforms.write(entity, Transform::default()),
            ComponentKind::Model => self.models.write(entity, Model::default()),
            ComponentKind::Physics => self.physics.write(entity, Physics::default()),
            ComponentKind::PointLight => self.point_lights.write(entity, PointLight::default()),
            ComponentKind::Image => self.images.write(entity, Image::default()),
            ComponentKind::Octree => self.octrees.write(entity, Octree::default()),
        }
    }

    /// Grow the kind's pool so `entity` has a slot, resetting it to empty
    fn reset_pool_slot(&mut self, entity: EntityId, kind: ComponentKind) {
        match kind {
            ComponentKind::Transform => self.transforms.reset_slot(entity),
            ComponentKind::Model => self.models.reset_slot(entity),
            ComponentKind::Physics => self.physics.reset_slot(entity),
            ComponentKind::PointLight => self.point_lights.reset_slot(entity),
            ComponentKind::Image => self.images.reset_slot(entity),
            ComponentKind::Octree => self.octrees.reset_slot(entity),
        }
    }

    fn clear_pool_slot(&mut self, entity: EntityId, kind: ComponentKind) {
        match kind {
            ComponentKind::Transform => self.transforms.clear_slot(entity),
            ComponentKind::Model => self.models.clear_slot(entity),
            ComponentKind::Physics => self.physics.clear_slot(entity),
            ComponentKind::PointLight => self.point_lights.clear_slot(entity),
            ComponentKind::Image => self.images.clear_slot(entity),
            ComponentKind::Octree => self.octrees.clear_slot(entity),
        }
    }

    /// Attach a component kind to an entity
    ///
    /// Dependencies from the implied-component table are attached first
    /// with default values: a Model brings a placeholder Image, Physics
    /// brings an identity Transform. The requested kind itself gets its
    /// presence bit and an empty pool slot; its value is written separately
    /// via `set_component`. Re-adding an already-present kind resets its
    /// slot, discarding any previously written value.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] for ids at or beyond capacity.
    pub fn add_component(&mut self, entity: EntityId, kind: ComponentKind) -> Result<(), EcsError> {
        self.check_bounds(entity)?;
        if let Some(dependency) = kind.implied() {
            if !self.has(entity, dependency) {
                debug!("attaching implied {dependency:?} to {entity}");
                self.attach_default(entity, dependency);
            }
        }
        self.masks[entity.index()].set(kind);
        self.reset_pool_slot(entity, kind);
        Ok(())
    }

    /// Attach several component kinds in order
    ///
    /// Equivalent to calling `add_component` for each kind; the dependency
    /// rule applies per kind.
    pub fn add_components(
        &mut self,
        entity: EntityId,
        kinds: &[ComponentKind],
    ) -> Result<(), EcsError> {
        for kind in kinds {
            self.add_component(entity, *kind)?;
        }
        Ok(())
    }

    /// Detach a single component kind, clearing its bit and its value
    ///
    /// No-op when the bit is not set.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] for ids at or beyond capacity.
    pub fn remove_component(
        &mut self,
        entity: EntityId,
        kind: ComponentKind,
    ) -> Result<(), EcsError> {
        self.check_bounds(entity)?;
        if self.masks[entity.index()].contains(kind) {
            self.masks[entity.index()].clear(kind);
            self.clear_pool_slot(entity, kind);
        }
        Ok(())
    }

    /// Overwrite the stored value for a component the entity already carries
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] for out-of-range ids;
    /// [`EcsError::MissingComponent`] when the presence bit is not set.
    /// The write is rejected loudly, never silently dropped.
    pub fn set_component<T: ComponentData>(
        &mut self,
        entity: EntityId,
        value: T,
    ) -> Result<(), EcsError> {
        self.check_bounds(entity)?;
        if !self.masks[entity.index()].contains(T::KIND) {
            return Err(EcsError::MissingComponent {
                entity,
                kind: T::KIND,
            });
        }
        T::pool_mut(self).write(entity, value);
        Ok(())
    }

    /// Read the stored value for a component
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] for out-of-range ids;
    /// [`EcsError::MissingComponent`] when the presence bit is unset or no
    /// value has been written since the bit was set.
    pub fn get_component<T: ComponentData>(&self, entity: EntityId) -> Result<&T, EcsError> {
        self.check_bounds(entity)?;
        if !self.masks[entity.index()].contains(T::KIND) {
            return Err(EcsError::MissingComponent {
                entity,
                kind: T::KIND,
            });
        }
        T::pool(self).get(entity).ok_or(EcsError::MissingComponent {
            entity,
            kind: T::KIND,
        })
    }

    /// Mutably read the stored value for a component
    ///
    /// # Errors
    ///
    /// Same contract as [`get_component`](Registry::get_component).
    pub fn get_component_mut<T: ComponentData>(
        &mut self,
        entity: EntityId,
    ) -> Result<&mut T, EcsError> {
        self.check_bounds(entity)?;
        if !self.masks[entity.index()].contains(T::KIND) {
            return Err(EcsError::MissingComponent {
                entity,
                kind: T::KIND,
            });
        }
        T::pool_mut(self)
            .get_mut(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                kind: T::KIND,
            })
    }

    /// Check presence of a payload type's kind on an entity
    pub fn has_component<T: ComponentData>(&self, entity: EntityId) -> bool {
        self.has(entity, T::KIND)
    }

    /// Check presence of a kind on an entity
    pub fn has(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.masks
            .get(entity.index())
            .map(|mask| mask.contains(kind))
            .unwrap_or(false)
    }

    /// Iterate, in ascending id order, every entity carrying `kind`
    ///
    /// The scan covers the full capacity range, so a live high id is never
    /// skipped because lower ids were destroyed. Lazy: the mask is
    /// consulted as the iterator advances.
    pub fn entities_with(&self, kind: ComponentKind) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.max_entities as u32)
            .map(EntityId::new)
            .filter(move |entity| self.masks[entity.index()].contains(kind))
    }
}
