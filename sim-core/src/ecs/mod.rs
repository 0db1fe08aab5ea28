//! Entity/component data store
//!
//! This module provides the simulation core's storage layer:
//! - Entity id allocation and recycling
//! - Presence bitmasks and typed component pools over a closed kind set
//! - The registry tying directory and storage together
//! - The frame context and system execution framework

mod entity;
mod error;
mod registry;
mod system;

pub mod component;
pub mod components;

pub use component::{ComponentKind, ComponentMask, Pool, IMPLIED_COMPONENTS};
pub use entity::EntityId;
pub use error::EcsError;
pub use registry::{ComponentData, Registry};
pub use system::{FrameContext, System, SystemExecutor};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = Registry::new(8);
        assert_eq!(registry.capacity(), 8);
        assert_eq!(registry.entity_count(), 0);
    }

    #[test]
    fn test_entity_becomes_visible_with_first_component() {
        let mut registry = Registry::new(8);
        let entity = registry.create_entity().unwrap();
        assert!(!registry.entity_exists(entity));

        registry
            .add_component(entity, ComponentKind::Transform)
            .unwrap();
        assert!(registry.entity_exists(entity));
        assert_eq!(registry.entity_count(), 1);
    }
}
