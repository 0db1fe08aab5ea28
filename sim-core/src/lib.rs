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
//! # Simulation Core
//!
//! The entity/component data store and per-frame simulation passes of a
//! real-time interactive engine: typed component storage over a recycled
//! entity-id space, semi-implicit Euler physics integration, and
//! impulse-based collision resolution.
//!
//! ## Features
//!
//! - **Registry**: fixed-capacity entity directory with presence bitmasks
//!   and one dense, statically-typed pool per component kind
//! - **Dependency-aware attachment**: a Model brings a placeholder Image,
//!   Physics brings a default Transform
//! - **Physics pass**: symplectic Euler with per-body gravity and a
//!   transient grounded exemption
//! - **Collision pass**: brute-force AABB pairing, minimum-translation
//!   separation, impulse response with immovable-body handling
//!
//! ## Example
//!
//! ```rust
//! use sim_core::ecs::{ComponentKind, FrameContext, Registry, System, SystemExecutor};
//! use sim_core::ecs::components::Physics;
//! use sim_core::systems::{CollisionSystem, PhysicsSystem};
//!
//! let mut registry = Registry::new(64);
//! let entity = registry.create_entity()?;
//! registry.add_component(entity, ComponentKind::Physics)?;
//! registry.set_component(entity, Physics::default())?;
//!
//! // Integration must run before resolution: registration order is the
//! // execution order.
//! let mut executor = SystemExecutor::new();
//! executor.add_system(PhysicsSystem::new());
//! executor.add_system(CollisionSystem::new());
//!
//! let mut ctx = FrameContext::new(0, 1.0 / 60.0, &mut registry);
//! executor.run(&mut ctx)?;
//! # Ok::<(), sim_core::ecs::EcsError>(())
//! ```

#![warn(missing_docs)]

/// Entity/component data store
pub mod ecs;

/// Per-frame simulation passes
pub mod systems;

pub use ecs::{EntityId, Registry};
