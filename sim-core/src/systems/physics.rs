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
//! Physics integration pass
//!
//! Semi-implicit (symplectic) Euler: velocity is updated from acceleration
//! first, then position from the *updated* velocity within the same step.
//! This is more stable than explicit Euler for frame-rate timesteps.
//!
//! Gravity participates only while the body is gravity-enabled and was not
//! grounded by the previous frame's collision pass. The grounded flag is
//! cleared unconditionally at the end of this pass; the collision pass
//! re-asserts it when a supporting contact is found, so a body that leaves
//! a surface keeps its grounded exemption for exactly one frame.

use crate::ecs::components::{Physics, Transform};
use crate::ecs::{ComponentKind, EcsError, EntityId, FrameContext, System};

/// Stateless integration pass over every entity with a Physics component
///
/// Re-running with `dt = 0` is a no-op. An entity listed as having Physics
/// but missing its Transform is a contract violation surfaced by the
/// registry; the pass does not recover from it.
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Create the integration pass
    pub fn new() -> Self {
        PhysicsSystem
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PhysicsSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
        let dt = ctx.dt;
        let registry = &mut *ctx.registry;

        let candidates: Vec<EntityId> = registry.entities_with(ComponentKind::Physics).collect();
        for entity in candidates {
            let mut body = *registry.get_component::<Physics>(entity)?;
            let mut transform = *registry.get_component::<Transform>(entity)?;

            if body.gravity_enabled && !body.grounded {
                body.velocity += (body.acceleration + body.gravity) * dt;
            } else {
                body.velocity += body.acceleration * dt;
            }
            transform.translation += body.velocity * dt;
            body.grounded = false;

            registry.set_component(entity, body)?;
            registry.set_component(entity, transform)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "PhysicsSystem"
    }
}
