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
//! Collision detection and resolution pass
//!
//! Broad phase is brute force: every unordered pair drawn from the entities
//! carrying both Physics and Model is tested, O(n²) with no spatial
//! partitioning. Pairs are visited in ascending id order, which makes the
//! resolution order (and therefore multi-body outcomes) deterministic.
//!
//! Bounding boxes are axis-aligned in world space: the model's cached local
//! box scaled by the transform's scale and translated by its translation.
//! Rotation is ignored for bounding purposes; that is a known approximation
//! of this engine, not an oversight.
//!
//! Overlapping pairs are separated along the minimum-translation vector and
//! receive an impulse response. A body resting on an immovable partner with
//! near-zero vertical velocity is grounded instead: its vertical velocity is
//! zeroed and the pair skips impulse and separation entirely.

use crate::ecs::components::{BoundingBox, Model, Physics, Transform};
use crate::ecs::{ComponentKind, EcsError, EntityId, FrameContext, Registry, System};
use glam::Vec3;

/// Effective mass substituted for immovable bodies so two-body impulse math
/// stays finite (not true infinity)
const IMMOVABLE_MASS: f32 = 999_999.0;

/// Vertical-velocity window (inclusive, both signs) within which contact
/// with an immovable body counts as resting
const GROUNDING_WINDOW: f32 = 0.2;

/// Brute-force pairwise collision resolver
///
/// Must run after the physics integration pass within the same frame; it
/// reads post-integration transforms and corrects both transforms and
/// velocities. Assumes every candidate already carries Model, Physics, and
/// Transform; a gap is a contract violation surfaced by the registry, not
/// caught here.
pub struct CollisionSystem;

impl CollisionSystem {
    /// Create the collision pass
    pub fn new() -> Self {
        CollisionSystem
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// World-space box for an entity: local bounds scaled, then translated
fn world_box(registry: &Registry, entity: EntityId) -> Result<BoundingBox, EcsError> {
    let model = registry.get_component::<Model>(entity)?;
    let transform = registry.get_component::<Transform>(entity)?;
    Ok(model
        .bounds()
        .scaled(transform.scale)
        .translated(transform.translation))
}

/// Minimum-translation vector separating two overlapping world boxes
///
/// Per axis, the overlap depth is `min(maxA - minB, maxB - minA)`; the
/// vertical depth's sign is flipped relative to the other two axes because
/// the engine's Y axis points down. The axis with the smallest magnitude
/// wins and the other two components are zero.
fn minimum_translation(box_a: &BoundingBox, box_b: &BoundingBox) -> Vec3 {
    let x_overlap = (box_a.max.x - box_b.min.x).min(box_b.max.x - box_a.min.x);
    let y_overlap = -((box_a.max.y - box_b.min.y).min(box_b.max.y - box_a.min.y));
    let z_overlap = (box_a.max.z - box_b.min.z).min(box_b.max.z - box_a.min.z);

    if x_overlap.abs() < y_overlap.abs() && x_overlap.abs() < z_overlap.abs() {
        Vec3::new(x_overlap, 0.0, 0.0)
    } else if y_overlap.abs() < z_overlap.abs() {
        Vec3::new(0.0, y_overlap, 0.0)
    } else {
        Vec3::new(0.0, 0.0, z_overlap)
    }
}

/// Resolve one overlapping pair: grounding, then impulse and separation
fn resolve(registry: &mut Registry, a: EntityId, b: EntityId) -> Result<(), EcsError> {
    let mut body_a = *registry.get_component::<Physics>(a)?;
    let mut body_b = *registry.get_component::<Physics>(b)?;
    let mut transform_a = *registry.get_component::<Transform>(a)?;
    let mut transform_b = *registry.get_component::<Transform>(b)?;

    // Grounded is decided per side, against the partner's movability,
    // before any impulse math sees the velocities.
    if body_a.velocity.y.abs() <= GROUNDING_WINDOW && !body_b.movable {
        body_a.grounded = true;
        body_a.velocity.y = 0.0;
    } else {
        body_a.grounded = false;
    }
    if body_b.velocity.y.abs() <= GROUNDING_WINDOW && !body_a.movable {
        body_b.grounded = true;
        body_b.velocity.y = 0.0;
    } else {
        body_b.grounded = false;
    }

    let mut mass_a = body_a.mass();
    if !body_a.movable {
        if body_b.grounded {
            // Resting contact: skip impulse and separation for this pair
            registry.set_component(b, body_b)?;
            return Ok(());
        }
        mass_a = IMMOVABLE_MASS;
    }
    let mut mass_b = body_b.mass();
    if !body_b.movable {
        if body_a.grounded {
            registry.set_component(a, body_a)?;
            return Ok(());
        }
        mass_b = IMMOVABLE_MASS;
    }

    let v_rel = body_b.velocity - body_a.velocity;
    let avg_restitution = 0.5 * (body_a.restitution() + body_b.restitution());
    let impulse = (1.0 + avg_restitution) * (mass_a * mass_b / (mass_a + mass_b)) * v_rel;

    let box_a = world_box(registry, a)?;
    let box_b = world_box(registry, b)?;
    let mtv = minimum_translation(&box_a, &box_b);

    body_a.velocity += impulse / mass_a;
    body_b.velocity -= impulse / mass_b;
    if body_a.movable && body_b.movable {
        transform_a.translation += 0.5 * mtv;
        transform_b.translation -= 0.5 * mtv;
    } else if body_a.movable {
        transform_a.translation += mtv;
    } else if body_b.movable {
        transform_b.translation -= mtv;
    }

    registry.set_component(a, body_a)?;
    registry.set_component(a, transform_a)?;
    registry.set_component(b, body_b)?;
    registry.set_component(b, transform_b)?;
    Ok(())
}

impl System for CollisionSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
        let registry = &mut *ctx.registry;

        let candidates: Vec<EntityId> = registry.entities_with(ComponentKind::Physics).collect();
        for i in 0..candidates.len() {
            let a = candidates[i];
            if !registry.has(a, ComponentKind::Model) {
                continue;
            }
            for &b in &candidates[i..] {
                if a == b || !registry.has(b, ComponentKind::Model) {
                    continue;
                }
                // Boxes are recomputed per pair so corrections applied by
                // earlier pairs are visible to later ones.
                let box_a = world_box(registry, a)?;
                let box_b = world_box(registry, b)?;
                if box_a.intersects(&box_b) {
                    resolve(registry, a, b)?;
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "CollisionSystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn spawn_box(
        registry: &mut Registry,
        translation: Vec3,
        half_extent: f32,
        body: Physics,
    ) -> EntityId {
        let entity = registry.create_entity().unwrap();
        registry
            .add_components(entity, &[ComponentKind::Physics, ComponentKind::Model])
            .unwrap();
        registry.set_component(entity, body).unwrap();
        registry
            .set_component(
                entity,
                Model::new(
                    Default::default(),
                    BoundingBox::new(Vec3::splat(-half_extent), Vec3::splat(half_extent)),
                ),
            )
            .unwrap();
        registry
            .set_component(entity, Transform::from_translation(translation))
            .unwrap();
        entity
    }

    fn run_pass(registry: &mut Registry) {
        let mut ctx = FrameContext::new(0, 1.0 / 60.0, registry);
        CollisionSystem::new().update(&mut ctx).unwrap();
    }

    #[test]
    fn test_mtv_picks_smallest_axis() {
        // Deep overlap on y and z, shallow on x
        let a = BoundingBox::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 4.0));
        let b = BoundingBox::new(Vec3::new(1.5, 0.0, 0.0), Vec3::new(3.5, 4.0, 4.0));
        let mtv = minimum_translation(&a, &b);
        assert_eq!(mtv, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_mtv_vertical_axis_sign_is_flipped() {
        let a = BoundingBox::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 4.0));
        let b = BoundingBox::new(Vec3::new(0.0, 1.5, 0.0), Vec3::new(4.0, 3.5, 4.0));
        let mtv = minimum_translation(&a, &b);
        assert_eq!(mtv, Vec3::new(0.0, -0.5, 0.0));
    }

    #[test]
    fn test_mtv_z_axis() {
        let a = BoundingBox::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 4.0, 2.0));
        let b = BoundingBox::new(Vec3::new(0.0, 0.0, 1.75), Vec3::new(4.0, 4.0, 3.75));
        let mtv = minimum_translation(&a, &b);
        assert_eq!(mtv, Vec3::new(0.0, 0.0, 0.25));
    }

    #[test]
    fn test_separated_boxes_do_not_resolve() {
        let mut registry = Registry::new(8);
        let mut moving = Physics::default();
        moving.velocity = Vec3::new(1.0, 0.0, 0.0);
        moving.gravity_enabled = false;
        let a = spawn_box(&mut registry, Vec3::ZERO, 0.5, moving);
        // Shifted past the sum of half extents on x
        let b = spawn_box(
            &mut registry,
            Vec3::new(1.1, 0.0, 0.0),
            0.5,
            Physics::default(),
        );

        run_pass(&mut registry);

        let body_a = registry.get_component::<Physics>(a).unwrap();
        assert_eq!(body_a.velocity, Vec3::new(1.0, 0.0, 0.0));
        let transform_b = registry.get_component::<Transform>(b).unwrap();
        assert_eq!(transform_b.translation, Vec3::new(1.1, 0.0, 0.0));
    }

    #[test]
    fn test_grounding_short_circuit_on_immovable_partner() {
        let mut registry = Registry::new(8);
        let mut falling = Physics::default();
        falling.velocity = Vec3::new(0.3, 0.15, 0.0);
        let a = spawn_box(&mut registry, Vec3::new(0.0, -0.4, 0.0), 0.5, falling);
        let floor = spawn_box(&mut registry, Vec3::new(0.0, 0.5, 0.0), 0.5, Physics::immovable());

        let before = registry.get_component::<Transform>(a).unwrap().translation;
        run_pass(&mut registry);

        let body = registry.get_component::<Physics>(a).unwrap();
        assert!(body.grounded);
        assert_eq!(body.velocity.y, 0.0);
        // Horizontal velocity is untouched by grounding
        assert_eq!(body.velocity.x, 0.3);
        // Short-circuit: no MTV correction on this pair
        let after = registry.get_component::<Transform>(a).unwrap().translation;
        assert_eq!(before, after);
        // The floor never moves
        let floor_t = registry.get_component::<Transform>(floor).unwrap();
        assert_eq!(floor_t.translation, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_fast_body_bounces_off_immovable() {
        let mut registry = Registry::new(8);
        let mut falling = Physics::new(1.0, 1.0);
        falling.velocity = Vec3::new(0.0, 2.0, 0.0); // too fast to ground
        let a = spawn_box(&mut registry, Vec3::new(0.0, -0.4, 0.0), 0.5, falling);
        spawn_box(&mut registry, Vec3::new(0.0, 0.5, 0.0), 0.5, Physics::immovable());

        run_pass(&mut registry);

        let body = registry.get_component::<Physics>(a).unwrap();
        assert!(!body.grounded);
        // Elastic reflection against effectively infinite mass: velocity
        // reverses (restitution averaged with the floor's 0.5 gives 0.75
        // of a full reversal beyond stopping).
        assert!(body.velocity.y < 0.0);
    }

    #[test]
    fn test_equal_mass_elastic_pair_preserves_relative_speed() {
        let mut registry = Registry::new(8);
        let mut left = Physics::new(2.0, 1.0);
        left.velocity = Vec3::new(1.0, 0.0, 0.0);
        left.gravity_enabled = false;
        let mut right = Physics::new(2.0, 1.0);
        right.velocity = Vec3::new(-1.0, 0.0, 0.0);
        right.gravity_enabled = false;

        let a = spawn_box(&mut registry, Vec3::new(-0.4, 0.0, 0.0), 0.5, left);
        let b = spawn_box(&mut registry, Vec3::new(0.4, 0.0, 0.0), 0.5, right);

        run_pass(&mut registry);

        let va = registry.get_component::<Physics>(a).unwrap().velocity;
        let vb = registry.get_component::<Physics>(b).unwrap().velocity;

        let relative_before: f32 = 2.0;
        let relative_after = (vb - va).length();
        assert!((relative_after - relative_before).abs() < 1e-4);
        // Momentum is conserved: equal masses, equal and opposite velocities
        assert!((va + vb).length() < 1e-4);
    }

    #[test]
    fn test_movable_pair_splits_separation() {
        let mut registry = Registry::new(8);
        let mut still = Physics::default();
        still.gravity_enabled = false;
        let a = spawn_box(&mut registry, Vec3::new(-0.3, 0.0, 0.0), 0.5, still);
        let b = spawn_box(&mut registry, Vec3::new(0.3, 0.0, 0.0), 0.5, still);

        run_pass(&mut registry);

        let ta = registry.get_component::<Transform>(a).unwrap().translation;
        let tb = registry.get_component::<Transform>(b).unwrap().translation;
        // Both moved the same distance along x, in opposite directions
        assert!((ta.x - (-0.3)).abs() > 1e-6, "first body never moved");
        assert!(((ta.x - (-0.3)) + (tb.x - 0.3)).abs() < 1e-5);
    }

    #[test]
    fn test_entities_without_model_are_skipped() {
        let mut registry = Registry::new(8);
        // Physics but no Model: invisible to the resolver
        let ghost = registry.create_entity().unwrap();
        registry
            .add_component(ghost, ComponentKind::Physics)
            .unwrap();
        let mut body = Physics::default();
        body.gravity_enabled = false;
        registry.set_component(ghost, body).unwrap();

        let solid = spawn_box(&mut registry, Vec3::ZERO, 0.5, body);

        run_pass(&mut registry);

        let ghost_body = registry.get_component::<Physics>(ghost).unwrap();
        assert_eq!(ghost_body.velocity, Vec3::ZERO);
        let solid_t = registry.get_component::<Transform>(solid).unwrap();
        assert_eq!(solid_t.translation, Vec3::ZERO);
    }
}
