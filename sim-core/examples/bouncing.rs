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
//! Bouncing bodies example
//!
//! Drops two boxes onto an immovable floor and steps the frame loop the way
//! a game would: build a frame context, run the physics pass, run the
//! collision pass, read back transforms. Positive Y points down.
//!
//! Run with `RUST_LOG=debug` to see the registry's implied-component
//! attachments.

use glam::Vec3;
use sim_core::ecs::components::{BoundingBox, MeshHandle, Model, Physics, Transform};
use sim_core::ecs::{ComponentKind, EcsError, EntityId, FrameContext, Registry, SystemExecutor};
use sim_core::systems::{CollisionSystem, PhysicsSystem};

const DT: f32 = 1.0 / 60.0;

fn spawn_box(
    registry: &mut Registry,
    translation: Vec3,
    half_extent: f32,
    body: Physics,
) -> Result<EntityId, EcsError> {
    let entity = registry.create_entity()?;
    // Model implies a placeholder Image; Physics implies a Transform
    registry.add_components(entity, &[ComponentKind::Physics, ComponentKind::Model])?;
    registry.set_component(entity, body)?;
    registry.set_component(
        entity,
        Model::new(
            MeshHandle(0),
            BoundingBox::new(Vec3::splat(-half_extent), Vec3::splat(half_extent)),
        ),
    )?;
    registry.set_component(entity, Transform::from_translation(translation))?;
    Ok(entity)
}

fn main() -> Result<(), EcsError> {
    env_logger::init();

    println!("Simulation Core - Bouncing Bodies Example");
    println!("=========================================\n");

    let mut registry = Registry::new(64);

    let bouncy = {
        let mut body = Physics::new(1.0, 0.9);
        body.velocity = Vec3::new(0.4, 0.0, 0.0);
        body
    };
    let heavy = Physics::new(8.0, 0.2);

    let first = spawn_box(&mut registry, Vec3::new(0.0, -3.0, 0.0), 0.5, bouncy)?;
    let second = spawn_box(&mut registry, Vec3::new(2.0, -5.0, 0.0), 0.5, heavy)?;
    // A wide immovable floor with its top surface at y = 0
    let floor = spawn_box(&mut registry, Vec3::new(0.0, 0.5, 0.0), 0.5, Physics::immovable())?;
    registry.set_component(
        floor,
        Transform {
            translation: Vec3::new(0.0, 0.5, 0.0),
            scale: Vec3::new(20.0, 1.0, 20.0),
            rotation: Vec3::ZERO,
        },
    )?;

    println!("Spawned {} entities\n", registry.entity_count());

    let mut executor = SystemExecutor::new();
    executor.add_system(PhysicsSystem::new());
    executor.add_system(CollisionSystem::new());

    for frame_index in 0..240u64 {
        let mut ctx = FrameContext::new(frame_index, DT, &mut registry);
        executor.run(&mut ctx)?;

        if frame_index % 30 == 0 {
            let t1 = registry.get_component::<Transform>(first)?;
            let p1 = registry.get_component::<Physics>(first)?;
            let t2 = registry.get_component::<Transform>(second)?;
            println!(
                "frame {frame_index:3}: bouncy y={:7.3} (grounded: {:5}) heavy y={:7.3}",
                t1.translation.y, p1.grounded, t2.translation.y
            );
        }
    }

    let p1 = registry.get_component::<Physics>(first)?;
    let p2 = registry.get_component::<Physics>(second)?;
    println!("\nAfter 4 simulated seconds:");
    println!("  bouncy grounded: {}", p1.grounded);
    println!("  heavy grounded:  {}", p2.grounded);

    Ok(())
}
