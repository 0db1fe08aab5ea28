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
//! System execution framework
//!
//! Systems contain the per-frame logic that runs against the registry. The
//! game loop builds a fresh [`FrameContext`] each tick and lends it to each
//! system's `update` call in turn; systems never retain the context past
//! their call (the borrow makes that impossible).
//!
//! Execution is single-threaded and strictly ordered: the physics pass must
//! run before the collision pass within a frame, because the resolver reads
//! post-integration positions. That ordering is established by system
//! registration order and must not be parallelized without re-deriving the
//! data dependencies.

use crate::ecs::error::EcsError;
use crate::ecs::registry::Registry;

/// Per-frame bundle passed by the game loop into every system update
///
/// Owned by the caller for the duration of one tick; systems receive it by
/// mutable reference only.
pub struct FrameContext<'a> {
    /// Monotonically increasing frame number
    pub frame_index: u64,
    /// Elapsed time since the previous frame, in seconds
    pub dt: f32,
    /// The registry all systems read and mutate this frame
    pub registry: &'a mut Registry,
}

impl<'a> FrameContext<'a> {
    /// Build the context for one tick
    pub fn new(frame_index: u64, dt: f32, registry: &'a mut Registry) -> Self {
        FrameContext {
            frame_index,
            dt,
            registry,
        }
    }
}

/// Trait for systems that operate on the registry once per frame
pub trait System: Send + Sync {
    /// Execute the system against this frame's context
    ///
    /// A contract violation (typically [`EcsError::MissingComponent`])
    /// aborts the update for the remaining entities in the batch; systems
    /// do not catch registry errors internally.
    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), EcsError>;

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Executor running systems in registration order
///
/// Registration order is the execution order and is part of the simulation
/// contract: register the physics integrator before the collision resolver.
/// The first system error stops the frame; there are no partial-success
/// semantics.
pub struct SystemExecutor {
    systems: Vec<Box<dyn System>>,
}

impl SystemExecutor {
    /// Create a new executor with no systems
    pub fn new() -> Self {
        SystemExecutor {
            systems: Vec::new(),
        }
    }

    /// Append a system to the execution order
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Run every system once, in registration order
    ///
    /// # Errors
    ///
    /// Propagates the first system error; later systems do not run for
    /// this frame.
    pub fn run(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), EcsError> {
        for system in &mut self.systems {
            system.update(ctx)?;
        }
        Ok(())
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new()
    }
}
