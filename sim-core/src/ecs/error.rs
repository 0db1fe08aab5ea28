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
//! Error taxonomy for registry and system operations
//!
//! Every contract violation is surfaced immediately at the call site; the
//! registry never retries or self-heals. A [`MissingComponent`](EcsError::MissingComponent)
//! error in a system update indicates a logic error in system ordering, not
//! a recoverable runtime condition, and aborts the remaining batch for that
//! frame.

use crate::ecs::component::ComponentKind;
use crate::ecs::entity::EntityId;
use thiserror::Error;

/// Errors reported by the registry and the systems that run against it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcsError {
    /// Entity allocation was requested but every id in `[0, capacity)` is in use
    #[error("entity capacity exhausted: all {capacity} ids are in use")]
    CapacityExceeded {
        /// Configured maximum entity count
        capacity: usize,
    },

    /// A component was queried or written for an entity that does not carry it
    #[error("{entity} has no {kind:?} component value")]
    MissingComponent {
        /// Entity the query targeted
        entity: EntityId,
        /// Component kind that was absent
        kind: ComponentKind,
    },

    /// An operation referenced an id outside the configured capacity
    #[error("{entity} is out of range for capacity {capacity}")]
    InvalidEntity {
        /// Offending id
        entity: EntityId,
        /// Configured maximum entity count
        capacity: usize,
    },
}
