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
//! Component payload types
//!
//! Components are plain data records with no behavior beyond derivations
//! that are pure functions of their current state. All vector math is
//! single precision; the engine uses an inverted-Y convention (positive Y
//! points down), which matters for default gravity and for the collision
//! resolver's vertical-axis handling.

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Opaque handle to mesh data owned by the (out-of-scope) renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshHandle(pub u64);

/// Opaque handle to texture data owned by the (out-of-scope) renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Spatial placement of an entity
///
/// The model matrix and normal matrix are derived on demand and never
/// cached; callers that need them every frame recompute them every frame.
///
/// # Examples
///
/// ```
/// use sim_core::ecs::components::Transform;
/// use glam::Vec3;
///
/// let transform = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
/// let m = transform.matrix();
/// assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space translation
    pub translation: Vec3,
    /// Per-axis scale, unit by default
    pub scale: Vec3,
    /// Euler angles in radians, applied in Y-X-Z order
    pub rotation: Vec3,
}

impl Transform {
    /// Create a transform at the given translation with unit scale and no rotation
    pub fn from_translation(translation: Vec3) -> Self {
        Transform {
            translation,
            ..Default::default()
        }
    }

    fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        )
    }

    /// Derive the 4x4 model matrix: translation * rotation (Y, X, Z) * scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.translation)
    }

    /// Derive the normal matrix: the inverse-transpose of the upper-left
    /// 3x3 of the model matrix, which for a rotation-scale transform is
    /// rotation * reciprocal scale
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_quat(self.orientation()) * Mat3::from_diagonal(self.scale.recip())
    }

    /// Check that all fields are finite
    pub fn is_valid(&self) -> bool {
        self.translation.is_finite() && self.scale.is_finite() && self.rotation.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }
}

/// Default gravity contribution, positive Y (downward in this engine)
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, 9.8, 0.0);

/// Rigid-body state for the physics and collision passes
///
/// Mass and restitution are validated at construction: mass must be
/// strictly positive and finite, restitution must lie in `0..=1`.
/// Immovable bodies keep their real mass; the collision resolver
/// substitutes a large sentinel at resolution time instead of storing a
/// fake mass here.
///
/// The `grounded` flag is transient per-frame state: the integrator clears
/// it at the end of every pass and only the collision pass re-asserts it,
/// so losing contact shows up one frame late.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Current velocity in units per second
    pub velocity: Vec3,
    /// Non-gravitational acceleration in units per second squared
    pub acceleration: Vec3,
    /// Gravity contribution added while airborne and gravity-enabled
    pub gravity: Vec3,
    mass: f32,
    restitution: f32,
    /// Whether the body responds to impulses and position correction
    pub movable: bool,
    /// Transient: resting on an immovable surface this frame
    pub grounded: bool,
    /// Whether the gravity contribution participates in integration
    pub gravity_enabled: bool,
}

impl Physics {
    /// Create a body with the given mass and restitution
    ///
    /// # Panics
    ///
    /// Panics if mass is not strictly positive and finite, or restitution
    /// is outside `0..=1`. Use `try_new` for fallible construction.
    pub fn new(mass: f32, restitution: f32) -> Self {
        assert!(
            mass > 0.0 && mass.is_finite(),
            "Mass must be positive and finite"
        );
        assert!(
            (0.0..=1.0).contains(&restitution),
            "Restitution must be within 0..=1"
        );
        Physics {
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            gravity: DEFAULT_GRAVITY,
            mass,
            restitution,
            movable: true,
            grounded: false,
            gravity_enabled: true,
        }
    }

    /// Try to create a body with the given mass and restitution
    ///
    /// Returns `None` if either value is out of range.
    pub fn try_new(mass: f32, restitution: f32) -> Option<Self> {
        if mass > 0.0 && mass.is_finite() && (0.0..=1.0).contains(&restitution) {
            Some(Physics::new(mass, restitution))
        } else {
            None
        }
    }

    /// Create an immovable body (a wall or floor)
    ///
    /// Immovable bodies never integrate gravity and never receive impulses
    /// or position correction; the resolver treats their mass as a large
    /// sentinel rather than reading this field.
    pub fn immovable() -> Self {
        Physics {
            movable: false,
            gravity_enabled: false,
            ..Physics::new(1.0, 0.5)
        }
    }

    /// Get the mass in kilograms
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Set the mass
    ///
    /// # Panics
    ///
    /// Panics if mass is not strictly positive and finite.
    pub fn set_mass(&mut self, mass: f32) {
        assert!(
            mass > 0.0 && mass.is_finite(),
            "Mass must be positive and finite"
        );
        self.mass = mass;
    }

    /// Get the restitution coefficient
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Set the restitution coefficient
    ///
    /// # Panics
    ///
    /// Panics if restitution is outside `0..=1`.
    pub fn set_restitution(&mut self, restitution: f32) {
        assert!(
            (0.0..=1.0).contains(&restitution),
            "Restitution must be within 0..=1"
        );
        self.restitution = restitution;
    }

    /// Check that all vector fields are finite
    pub fn is_valid(&self) -> bool {
        self.velocity.is_finite() && self.acceleration.is_finite() && self.gravity.is_finite()
    }
}

impl Default for Physics {
    fn default() -> Self {
        Physics::new(1.0, 0.5)
    }
}

/// Axis-aligned bounding box in local (unscaled) model space
///
/// Derived once from a model's vertex positions and cached on the model.
/// Scaling and translation into world space happen per query, not here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Componentwise minimum corner
    pub min: Vec3,
    /// Componentwise maximum corner
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a box from explicit corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        BoundingBox { min, max }
    }

    /// Derive the tightest box containing every point
    ///
    /// An empty slice yields a degenerate box at the origin.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut bounds = match points.first() {
            Some(first) => BoundingBox::new(*first, *first),
            None => BoundingBox::default(),
        };
        for point in points {
            bounds.min = bounds.min.min(*point);
            bounds.max = bounds.max.max(*point);
        }
        bounds
    }

    /// Scale both corners componentwise
    pub fn scaled(self, scale: Vec3) -> Self {
        BoundingBox::new(self.min * scale, self.max * scale)
    }

    /// Translate both corners
    pub fn translated(self, offset: Vec3) -> Self {
        BoundingBox::new(self.min + offset, self.max + offset)
    }

    /// Inclusive interval-overlap test on all three axes simultaneously
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
            && self.max.z >= other.min.z
            && self.min.z <= other.max.z
    }
}

/// Renderable geometry reference with cached local-space bounds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Model {
    /// Handle to the mesh owned by the renderer
    pub mesh: MeshHandle,
    bounds: BoundingBox,
}

impl Model {
    /// Create a model with precomputed bounds
    pub fn new(mesh: MeshHandle, bounds: BoundingBox) -> Self {
        Model { mesh, bounds }
    }

    /// Create a model, deriving bounds from its vertex positions once
    pub fn from_vertex_positions(mesh: MeshHandle, positions: &[Vec3]) -> Self {
        Model::new(mesh, BoundingBox::from_points(positions))
    }

    /// The cached local-space bounding box
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

/// Texture binding for a renderable entity
///
/// The default value is the no-texture placeholder the registry attaches
/// automatically alongside every Model component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Image {
    /// Bound texture, or `None` for the placeholder
    pub texture: Option<TextureHandle>,
}

impl Image {
    /// Create an image bound to a texture
    pub fn with_texture(texture: TextureHandle) -> Self {
        Image {
            texture: Some(texture),
        }
    }

    /// Whether a real texture is bound
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

/// Point light emission parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Emitted color
    pub color: Vec3,
    /// Emission intensity
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        PointLight {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Sparse voxel octree parameters
///
/// Traversal and meshing live with the terrain system; the component only
/// carries the placement the octree was built against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octree {
    /// World-space origin of the root cell
    pub origin: Vec3,
    /// Edge length of the root cell
    pub size: f32,
    /// Maximum subdivision depth
    pub max_depth: u32,
}

impl Default for Octree {
    fn default() -> Self {
        Octree {
            origin: Vec3::ZERO,
            size: 1.0,
            max_depth: 4,
        }
    }
}
