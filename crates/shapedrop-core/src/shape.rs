//! Shape entities spawned by taps.

use rand::prelude::*;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::Track;

/// Unique identifier for a shape.
pub type ShapeId = u32;

/// Side length of a freshly spawned shape.
pub const SPAWN_SIZE: f32 = 100.0;

/// Smallest width or height a shape may be resized to.
pub const MIN_DIMENSION: f32 = 10.0;

/// Distance kept between the largest allowed dimension and the world bound.
pub const MAX_DIMENSION_MARGIN: f32 = 50.0;

/// Visual and collision class of a shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Square,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Circle, ShapeKind::Square];

    /// Maps any index onto a shape kind. Never fails.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Picks a kind uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::from_index(rng.random_range(0..Self::ALL.len()))
    }

    /// The material track this kind joins at spawn: circles bounce, squares only carry mass.
    pub fn material_track(self) -> Track {
        match self {
            Self::Circle => Track::Elasticity,
            Self::Square => Track::Density,
        }
    }
}

/// RGBA color representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Uniformly random, fully opaque color.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }
}

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub origin: [f32; 2],
    pub size: [f32; 2],
}

impl Rect {
    pub fn from_center(center: [f32; 2], size: [f32; 2]) -> Self {
        Self {
            origin: [center[0] - 0.5 * size[0], center[1] - 0.5 * size[1]],
            size,
        }
    }

    pub fn max(&self) -> [f32; 2] {
        [self.origin[0] + self.size[0], self.origin[1] + self.size[1]]
    }

    pub fn center(&self) -> [f32; 2] {
        [
            self.origin[0] + 0.5 * self.size[0],
            self.origin[1] + 0.5 * self.size[1],
        ]
    }
}

/// Largest width and height allowed inside a world of the given bounds.
pub fn max_dimensions(bounds: [f32; 2]) -> [f32; 2] {
    [
        bounds[0] - MAX_DIMENSION_MARGIN,
        bounds[1] - MAX_DIMENSION_MARGIN,
    ]
}

/// Whether `size` respects `[MIN_DIMENSION, bound - MAX_DIMENSION_MARGIN]` on both axes.
pub fn size_in_range(size: [f32; 2], bounds: [f32; 2]) -> bool {
    let max = max_dimensions(bounds);
    (0..2).all(|axis| size[axis] >= MIN_DIMENSION && size[axis] <= max[axis])
}

/// Collision shape for a kind at the given size.
pub(crate) fn collider_shape(kind: ShapeKind, size: [f32; 2]) -> SharedShape {
    match kind {
        ShapeKind::Circle => SharedShape::ball(0.5 * size[0].min(size[1])),
        ShapeKind::Square => SharedShape::cuboid(0.5 * size[0], 0.5 * size[1]),
    }
}

/// A shape on the surface, backed by one rigid body and one collider.
///
/// `center`, `size` and `rotation` are the visual state. The physics step
/// writes them back after each tick; gesture handlers mutate them directly
/// and then push them into the body with `PhysicsWorld::update_item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeEntity {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub center: [f32; 2],
    pub size: [f32; 2],
    /// Radians, clockwise on screen (y grows downward).
    pub rotation: f32,
    pub color: Color,
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

impl ShapeEntity {
    pub fn new(
        id: ShapeId,
        kind: ShapeKind,
        center: [f32; 2],
        size: [f32; 2],
        color: Color,
        body_handle: RigidBodyHandle,
        collider_handle: ColliderHandle,
    ) -> Self {
        Self {
            id,
            kind,
            center,
            size,
            rotation: 0.0,
            color,
            body_handle,
            collider_handle,
        }
    }

    /// Axis-aligned bounds of the rotated shape.
    pub fn frame(&self) -> Rect {
        let (sin, cos) = self.rotation.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let width = cos * self.size[0] + sin * self.size[1];
        let height = sin * self.size[0] + cos * self.size[1];
        Rect::from_center(self.center, [width, height])
    }

    /// Hit test in the shape's own rotated frame.
    pub fn contains_point(&self, point: [f32; 2]) -> bool {
        let dx = point[0] - self.center[0];
        let dy = point[1] - self.center[1];
        let (sin, cos) = self.rotation.sin_cos();
        let local_x = cos * dx + sin * dy;
        let local_y = -sin * dx + cos * dy;
        let half_w = 0.5 * self.size[0];
        let half_h = 0.5 * self.size[1];

        match self.kind {
            ShapeKind::Circle => {
                let nx = local_x / half_w;
                let ny = local_y / half_h;
                nx * nx + ny * ny <= 1.0
            }
            ShapeKind::Square => local_x.abs() <= half_w && local_y.abs() <= half_h,
        }
    }
}
