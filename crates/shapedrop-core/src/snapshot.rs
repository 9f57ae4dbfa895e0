//! Render-ready snapshot of the scene.

use serde::{Deserialize, Serialize};

use crate::scene::Scene;
use crate::shape::{Color, Rect, ShapeEntity, ShapeId, ShapeKind};

/// What a renderer needs to draw one shape: a filled ellipse for circles,
/// a filled rectangle for squares, rotated about the center.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShapeSnapshot {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub center: [f32; 2],
    pub size: [f32; 2],
    /// Axis-aligned bounds of the rotated shape.
    pub frame: Rect,
    pub rotation: f32,
    pub color: Color,
}

impl From<&ShapeEntity> for ShapeSnapshot {
    fn from(shape: &ShapeEntity) -> Self {
        Self {
            id: shape.id,
            kind: shape.kind,
            center: shape.center,
            size: shape.size,
            frame: shape.frame(),
            rotation: shape.rotation,
            color: shape.color,
        }
    }
}

/// A snapshot of every shape at one simulation frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneSnapshot {
    /// Physics frame the snapshot was taken at.
    pub frame: u64,
    /// Surface size.
    pub bounds: [f32; 2],
    /// Shapes in draw order, bottom first.
    pub shapes: Vec<ShapeSnapshot>,
}

impl SceneSnapshot {
    /// Create a snapshot from the current scene.
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            frame: scene.world().current_frame(),
            bounds: scene.bounds(),
            shapes: scene.shapes().iter().map(ShapeSnapshot::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Scene {
    /// Create a render snapshot of the current state.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::from_scene(self)
    }
}
