//! Test utilities for driving a scene the way a touch surface would.

use crate::config::SceneConfig;
use crate::gesture::{GestureEvent, PointerEvent, PointerId, PointerPhase};
use crate::scene::Scene;
use crate::shape::{Color, ShapeId, ShapeKind};

/// A scene wrapper with shortcuts for taps, drags and stepping.
pub(crate) struct TestScene {
    pub scene: Scene,
}

impl TestScene {
    /// Create a 400x800 scene with the default seed.
    pub fn new() -> Self {
        Self::from_config(SceneConfig::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(SceneConfig {
            seed,
            ..SceneConfig::default()
        })
    }

    pub fn with_bounds(width: f32, height: f32) -> Self {
        Self::from_config(SceneConfig::with_bounds(width, height))
    }

    fn from_config(config: SceneConfig) -> Self {
        let scene = Scene::new(config).expect("test config must be valid");
        Self { scene }
    }

    /// Spawn a random shape directly, bypassing the gesture interpreter.
    pub fn tap(&mut self, x: f32, y: f32) -> ShapeId {
        self.scene.tap([x, y])
    }

    pub fn circle(&mut self, x: f32, y: f32) -> ShapeId {
        self.scene.spawn_shape(ShapeKind::Circle, [x, y], Color::rgb(255, 0, 0))
    }

    pub fn square(&mut self, x: f32, y: f32) -> ShapeId {
        self.scene.spawn_shape(ShapeKind::Square, [x, y], Color::rgb(0, 0, 255))
    }

    pub fn pointer(
        &mut self,
        id: PointerId,
        phase: PointerPhase,
        position: [f32; 2],
    ) -> Vec<GestureEvent> {
        self.scene.handle_pointer(PointerEvent::new(id, phase, position))
    }

    /// Press at `start`, move through `path`, then lift at the last point.
    pub fn drag(&mut self, id: PointerId, start: [f32; 2], path: &[[f32; 2]]) {
        self.pointer(id, PointerPhase::Down, start);
        for &point in path {
            self.pointer(id, PointerPhase::Move, point);
        }
        let end = path.last().copied().unwrap_or(start);
        self.pointer(id, PointerPhase::Up, end);
    }

    /// Advance the simulation by exactly `n` steps.
    pub fn step(&mut self, n: u32) {
        self.scene.step_n(n);
    }
}
