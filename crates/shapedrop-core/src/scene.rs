//! The interactive surface: shapes, physics, and the gestures that drive them.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rapier2d::prelude::Vector;

use crate::config::{ConfigError, SceneConfig};
use crate::gesture::{
    GestureEvent, GestureInterpreter, GesturePhase, PanRecognizer, PinchRecognizer, PointerEvent,
    RotationRecognizer,
};
use crate::interaction;
use crate::physics::PhysicsWorld;
use crate::shape::{Color, SPAWN_SIZE, ShapeEntity, ShapeId, ShapeKind};

/// Owns every shape, the physics world and the gesture interpreter.
///
/// All operations are synchronous; callers that share a scene across threads
/// must serialize access (one lock around the whole scene is enough).
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    world: PhysicsWorld,
    shapes: Vec<ShapeEntity>,
    interpreter: GestureInterpreter,
    rng: ChaCha8Rng,
    next_id: ShapeId,
}

impl Scene {
    /// Creates an empty scene from a validated configuration.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let gravity = Vector::new(config.gravity[0], config.gravity[1]);
        let mut world = PhysicsWorld::with_gravity(config.bounds(), gravity);
        world.integration_parameters.dt = config.timestep;

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world,
            shapes: Vec::new(),
            interpreter: GestureInterpreter::new(),
            next_id: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn bounds(&self) -> [f32; 2] {
        self.config.bounds()
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Mutable access for installing a collision observer or tuning rapier.
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn shapes(&self) -> &[ShapeEntity] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&ShapeEntity> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    /// Spawns a random shape centered on `location`.
    pub fn tap(&mut self, location: [f32; 2]) -> ShapeId {
        let kind = ShapeKind::random(&mut self.rng);
        let color = Color::random(&mut self.rng);
        self.spawn_shape(kind, location, color)
    }

    /// Spawns a shape of a chosen kind and color with the standard footprint.
    pub fn spawn_shape(&mut self, kind: ShapeKind, center: [f32; 2], color: Color) -> ShapeId {
        let id = self.next_id;
        self.next_id += 1;

        let size = [SPAWN_SIZE, SPAWN_SIZE];
        let (body_handle, collider_handle) = self.world.spawn(kind, center, size);
        self.shapes.push(ShapeEntity::new(
            id,
            kind,
            center,
            size,
            color,
            body_handle,
            collider_handle,
        ));

        tracing::info!("[scene] Spawned {:?} {} at {:?}", kind, id, center);
        id
    }

    /// Topmost shape under a point; later spawns are drawn above earlier ones.
    pub fn shape_at(&self, point: [f32; 2]) -> Option<ShapeId> {
        topmost(&self.shapes, point)
    }

    /// Feeds one pointer event and applies every gesture it produces.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<GestureEvent> {
        let shapes = &self.shapes;
        let events = self
            .interpreter
            .handle(event, |point| topmost(shapes, point));

        for gesture in &events {
            self.apply_gesture(*gesture);
        }
        events
    }

    /// Dispatches one recognized gesture to its handler.
    pub fn apply_gesture(&mut self, gesture: GestureEvent) {
        match gesture {
            GestureEvent::Tap { location } => {
                self.tap(location);
            }
            GestureEvent::Pan { target, phase } => {
                let mut fallback = PanRecognizer::default();
                let pan = self.interpreter.pan_mut(target).unwrap_or(&mut fallback);
                let Some(entity) = self.shapes.iter_mut().find(|shape| shape.id == target) else {
                    ignore_target(target, phase);
                    return;
                };
                interaction::handle_pan(&mut self.world, entity, phase, pan);
            }
            GestureEvent::Pinch { target, phase } => {
                let mut fallback = PinchRecognizer::default();
                let pinch = self.interpreter.pinch_mut(target).unwrap_or(&mut fallback);
                let Some(entity) = self.shapes.iter_mut().find(|shape| shape.id == target) else {
                    ignore_target(target, phase);
                    return;
                };
                interaction::handle_pinch(&mut self.world, entity, phase, pinch);
            }
            GestureEvent::Rotate { target, phase } => {
                let mut fallback = RotationRecognizer::default();
                let rotation = self.interpreter.rotation_mut(target).unwrap_or(&mut fallback);
                let Some(entity) = self.shapes.iter_mut().find(|shape| shape.id == target) else {
                    ignore_target(target, phase);
                    return;
                };
                interaction::handle_rotate(&mut self.world, entity, phase, rotation);
            }
        }
    }

    /// Advances the simulation by the configured timestep.
    pub fn step(&mut self) {
        self.world.step();
        self.sync_from_physics();
    }

    /// Advances the simulation once by `dt` seconds; later steps use the configured timestep again.
    pub fn step_dt(&mut self, dt: f32) {
        self.world.step_dt(dt);
        self.sync_from_physics();
    }

    pub fn step_n(&mut self, n: u32) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Copies body poses back into the visual state of every shape.
    fn sync_from_physics(&mut self) {
        for shape in &mut self.shapes {
            if let Some((center, rotation)) = self.world.body_pose(shape.body_handle) {
                shape.center = center;
                shape.rotation = rotation;
            }
        }
    }
}

fn topmost(shapes: &[ShapeEntity], point: [f32; 2]) -> Option<ShapeId> {
    shapes
        .iter()
        .rev()
        .find(|shape| shape.contains_point(point))
        .map(|shape| shape.id)
}

fn ignore_target(target: ShapeId, phase: GesturePhase) {
    tracing::debug!("[scene] Ignoring {:?} gesture for unknown shape {}", phase, target);
}
