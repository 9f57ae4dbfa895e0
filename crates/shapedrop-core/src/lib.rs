//! Shapedrop Core Library
//!
//! Tap to drop circles and squares that fall under gravity and collide with
//! the surface edges and each other, then drag, pinch and rotate them.
//! Physics runs on `Rapier2D`; gestures temporarily pull a shape out of
//! parts of the simulation while the user holds it.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod gesture;
pub mod interaction;
pub mod physics;
pub mod scene;
pub mod shape;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ConfigError, SceneConfig};
pub use gesture::{
    GestureEvent, GestureInterpreter, GestureKind, GesturePhase, PointerEvent, PointerId,
    PointerPhase, should_recognize_simultaneously,
};
pub use physics::{
    CollisionObserver, Contact, ContactTarget, Membership, PHYSICS_DT, PhysicsWorld, Track,
    default_gravity,
};
pub use scene::Scene;
pub use shape::{Color, Rect, ShapeEntity, ShapeId, ShapeKind};
pub use snapshot::{SceneSnapshot, ShapeSnapshot};
