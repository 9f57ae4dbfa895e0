//! Hands a shape over from the simulation to the user's fingers and back.
//!
//! Every manipulation follows one choreography:
//! - `Began`: leave the gravity track.
//! - `Changed`: leave the material track and collision, apply the edit,
//!   resync the body, rejoin material track and collision.
//! - `Ended` / `Cancelled` / `Failed`: rejoin gravity.

use crate::gesture::{GesturePhase, PanRecognizer, PinchRecognizer, RotationRecognizer};
use crate::physics::{PhysicsWorld, Track};
use crate::shape::{ShapeEntity, size_in_range};

/// Runs the detach / mutate / reattach sequence for one gesture callback.
///
/// `mutate` returns `true` when it changed the entity, in which case the
/// body is resynchronized with `update_item`.
pub fn manipulate<F>(
    world: &mut PhysicsWorld,
    entity: &mut ShapeEntity,
    phase: GesturePhase,
    mutate: F,
) where
    F: FnOnce(&mut ShapeEntity) -> bool,
{
    let handle = entity.body_handle;
    match phase {
        GesturePhase::Began => world.remove(handle, Track::Gravity),
        GesturePhase::Changed => {
            let material = entity.kind.material_track();
            world.remove(handle, material);
            world.remove(handle, Track::Collision);

            if mutate(entity) {
                world.update_item(entity);
            }

            world.add(handle, material);
            world.add(handle, Track::Collision);
        }
        GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
            world.add(handle, Track::Gravity);
        }
        GesturePhase::Possible => {}
    }
}

/// Drag: moves the center by the translation accumulated since the last event.
pub fn handle_pan(
    world: &mut PhysicsWorld,
    entity: &mut ShapeEntity,
    phase: GesturePhase,
    pan: &mut PanRecognizer,
) {
    manipulate(world, entity, phase, |entity| {
        let [dx, dy] = pan.translation();
        entity.center = [entity.center[0] + dx, entity.center[1] + dy];
        pan.set_translation([0.0, 0.0]);
        true
    });
}

/// Pinch: scales both sides by the accumulated factor if the result stays in range.
///
/// A rejected increment leaves the scale accumulating, so the gesture keeps
/// working once the fingers move back.
pub fn handle_pinch(
    world: &mut PhysicsWorld,
    entity: &mut ShapeEntity,
    phase: GesturePhase,
    pinch: &mut PinchRecognizer,
) {
    let bounds = world.bounds();
    manipulate(world, entity, phase, |entity| {
        let scale = pinch.scale();
        let candidate = [entity.size[0] * scale, entity.size[1] * scale];
        if !size_in_range(candidate, bounds) {
            tracing::debug!(
                "[gesture] Rejecting resize of shape {} to {:?}",
                entity.id,
                candidate
            );
            return false;
        }
        entity.size = candidate;
        pinch.set_scale(1.0);
        true
    });
}

/// Rotate: composes the accumulated angle onto the current rotation.
pub fn handle_rotate(
    world: &mut PhysicsWorld,
    entity: &mut ShapeEntity,
    phase: GesturePhase,
    rotation: &mut RotationRecognizer,
) {
    manipulate(world, entity, phase, |entity| {
        entity.rotation += rotation.rotation();
        rotation.set_rotation(0.0);
        true
    });
}
