//! Physics simulation using `Rapier2D`, with per-body track membership.
//!
//! Every shape body can belong to any subset of four tracks:
//! - `Gravity`: the body feels the world gravity.
//! - `Collision`: the body's collider takes part in contacts (bounds and other bodies).
//! - `Elasticity`: perfectly elastic response with density 2 (circles).
//! - `Density`: density 2 with no bounce (squares).
//!
//! Membership is toggled without destroying the body, so gesture handlers can
//! withdraw a body from parts of the simulation and put it back afterwards.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use parking_lot::Mutex;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shape::{ShapeEntity, ShapeKind, collider_shape};

/// Fixed timestep for physics simulation (60Hz).
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Restitution of bodies on the elasticity track.
pub const ELASTICITY: f32 = 1.0;

/// Density of bodies on either material track.
pub const TRACK_DENSITY: f32 = 2.0;

/// Density of a body outside both material tracks.
pub const DEFAULT_DENSITY: f32 = 1.0;

/// Damping and friction applied to every body. Zero means frictionless.
pub const RESISTANCE: f32 = 0.0;

/// Half thickness of the static walls placed just outside the world bounds.
const WALL_HALF_THICKNESS: f32 = 50.0;

/// Default gravity vector (downward, in units/s²).
pub fn default_gravity() -> Vector {
    Vector::new(0.0, 1000.0)
}

/// A slice of the simulation a body can join or leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Gravity,
    Collision,
    Elasticity,
    Density,
}

impl Track {
    pub const ALL: [Track; 4] = [
        Track::Gravity,
        Track::Collision,
        Track::Elasticity,
        Track::Density,
    ];

    fn apply_to_body(self, body: &mut RigidBody, member: bool) {
        if self == Track::Gravity {
            body.set_gravity_scale(if member { 1.0 } else { 0.0 }, true);
        }
    }

    fn apply_to_collider(self, collider: &mut Collider, member: bool) {
        match self {
            Track::Gravity => {}
            Track::Collision => collider.set_enabled(member),
            Track::Elasticity => {
                collider.set_restitution(if member { ELASTICITY } else { 0.0 });
                collider.set_density(if member { TRACK_DENSITY } else { DEFAULT_DENSITY });
            }
            Track::Density => {
                collider.set_density(if member { TRACK_DENSITY } else { DEFAULT_DENSITY });
            }
        }
    }
}

/// Tracks a single body currently belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Membership {
    gravity: bool,
    collision: bool,
    elasticity: bool,
    density: bool,
}

impl Membership {
    pub fn contains(self, track: Track) -> bool {
        match track {
            Track::Gravity => self.gravity,
            Track::Collision => self.collision,
            Track::Elasticity => self.elasticity,
            Track::Density => self.density,
        }
    }

    /// Returns `true` if the membership changed.
    fn set(&mut self, track: Track, member: bool) -> bool {
        let slot = match track {
            Track::Gravity => &mut self.gravity,
            Track::Collision => &mut self.collision,
            Track::Elasticity => &mut self.elasticity,
            Track::Density => &mut self.density,
        };
        let changed = *slot != member;
        *slot = member;
        changed
    }
}

/// One side of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTarget {
    Body(RigidBodyHandle),
    Boundary,
}

/// Contact transition reported after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Began(ContactTarget, ContactTarget),
    Ended(ContactTarget, ContactTarget),
}

/// Hook for reacting to contacts. The default implementation ignores them.
pub trait CollisionObserver: Send {
    fn on_contact(&mut self, _contact: &Contact) {}
}

impl CollisionObserver for () {}

/// Buffers rapier collision events raised during a step.
#[derive(Default)]
struct EventCollector {
    events: Mutex<Vec<CollisionEvent>>,
}

impl EventHandler for EventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.events.lock().push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

/// Physics world containing all `Rapier2D` components plus track membership.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub gravity: Vector,
    pub frame: u64,
    bounds: [f32; 2],
    boundary: Vec<ColliderHandle>,
    membership: HashMap<RigidBodyHandle, Membership>,
    observer: Box<dyn CollisionObserver>,
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("frame", &self.frame)
            .field("bounds", &self.bounds)
            .field("rigid_body_count", &self.rigid_body_set.len())
            .field("collider_count", &self.collider_set.len())
            .field("gravity", &self.gravity)
            .finish_non_exhaustive()
    }
}

impl PhysicsWorld {
    /// Creates a world of the given size with default gravity.
    pub fn new(bounds: [f32; 2]) -> Self {
        Self::with_gravity(bounds, default_gravity())
    }

    /// Creates a world of the given size with custom gravity.
    pub fn with_gravity(bounds: [f32; 2], gravity: Vector) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: PHYSICS_DT,
            ..Default::default()
        };

        let mut world = Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity,
            frame: 0,
            bounds,
            boundary: Vec::new(),
            membership: HashMap::new(),
            observer: Box::new(()),
        };
        world.build_boundary();
        world
    }

    /// Walls hugging each edge of the bounds from the outside.
    fn build_boundary(&mut self) {
        let [width, height] = self.bounds;
        let t = WALL_HALF_THICKNESS;
        let walls = [
            // top, bottom
            (0.5 * width, -t, 0.5 * width + 2.0 * t, t),
            (0.5 * width, height + t, 0.5 * width + 2.0 * t, t),
            // left, right
            (-t, 0.5 * height, t, 0.5 * height + 2.0 * t),
            (width + t, 0.5 * height, t, 0.5 * height + 2.0 * t),
        ];

        for (x, y, half_w, half_h) in walls {
            let collider = ColliderBuilder::cuboid(half_w, half_h)
                .translation(Vector::new(x, y))
                .friction(RESISTANCE)
                .restitution(0.0)
                .build();
            let handle = self.collider_set.insert(collider);
            self.boundary.push(handle);
        }
    }

    /// World size the boundary was built for.
    pub fn bounds(&self) -> [f32; 2] {
        self.bounds
    }

    /// Replaces the contact observer.
    pub fn set_observer(&mut self, observer: Box<dyn CollisionObserver>) {
        self.observer = observer;
    }

    /// Inserts a body for a new shape and enrolls it in gravity, collision and
    /// the material track of its kind.
    pub fn spawn(
        &mut self,
        kind: ShapeKind,
        center: [f32; 2],
        size: [f32; 2],
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(center[0], center[1]))
            .linear_damping(RESISTANCE)
            .angular_damping(RESISTANCE)
            .ccd_enabled(true)
            .build();
        let body_handle = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::new(collider_shape(kind, size))
            .friction(RESISTANCE)
            .restitution(0.0)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .density(DEFAULT_DENSITY)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);

        self.membership.insert(body_handle, Membership::default());
        for track in Track::ALL {
            self.apply(body_handle, track, false);
        }
        for track in [Track::Gravity, Track::Collision, kind.material_track()] {
            self.add(body_handle, track);
        }

        (body_handle, collider_handle)
    }

    /// Joins a track. Repeated calls and unknown handles are no-ops.
    pub fn add(&mut self, handle: RigidBodyHandle, track: Track) {
        self.set_member(handle, track, true);
    }

    /// Leaves a track. Repeated calls and unknown handles are no-ops.
    pub fn remove(&mut self, handle: RigidBodyHandle, track: Track) {
        self.set_member(handle, track, false);
    }

    /// Whether the body is currently on the track.
    pub fn contains(&self, handle: RigidBodyHandle, track: Track) -> bool {
        self.membership
            .get(&handle)
            .is_some_and(|membership| membership.contains(track))
    }

    /// Full membership of a body, if it is known.
    pub fn membership(&self, handle: RigidBodyHandle) -> Option<Membership> {
        self.membership.get(&handle).copied()
    }

    fn set_member(&mut self, handle: RigidBodyHandle, track: Track, member: bool) {
        let Some(membership) = self.membership.get_mut(&handle) else {
            tracing::debug!("[physics] Ignoring {:?} toggle for unknown body", track);
            return;
        };
        if membership.set(track, member) {
            self.apply(handle, track, member);
        }
    }

    fn apply(&mut self, handle: RigidBodyHandle, track: Track, member: bool) {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return;
        };
        track.apply_to_body(body, member);
        let colliders = body.colliders().to_vec();
        for collider_handle in colliders {
            if let Some(collider) = self.collider_set.get_mut(collider_handle) {
                track.apply_to_collider(collider, member);
            }
        }
    }

    /// Pushes an entity's manipulated pose and size into its body and collider,
    /// clearing velocities so the next step continues from the new state.
    pub fn update_item(&mut self, entity: &ShapeEntity) {
        let Some(body) = self.rigid_body_set.get_mut(entity.body_handle) else {
            tracing::debug!("[physics] update_item on unknown body (shape {})", entity.id);
            return;
        };
        body.set_translation(Vector::new(entity.center[0], entity.center[1]), true);
        body.set_rotation(Rotation::from_angle(entity.rotation), true);
        body.set_linvel(Vector::new(0.0, 0.0), true);
        body.set_angvel(0.0, true);

        if let Some(collider) = self.collider_set.get_mut(entity.collider_handle) {
            collider.set_shape(collider_shape(entity.kind, entity.size));
        }
    }

    /// Current center and rotation of a body.
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<([f32; 2], f32)> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            ([pos.x, pos.y], body.rotation().angle())
        })
    }

    /// Current linear velocity of a body.
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<[f32; 2]> {
        self.rigid_body_set.get(handle).map(|body| {
            let vel = body.linvel();
            [vel.x, vel.y]
        })
    }

    /// Advances the simulation by one step of the current timestep.
    pub fn step(&mut self) {
        let collector = EventCollector::default();

        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &collector,
        );
        self.frame += 1;

        for event in collector.events.into_inner() {
            let contact = match event {
                CollisionEvent::Started(h1, h2, _flags) => {
                    Contact::Began(self.contact_target(h1), self.contact_target(h2))
                }
                CollisionEvent::Stopped(h1, h2, _flags) => {
                    Contact::Ended(self.contact_target(h1), self.contact_target(h2))
                }
            };
            self.observer.on_contact(&contact);
        }
    }

    /// Advances the simulation by `dt` seconds without changing the
    /// configured timestep. Non-positive or non-finite values are ignored.
    pub fn step_dt(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            tracing::debug!("[physics] Ignoring step with dt={}", dt);
            return;
        }
        let configured = std::mem::replace(&mut self.integration_parameters.dt, dt);
        self.step();
        self.integration_parameters.dt = configured;
    }

    /// Advances the physics simulation by multiple steps.
    pub fn step_n(&mut self, n: u32) {
        for _ in 0..n {
            self.step();
        }
    }

    fn contact_target(&self, handle: ColliderHandle) -> ContactTarget {
        self.collider_set
            .get(handle)
            .and_then(|collider| collider.parent())
            .map_or(ContactTarget::Boundary, ContactTarget::Body)
    }

    /// Computes a hash of body poses and velocities, used to compare runs.
    pub fn compute_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.frame.hash(&mut hasher);

        for (handle, body) in self.rigid_body_set.iter() {
            let (index, generation) = handle.into_raw_parts();
            index.hash(&mut hasher);
            generation.hash(&mut hasher);

            let pos = body.translation();
            hash_f32(pos.x, &mut hasher);
            hash_f32(pos.y, &mut hasher);
            hash_f32(body.rotation().angle(), &mut hasher);

            let linvel = body.linvel();
            hash_f32(linvel.x, &mut hasher);
            hash_f32(linvel.y, &mut hasher);
            hash_f32(body.angvel(), &mut hasher);
        }

        hasher.finish()
    }

    /// Returns the current simulation frame number.
    pub fn current_frame(&self) -> u64 {
        self.frame
    }
}

/// Hashes a f32 value by converting to bits.
fn hash_f32(value: f32, hasher: &mut impl Hasher) {
    value.to_bits().hash(hasher);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::shape::SPAWN_SIZE;

    const BOUNDS: [f32; 2] = [400.0, 800.0];
    const SIZE: [f32; 2] = [SPAWN_SIZE, SPAWN_SIZE];

    #[test]
    fn test_world_creation() {
        let world = PhysicsWorld::new(BOUNDS);
        assert_eq!(world.current_frame(), 0);
        assert_eq!(world.integration_parameters.dt, PHYSICS_DT);
        assert_eq!(world.bounds(), BOUNDS);
        // four boundary walls
        assert_eq!(world.collider_set.len(), 4);
    }

    #[test]
    fn test_spawn_membership_by_kind() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (circle, _) = world.spawn(ShapeKind::Circle, [100.0, 100.0], SIZE);
        let (square, _) = world.spawn(ShapeKind::Square, [300.0, 100.0], SIZE);

        for handle in [circle, square] {
            assert!(world.contains(handle, Track::Gravity));
            assert!(world.contains(handle, Track::Collision));
        }
        assert!(world.contains(circle, Track::Elasticity));
        assert!(!world.contains(circle, Track::Density));
        assert!(world.contains(square, Track::Density));
        assert!(!world.contains(square, Track::Elasticity));
    }

    #[test]
    fn test_material_tracks_configure_colliders() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (_, circle) = world.spawn(ShapeKind::Circle, [100.0, 100.0], SIZE);
        let (_, square) = world.spawn(ShapeKind::Square, [300.0, 100.0], SIZE);

        let circle = world.collider_set.get(circle).unwrap();
        assert_eq!(circle.restitution(), ELASTICITY);
        assert_eq!(circle.density(), TRACK_DENSITY);
        assert_eq!(circle.friction(), RESISTANCE);

        let square = world.collider_set.get(square).unwrap();
        assert_eq!(square.restitution(), 0.0);
        assert_eq!(square.density(), TRACK_DENSITY);
    }

    #[test]
    fn test_add_remove_idempotent() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (body, collider) = world.spawn(ShapeKind::Square, [200.0, 200.0], SIZE);

        world.remove(body, Track::Gravity);
        world.remove(body, Track::Gravity);
        assert!(!world.contains(body, Track::Gravity));
        assert_eq!(world.get_gravity_scale(body), Some(0.0));

        world.add(body, Track::Gravity);
        world.add(body, Track::Gravity);
        assert!(world.contains(body, Track::Gravity));
        assert_eq!(world.get_gravity_scale(body), Some(1.0));

        world.remove(body, Track::Collision);
        assert!(!world.collider_set.get(collider).unwrap().is_enabled());
        world.add(body, Track::Collision);
        assert!(world.collider_set.get(collider).unwrap().is_enabled());
    }

    #[test]
    fn test_unknown_handle_is_ignored() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let handle = RigidBodyHandle::invalid();
        world.add(handle, Track::Gravity);
        world.remove(handle, Track::Collision);
        assert!(!world.contains(handle, Track::Gravity));
        assert!(world.membership(handle).is_none());
    }

    #[test]
    fn test_body_falls_then_stays_in_bounds() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (body, _) = world.spawn(ShapeKind::Circle, [200.0, 300.0], SIZE);

        let mut last_y = world.body_pose(body).unwrap().0[1];
        for _ in 0..20 {
            world.step();
            let y = world.body_pose(body).unwrap().0[1];
            assert!(y > last_y, "expected downward motion: {y} <= {last_y}");
            last_y = y;
        }

        for _ in 0..600 {
            world.step();
            let ([x, y], _) = world.body_pose(body).unwrap();
            assert!(y <= BOUNDS[1] - 50.0 + 5.0, "escaped through the floor: {y}");
            assert!(y >= 50.0 - 5.0, "escaped through the ceiling: {y}");
            assert!(x >= 45.0 && x <= BOUNDS[0] - 45.0);
        }
    }

    #[test]
    fn test_square_comes_to_rest_on_floor() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (body, _) = world.spawn(ShapeKind::Square, [200.0, 600.0], SIZE);
        world.step_n(300);
        let ([_, y], _) = world.body_pose(body).unwrap();
        assert!((y - 750.0).abs() < 3.0, "square at {y}");
    }

    #[test]
    fn test_no_gravity_keeps_body_still() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (body, _) = world.spawn(ShapeKind::Square, [200.0, 300.0], SIZE);
        world.remove(body, Track::Gravity);
        world.step_n(30);
        let ([_, y], _) = world.body_pose(body).unwrap();
        assert!((y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_update_item_resyncs_pose_and_velocity() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (body, collider) = world.spawn(ShapeKind::Square, [200.0, 300.0], SIZE);
        world.step_n(10);
        assert!(world.body_velocity(body).unwrap()[1] > 0.0);

        let mut entity = ShapeEntity::new(
            0,
            ShapeKind::Square,
            [120.0, 140.0],
            [60.0, 60.0],
            crate::shape::Color::rgb(0, 0, 0),
            body,
            collider,
        );
        entity.rotation = 0.5;
        world.update_item(&entity);

        let (center, rotation) = world.body_pose(body).unwrap();
        assert_eq!(center, [120.0, 140.0]);
        assert!((rotation - 0.5).abs() < 1e-5);
        assert_eq!(world.body_velocity(body), Some([0.0, 0.0]));

        let cuboid = world
            .collider_set
            .get(collider)
            .unwrap()
            .shape()
            .as_cuboid()
            .unwrap();
        assert!((cuboid.half_extents.x - 30.0).abs() < 1e-5);
    }

    #[test]
    fn test_step_dt_rejects_bad_values() {
        let mut world = PhysicsWorld::new(BOUNDS);
        world.step_dt(0.0);
        world.step_dt(-1.0);
        world.step_dt(f32::NAN);
        assert_eq!(world.current_frame(), 0);
        world.step_dt(1.0 / 120.0);
        assert_eq!(world.current_frame(), 1);
        assert_eq!(world.integration_parameters.dt, PHYSICS_DT);
    }

    #[test]
    fn test_step_dt_advances_by_given_time() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (body, _) = world.spawn(ShapeKind::Square, [200.0, 300.0], SIZE);
        world.step_dt(0.1);
        // one explicit step under gravity 1000 yields v = g * dt
        let [_, vy] = world.body_velocity(body).unwrap();
        assert!((vy - 100.0).abs() < 1e-2, "vy={vy}");

        world.step();
        let [_, vy] = world.body_velocity(body).unwrap();
        assert!((vy - 100.0 - 1000.0 * PHYSICS_DT).abs() < 1e-2, "vy={vy}");
    }

    #[test]
    fn test_squares_stack_without_overlap() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (bottom, _) = world.spawn(ShapeKind::Square, [200.0, 740.0], SIZE);
        world.step_n(60);
        let (top, _) = world.spawn(ShapeKind::Square, [200.0, 300.0], SIZE);
        world.step_n(300);

        let ([_, y_bottom], _) = world.body_pose(bottom).unwrap();
        let ([_, y_top], _) = world.body_pose(top).unwrap();
        assert!((y_bottom - 750.0).abs() < 3.0, "bottom at {y_bottom}");
        assert!(
            y_top + 50.0 <= y_bottom - 50.0 + 3.0,
            "top {y_top} sank into bottom {y_bottom}"
        );
        assert!(y_top > 600.0, "top never landed: {y_top}");
    }

    #[test]
    fn test_circle_bounces_off_floor() {
        let mut world = PhysicsWorld::new(BOUNDS);
        let (body, _) = world.spawn(ShapeKind::Circle, [200.0, 500.0], SIZE);

        let mut falling = false;
        let mut bounced = false;
        for _ in 0..120 {
            world.step();
            let [_, vy] = world.body_velocity(body).unwrap();
            if vy > 0.0 {
                falling = true;
            } else if falling && vy < 0.0 {
                bounced = true;
                break;
            }
        }
        assert!(bounced, "circle never rebounded");

        // rebound keeps most of the impact speed
        let [_, vy] = world.body_velocity(body).unwrap();
        assert!(vy < -400.0, "weak rebound vy={vy}");
    }

    #[test]
    fn test_observer_sees_boundary_contact() {
        struct Counter(Arc<AtomicUsize>);
        impl CollisionObserver for Counter {
            fn on_contact(&mut self, contact: &Contact) {
                if let Contact::Began(a, b) = contact {
                    if *a == ContactTarget::Boundary || *b == ContactTarget::Boundary {
                        self.0.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
        }

        let hits = Arc::new(AtomicUsize::new(0));
        let mut world = PhysicsWorld::new(BOUNDS);
        world.set_observer(Box::new(Counter(hits.clone())));
        world.spawn(ShapeKind::Square, [200.0, 600.0], SIZE);
        world.step_n(120);
        assert!(hits.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_deterministic_simulation() {
        let run = || {
            let mut world = PhysicsWorld::new(BOUNDS);
            world.spawn(ShapeKind::Circle, [150.0, 200.0], SIZE);
            world.spawn(ShapeKind::Square, [220.0, 400.0], SIZE);
            world.step_n(100);
            world.compute_hash()
        };
        assert_eq!(run(), run());
    }

    impl PhysicsWorld {
        fn get_gravity_scale(&self, handle: RigidBodyHandle) -> Option<f32> {
            self.rigid_body_set.get(handle).map(RigidBody::gravity_scale)
        }
    }
}
