//! Maps pointer events onto taps and per-shape pan/pinch/rotate gestures.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::recognizer::{PanRecognizer, PinchRecognizer, RotationRecognizer};
use super::{GestureKind, GesturePhase, should_recognize_simultaneously};
use crate::shape::ShapeId;

/// Distance a pointer may travel and still count as a tap.
pub const TAP_SLOP: f32 = 10.0;

/// Identifier of one finger / pointer for the duration of its contact.
pub type PointerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Raw input from the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub position: [f32; 2],
}

impl PointerEvent {
    pub fn new(id: PointerId, phase: PointerPhase, position: [f32; 2]) -> Self {
        Self {
            id,
            phase,
            position,
        }
    }
}

/// Recognized gesture transitions, in delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureEvent {
    Tap { location: [f32; 2] },
    Pan { target: ShapeId, phase: GesturePhase },
    Pinch { target: ShapeId, phase: GesturePhase },
    Rotate { target: ShapeId, phase: GesturePhase },
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Tap { .. } => GestureKind::Tap,
            Self::Pan { .. } => GestureKind::Pan,
            Self::Pinch { .. } => GestureKind::Pinch,
            Self::Rotate { .. } => GestureKind::Rotate,
        }
    }
}

#[derive(Debug, Clone)]
struct PointerTrack {
    target: Option<ShapeId>,
    origin: [f32; 2],
    position: [f32; 2],
    beyond_slop: bool,
}

/// Gestures attached to one shape.
#[derive(Debug, Clone, Default)]
struct TargetGestures {
    /// Pointers on this shape, in touch-down order.
    pointers: Vec<PointerId>,
    pan: PanRecognizer,
    pinch: PinchRecognizer,
    rotate: RotationRecognizer,
}

impl TargetGestures {
    fn active_kinds(&self) -> impl Iterator<Item = GestureKind> {
        [
            (GestureKind::Pan, self.pan.phase()),
            (GestureKind::Pinch, self.pinch.phase()),
            (GestureKind::Rotate, self.rotate.phase()),
        ]
        .into_iter()
        .filter(|(_, phase)| phase.is_active())
        .map(|(kind, _)| kind)
    }

    fn is_idle(&self) -> bool {
        self.pointers.is_empty() && self.active_kinds().next().is_none()
    }
}

/// Stateful pointer-to-gesture interpreter.
///
/// Recognizer state for a target survives until the next event after all of
/// its pointers lift, so handlers of an `Ended` event can still reach it.
#[derive(Debug, Default)]
pub struct GestureInterpreter {
    pointers: HashMap<PointerId, PointerTrack>,
    targets: BTreeMap<ShapeId, TargetGestures>,
    tap_candidate: Option<PointerId>,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one pointer event. `hit_test` resolves a position to the topmost shape under it.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        hit_test: impl Fn([f32; 2]) -> Option<ShapeId>,
    ) -> Vec<GestureEvent> {
        self.targets.retain(|_, gestures| !gestures.is_idle());

        let mut events = Vec::new();
        match event.phase {
            PointerPhase::Down => self.pointer_down(event, &hit_test, &mut events),
            PointerPhase::Move => self.pointer_move(event, true, &mut events),
            PointerPhase::Up => {
                // the lift point still counts toward gestures already in progress
                let moved = self
                    .pointers
                    .get(&event.id)
                    .is_some_and(|track| track.position != event.position);
                if moved {
                    self.pointer_move(event, false, &mut events);
                }
                self.pointer_up(event.id, GesturePhase::Ended, &mut events);
            }
            PointerPhase::Cancel => {
                self.pointer_up(event.id, GesturePhase::Cancelled, &mut events);
            }
        }
        events
    }

    pub fn pan_mut(&mut self, target: ShapeId) -> Option<&mut PanRecognizer> {
        self.targets.get_mut(&target).map(|g| &mut g.pan)
    }

    pub fn pinch_mut(&mut self, target: ShapeId) -> Option<&mut PinchRecognizer> {
        self.targets.get_mut(&target).map(|g| &mut g.pinch)
    }

    pub fn rotation_mut(&mut self, target: ShapeId) -> Option<&mut RotationRecognizer> {
        self.targets.get_mut(&target).map(|g| &mut g.rotate)
    }

    /// Number of pointers currently in contact.
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    fn can_begin(&self, kind: GestureKind) -> bool {
        self.targets
            .values()
            .flat_map(TargetGestures::active_kinds)
            .all(|active| should_recognize_simultaneously(kind, active))
    }

    fn pointer_down(
        &mut self,
        event: PointerEvent,
        hit_test: &impl Fn([f32; 2]) -> Option<ShapeId>,
        events: &mut Vec<GestureEvent>,
    ) {
        if self.pointers.contains_key(&event.id) {
            tracing::debug!("[gesture] Duplicate pointer down for {}", event.id);
            return;
        }

        let target = hit_test(event.position);
        self.pointers.insert(
            event.id,
            PointerTrack {
                target,
                origin: event.position,
                position: event.position,
                beyond_slop: false,
            },
        );
        // A second finger anywhere turns the touch into something other than a tap.
        self.tap_candidate = (self.pointers.len() == 1).then_some(event.id);

        let Some(target) = target else {
            return;
        };
        self.targets.entry(target).or_default().pointers.push(event.id);

        if self.targets[&target].pan.phase().is_active() {
            let centroid = self.centroid(target);
            if let Some(gestures) = self.targets.get_mut(&target) {
                gestures.pan.rebase(centroid);
            }
        }
        self.try_begin_two_finger(target, events);
    }

    fn pointer_move(
        &mut self,
        event: PointerEvent,
        allow_begin: bool,
        events: &mut Vec<GestureEvent>,
    ) {
        let Some(track) = self.pointers.get_mut(&event.id) else {
            tracing::debug!("[gesture] Move for unknown pointer {}", event.id);
            return;
        };
        track.position = event.position;
        if distance(track.origin, event.position) > TAP_SLOP {
            track.beyond_slop = true;
        }
        let beyond_slop = track.beyond_slop;
        let target = track.target;

        if beyond_slop && self.tap_candidate == Some(event.id) {
            self.tap_candidate = None;
        }

        let Some(target) = target else {
            return;
        };

        let centroid = self.centroid(target);
        let origin_centroid = self.origin_centroid(target);
        let pair = self.finger_pair(target);
        let pan_can_begin = self.can_begin(GestureKind::Pan);

        let Some(gestures) = self.targets.get_mut(&target) else {
            return;
        };

        if gestures.pan.phase().is_active() {
            gestures.pan.track(centroid);
            events.push(GestureEvent::Pan {
                target,
                phase: GesturePhase::Changed,
            });
        } else if allow_begin && beyond_slop && pan_can_begin {
            gestures.pan.begin(origin_centroid, centroid);
            events.push(GestureEvent::Pan {
                target,
                phase: GesturePhase::Began,
            });
        }

        if let Some((a, b)) = pair {
            if gestures.pinch.phase().is_active() {
                gestures.pinch.track(distance(a, b));
                events.push(GestureEvent::Pinch {
                    target,
                    phase: GesturePhase::Changed,
                });
            }
            if gestures.rotate.phase().is_active() {
                gestures.rotate.track(angle(a, b));
                events.push(GestureEvent::Rotate {
                    target,
                    phase: GesturePhase::Changed,
                });
            }
        }
    }

    fn pointer_up(&mut self, id: PointerId, end: GesturePhase, events: &mut Vec<GestureEvent>) {
        let Some(track) = self.pointers.remove(&id) else {
            tracing::debug!("[gesture] Lift for unknown pointer {}", id);
            return;
        };

        if self.tap_candidate == Some(id) {
            self.tap_candidate = None;
            if end == GesturePhase::Ended && !track.beyond_slop {
                events.push(GestureEvent::Tap {
                    location: track.origin,
                });
            }
        }

        let Some(target) = track.target else {
            return;
        };
        let Some(gestures) = self.targets.get_mut(&target) else {
            return;
        };
        gestures.pointers.retain(|&pointer| pointer != id);
        let remaining = gestures.pointers.len();

        if remaining < 2 {
            if gestures.pinch.phase().is_active() {
                gestures.pinch.finish(end);
                events.push(GestureEvent::Pinch { target, phase: end });
            }
            if gestures.rotate.phase().is_active() {
                gestures.rotate.finish(end);
                events.push(GestureEvent::Rotate { target, phase: end });
            }
        }

        if gestures.pan.phase().is_active() {
            if remaining == 0 {
                gestures.pan.finish(end);
                events.push(GestureEvent::Pan { target, phase: end });
            } else {
                let centroid = self.centroid(target);
                if let Some(gestures) = self.targets.get_mut(&target) {
                    gestures.pan.rebase(centroid);
                }
            }
        }
    }

    /// Starts pinch and rotate once a second finger lands on the same shape.
    fn try_begin_two_finger(&mut self, target: ShapeId, events: &mut Vec<GestureEvent>) {
        let Some((a, b)) = self.finger_pair(target) else {
            return;
        };
        let pinch_allowed = self.can_begin(GestureKind::Pinch);
        let rotate_allowed = self.can_begin(GestureKind::Rotate);
        let Some(gestures) = self.targets.get_mut(&target) else {
            return;
        };

        if pinch_allowed && !gestures.pinch.phase().is_active() {
            gestures.pinch.begin(distance(a, b));
            events.push(GestureEvent::Pinch {
                target,
                phase: GesturePhase::Began,
            });
        }
        if rotate_allowed && !gestures.rotate.phase().is_active() {
            gestures.rotate.begin(angle(a, b));
            events.push(GestureEvent::Rotate {
                target,
                phase: GesturePhase::Began,
            });
        }
    }

    /// Positions of the first two pointers on a target.
    fn finger_pair(&self, target: ShapeId) -> Option<([f32; 2], [f32; 2])> {
        let gestures = self.targets.get(&target)?;
        let mut positions = gestures
            .pointers
            .iter()
            .filter_map(|id| self.pointers.get(id))
            .map(|track| track.position);
        Some((positions.next()?, positions.next()?))
    }

    fn centroid(&self, target: ShapeId) -> [f32; 2] {
        self.mean(target, |track| track.position)
    }

    fn origin_centroid(&self, target: ShapeId) -> [f32; 2] {
        self.mean(target, |track| track.origin)
    }

    fn mean(&self, target: ShapeId, pick: impl Fn(&PointerTrack) -> [f32; 2]) -> [f32; 2] {
        let Some(gestures) = self.targets.get(&target) else {
            return [0.0, 0.0];
        };
        let mut sum = [0.0, 0.0];
        let mut count = 0u16;
        for track in gestures.pointers.iter().filter_map(|id| self.pointers.get(id)) {
            let point = pick(track);
            sum[0] += point[0];
            sum[1] += point[1];
            count += 1;
        }
        if count == 0 {
            return sum;
        }
        let count = f32::from(count);
        [sum[0] / count, sum[1] / count]
    }
}

fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

fn angle(a: [f32; 2], b: [f32; 2]) -> f32 {
    (b[1] - a[1]).atan2(b[0] - a[0])
}
