//! Per-gesture state with resettable accumulators.

use std::f32::consts::{PI, TAU};

use super::GesturePhase;

/// Pan state. `translation()` is the motion since the last reset.
#[derive(Debug, Clone, Default)]
pub struct PanRecognizer {
    phase: GesturePhase,
    anchor: [f32; 2],
    current: [f32; 2],
}

impl PanRecognizer {
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn translation(&self) -> [f32; 2] {
        [
            self.current[0] - self.anchor[0],
            self.current[1] - self.anchor[1],
        ]
    }

    /// Redefines the accumulated translation, usually to zero after applying it.
    pub fn set_translation(&mut self, translation: [f32; 2]) {
        self.anchor = [
            self.current[0] - translation[0],
            self.current[1] - translation[1],
        ];
    }

    pub(crate) fn begin(&mut self, origin: [f32; 2], current: [f32; 2]) {
        self.anchor = origin;
        self.current = current;
        self.phase = GesturePhase::Began;
    }

    pub(crate) fn track(&mut self, point: [f32; 2]) {
        self.current = point;
        self.phase = GesturePhase::Changed;
    }

    /// Moves the reference point without producing translation, for when
    /// the pointer centroid jumps because a finger was added or lifted.
    pub(crate) fn rebase(&mut self, point: [f32; 2]) {
        self.anchor[0] += point[0] - self.current[0];
        self.anchor[1] += point[1] - self.current[1];
        self.current = point;
    }

    pub(crate) fn finish(&mut self, phase: GesturePhase) {
        self.phase = phase;
    }
}

/// Pinch state. `scale()` is the finger distance ratio since the last reset.
#[derive(Debug, Clone, Default)]
pub struct PinchRecognizer {
    phase: GesturePhase,
    reference: f32,
    current: f32,
}

impl PinchRecognizer {
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn scale(&self) -> f32 {
        if self.reference > f32::EPSILON {
            self.current / self.reference
        } else {
            1.0
        }
    }

    /// Redefines the accumulated scale, usually to 1 after applying it.
    pub fn set_scale(&mut self, scale: f32) {
        if scale > f32::EPSILON && scale.is_finite() {
            self.reference = self.current / scale;
        }
    }

    pub(crate) fn begin(&mut self, distance: f32) {
        self.reference = distance;
        self.current = distance;
        self.phase = GesturePhase::Began;
    }

    pub(crate) fn track(&mut self, distance: f32) {
        self.current = distance;
        self.phase = GesturePhase::Changed;
    }

    pub(crate) fn finish(&mut self, phase: GesturePhase) {
        self.phase = phase;
    }
}

/// Rotation state. `rotation()` is the angle turned since the last reset, in radians.
#[derive(Debug, Clone, Default)]
pub struct RotationRecognizer {
    phase: GesturePhase,
    reference: f32,
    /// Unwrapped angle, so crossing ±π does not jump by a full turn.
    current: f32,
    last_raw: f32,
}

impl RotationRecognizer {
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn rotation(&self) -> f32 {
        self.current - self.reference
    }

    /// Redefines the accumulated rotation, usually to 0 after applying it.
    pub fn set_rotation(&mut self, rotation: f32) {
        self.reference = self.current - rotation;
    }

    pub(crate) fn begin(&mut self, angle: f32) {
        self.reference = angle;
        self.current = angle;
        self.last_raw = angle;
        self.phase = GesturePhase::Began;
    }

    pub(crate) fn track(&mut self, angle: f32) {
        self.current += wrap_angle(angle - self.last_raw);
        self.last_raw = angle;
        self.phase = GesturePhase::Changed;
    }

    pub(crate) fn finish(&mut self, phase: GesturePhase) {
        self.phase = phase;
    }
}

/// Wraps an angle into `(-π, π]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
