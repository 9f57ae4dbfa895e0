//! Gesture recognition: raw pointer events in, manipulation phases out.
//!
//! The interpreter turns pointer down/move/up/cancel events into taps and
//! into pan, pinch and rotate gestures targeted at a shape. Each continuous
//! gesture walks through `Began -> Changed* -> Ended` (or `Cancelled`) and
//! keeps an accumulator the handler resets after consuming it.

mod interpreter;
mod recognizer;

use serde::{Deserialize, Serialize};

pub use interpreter::{
    GestureEvent, GestureInterpreter, PointerEvent, PointerId, PointerPhase, TAP_SLOP,
};
pub use recognizer::{PanRecognizer, PinchRecognizer, RotationRecognizer};

/// Lifecycle of one gesture instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// `Began` or `Changed`.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }
}

/// Class of a gesture, used for arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Tap,
    Pan,
    Pinch,
    Rotate,
    LongPress,
}

/// Whether two gestures may be recognized at the same time.
///
/// A long press is exclusive with everything; every other pairing is allowed,
/// on the same target or on different ones.
pub fn should_recognize_simultaneously(first: GestureKind, second: GestureKind) -> bool {
    first != GestureKind::LongPress && second != GestureKind::LongPress
}
