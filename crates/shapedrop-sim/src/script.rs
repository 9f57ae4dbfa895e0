//! Session scripts: a recorded sequence of taps, pointer events and ticks.

use serde::{Deserialize, Serialize};
use shapedrop_core::{PointerEvent, Scene, SceneConfig, SceneSnapshot};

use crate::error::SimError;

/// One scripted input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Spawn a random shape at a point, as a completed tap would.
    Tap([f32; 2]),
    /// Raw pointer input routed through the gesture interpreter.
    Pointer(PointerEvent),
    /// Advance the simulation by this many steps.
    Step(u32),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: SceneConfig,
    pub actions: Vec<Action>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let script: Self = serde_json::from_str(json).map_err(SimError::Script)?;
        script.config.validate()?;
        Ok(script)
    }

    /// Built-in session used when no script path is given.
    pub fn demo() -> Result<Self, SimError> {
        const DEMO_SCRIPT_JSON: &str = include_str!("../scripts/demo.json");
        Self::from_json(DEMO_SCRIPT_JSON)
    }

    /// Plays every action against a fresh scene and returns the final snapshot.
    pub fn run(&self) -> Result<SceneSnapshot, SimError> {
        let mut scene = Scene::new(self.config.clone())?;

        for (index, action) in self.actions.iter().enumerate() {
            match action {
                Action::Tap(location) => {
                    scene.tap(*location);
                }
                Action::Pointer(event) => {
                    let gestures = scene.handle_pointer(*event);
                    for gesture in gestures {
                        tracing::debug!("[sim] action {}: {:?}", index, gesture);
                    }
                }
                Action::Step(n) => scene.step_n(*n),
            }
        }

        let snapshot = scene.snapshot();
        tracing::info!(
            "[sim] Finished {} actions: {} shapes at frame {}",
            self.actions.len(),
            snapshot.shapes.len(),
            snapshot.frame
        );
        Ok(snapshot)
    }
}
