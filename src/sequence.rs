use std::{fs, path::Path, thread, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    channel::CommandSink,
    error::SequenceError,
    model::{Command, MotorId},
};

/// One timed move in a choreography. Parsing is permissive: missing `motor`
/// or `steps` default to 0 and unknown fields are ignored, tolerating
/// partially authored files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SequenceStep {
    #[serde(default)]
    pub motor: u8,
    #[serde(default)]
    pub steps: i32,
    /// Pause after this step, in seconds.
    #[serde(default)]
    pub delay: f64,
}

/// Loads a choreography from a JSON file. The top level must be an array;
/// anything else is rejected before a single command goes out.
pub fn load_sequence(path: impl AsRef<Path>) -> Result<Vec<SequenceStep>, SequenceError> {
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;

    if !value.is_array() {
        return Err(SequenceError::NotAList);
    }

    Ok(serde_json::from_value(value)?)
}

/// Replays `steps` strictly in order. A dropped command does not abort the
/// choreography; the remaining motions are independent of it. The inter-step
/// delay is a blocking sleep; the player owns its thread for the duration.
pub fn play_sequence(sink: &impl CommandSink, steps: &[SequenceStep]) {
    for step in steps {
        info!(motor = step.motor, steps = step.steps, delay_s = step.delay, "sequence step");

        let command = Command::MoveMotor { motor: MotorId(step.motor), steps: step.steps };
        if let Err(e) = sink.send(&command) {
            warn!(motor = step.motor, error = %e, "step not delivered, continuing");
        }

        if step.delay > 0.0 {
            thread::sleep(Duration::from_secs_f64(step.delay));
        }
    }
}
