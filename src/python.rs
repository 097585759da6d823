use std::{sync::Mutex, time::Duration};

use pyo3::prelude::*;

use crate::{
    channel::{ChannelConfig, CommandChannel},
    model::{Command, MotorId},
    sequence::{load_sequence, play_sequence},
    transport::Endpoint,
    transport_serial::SerialTransport,
};

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyRuntimeError::new_err(e.to_string())
}

/// Serial rig channel for the external Python trainer.
#[pyclass]
pub struct RigPyController {
    channel: Mutex<Option<CommandChannel<SerialTransport>>>,
}

#[pymethods]
impl RigPyController {
    /// Blocks until the rig is reachable, like the native channel.
    #[staticmethod]
    #[pyo3(signature = (port, baudrate=None, timeout_ms=None, motor_count=None))]
    pub fn connect(
        port: String,
        baudrate: Option<u32>,
        timeout_ms: Option<u64>,
        motor_count: Option<u8>,
    ) -> Self {
        let endpoint = Endpoint {
            path: port,
            baud: baudrate.unwrap_or(115_200),
            timeout: Duration::from_millis(timeout_ms.unwrap_or(1000)),
        };
        let cfg = ChannelConfig {
            motor_count: motor_count.unwrap_or(6),
            ..ChannelConfig::default()
        };
        let channel = CommandChannel::with_config(SerialTransport, endpoint, cfg);

        Self { channel: Mutex::new(Some(channel)) }
    }

    pub fn move_motor(&self, motor: u8, steps: i32) -> PyResult<()> {
        self.with_channel(|channel| {
            channel
                .send(&Command::MoveMotor { motor: MotorId(motor), steps })
                .map_err(to_py_err)
        })
    }

    pub fn home_all(&self) -> PyResult<()> {
        self.with_channel(|channel| channel.send(&Command::HomeAll).map_err(to_py_err))
    }

    pub fn play_sequence(&self, path: String) -> PyResult<()> {
        self.with_channel(|channel| {
            let steps = load_sequence(&path).map_err(to_py_err)?;
            play_sequence(channel, &steps);
            Ok(())
        })
    }

    pub fn close(&self) {
        if let Ok(mut guard) = self.channel.lock() {
            if let Some(channel) = guard.as_ref() {
                channel.close();
            }
            *guard = None;
        }
    }
}

impl RigPyController {
    fn with_channel<R>(
        &self,
        f: impl FnOnce(&CommandChannel<SerialTransport>) -> PyResult<R>,
    ) -> PyResult<R> {
        let guard = self
            .channel
            .lock()
            .map_err(|_| pyo3::exceptions::PyRuntimeError::new_err("controller lock poisoned"))?;
        let channel = guard
            .as_ref()
            .ok_or_else(|| pyo3::exceptions::PyRuntimeError::new_err("controller is closed"))?;
        f(channel)
    }
}

#[pymodule]
fn stepper_rig_controller_py(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<RigPyController>()?;
    Ok(())
}
