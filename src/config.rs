use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::{error::ConfigError, transport::Endpoint};

/// Rig configuration. Every field has a default so a partial file (or an
/// empty one) still yields a working setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub serial: SerialConfig,
    pub vision: VisionConfig,
    pub control: ControlConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baudrate: u32,
    pub timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { port: "/dev/ttyACM0".into(), baudrate: 115_200, timeout_ms: 1000 }
    }
}

impl SerialConfig {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            path: self.port.clone(),
            baud: self.baudrate,
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

/// Settings consumed by the external camera/pose pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub camera_index: u32,
    pub use_keypoints: bool,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self { camera_index: 0, use_keypoints: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub tick_ms: u64,
    pub step_scale: f64,
    pub motor_count: u8,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { tick_ms: 100, step_scale: 100.0, motor_count: 6 }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.serial.port, "/dev/ttyACM0");
        assert_eq!(cfg.serial.baudrate, 115_200);
        assert_eq!(cfg.serial.timeout_ms, 1000);
        assert_eq!(cfg.control.motor_count, 6);
        assert!(cfg.vision.use_keypoints);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: Config = toml::from_str("[serial]\nport = \"/dev/ttyUSB1\"\n").unwrap();
        assert_eq!(cfg.serial.port, "/dev/ttyUSB1");
        assert_eq!(cfg.serial.baudrate, 115_200);
        assert_eq!(cfg.control.tick_ms, 100);
    }

    #[test]
    fn endpoint_carries_timeout_in_millis() {
        let cfg: Config = toml::from_str("[serial]\ntimeout_ms = 250\n").unwrap();
        let endpoint = cfg.serial.endpoint();
        assert_eq!(endpoint.timeout, Duration::from_millis(250));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(toml::from_str::<Config>("serial = 3").is_err());
    }
}
