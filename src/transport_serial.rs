use std::io::Write;

use serialport::SerialPort;

use crate::{
    error::LinkError,
    transport::{Endpoint, Link, LinkTransport},
};

pub struct SerialLink {
    port: Option<Box<dyn SerialPort>>,
}

impl Link for SerialLink {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| LinkError::Write("link is closed".into()))?;
        port.write_all(bytes)
            .and_then(|_| port.flush())
            .map_err(|e| LinkError::Write(e.to_string()))
    }

    fn close(&mut self) {
        self.port = None;
    }
}

/// Serial-port transport for the rig firmware.
#[derive(Debug, Default)]
pub struct SerialTransport;

impl LinkTransport for SerialTransport {
    type Link = SerialLink;

    fn open(&mut self, endpoint: &Endpoint) -> Result<SerialLink, LinkError> {
        let port = serialport::new(endpoint.path.as_str(), endpoint.baud)
            .timeout(endpoint.timeout)
            .open()
            .map_err(|e| LinkError::Open(e.to_string()))?;

        Ok(SerialLink { port: Some(port) })
    }
}
