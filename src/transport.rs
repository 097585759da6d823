use std::time::Duration;

use crate::error::LinkError;

/// Addressing and timing for the serial device. Immutable once built; used
/// only to (re)open links.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub path: String,
    pub baud: u32,
    pub timeout: Duration,
}

/// An open, live connection to the rig.
pub trait Link: Send + 'static {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LinkError>;

    /// Idempotent; safe on an already-closed link.
    fn close(&mut self);
}

/// Opens links. Exactly one attempt per call; retry policy belongs to the
/// command channel, which keeps this seam deterministic to fake in tests.
pub trait LinkTransport: Send + 'static {
    type Link: Link;

    fn open(&mut self, endpoint: &Endpoint) -> Result<Self::Link, LinkError>;
}
