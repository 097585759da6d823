use std::{
    sync::{Mutex, MutexGuard},
    thread,
    time::Duration,
};

use tracing::{info, warn};

use crate::{
    error::{ChannelError, LinkError},
    model::Command,
    transport::{Endpoint, Link, LinkTransport},
};

/// Tunables for the reconnect state machine. The backoff is fixed, no
/// jitter and no exponential growth; it tracks device replug latency.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    pub reconnect_backoff: Duration,
    pub motor_count: u8,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { reconnect_backoff: Duration::from_secs(2), motor_count: 6 }
    }
}

enum LinkState<L> {
    Disconnected,
    Connected(L),
}

struct ChannelCore<T: LinkTransport> {
    transport: T,
    endpoint: Endpoint,
    backoff: Duration,
    state: LinkState<T::Link>,
}

/// Seam between command producers (sequence player, control loop) and the
/// channel, so producers can be driven against a recording fake.
pub trait CommandSink {
    fn send(&self, command: &Command) -> Result<(), ChannelError>;
}

/// Reconnect-aware command sender.
///
/// Every accepted command is written to an open link in submission order, or
/// the caller gets `SendFailed` after one reconnect-and-retry cycle.
/// Transient disconnects are absorbed here: a failed write drops the link,
/// reconnects (unbounded, fixed backoff) and retries the write exactly once.
/// Concurrent callers are serialized by an internal mutex so writes never
/// interleave mid-command; there is no priority scheme.
pub struct CommandChannel<T: LinkTransport> {
    core: Mutex<ChannelCore<T>>,
    motor_count: u8,
}

impl<T: LinkTransport> CommandChannel<T> {
    /// Connects with default tunables. Blocks until the first open succeeds;
    /// a rig that is not plugged in yet is waited for, not reported.
    pub fn connect(transport: T, endpoint: Endpoint) -> Self {
        Self::with_config(transport, endpoint, ChannelConfig::default())
    }

    pub fn with_config(transport: T, endpoint: Endpoint, cfg: ChannelConfig) -> Self {
        let mut core = ChannelCore {
            transport,
            endpoint,
            backoff: cfg.reconnect_backoff,
            state: LinkState::Disconnected,
        };
        core.ensure_connected();

        Self { core: Mutex::new(core), motor_count: cfg.motor_count }
    }

    /// Serializes `command` and writes it to the link, reconnecting first if
    /// the channel is disconnected. On a write failure the link is dropped,
    /// reconnected and the write retried once; a second failure drops the
    /// command and returns `SendFailed`.
    pub fn send(&self, command: &Command) -> Result<(), ChannelError> {
        if let Command::MoveMotor { motor, .. } = command {
            if motor.0 < 1 || motor.0 > self.motor_count {
                return Err(ChannelError::InvalidMotor(motor.0, self.motor_count));
            }
        }

        let bytes = command.encode();
        let mut core = self.lock_core();
        core.ensure_connected();

        match core.write(&bytes) {
            Ok(()) => return Ok(()),
            Err(e) => warn!(error = %e, "lost connection, reconnecting"),
        }

        core.drop_link();
        core.ensure_connected();
        match core.write(&bytes) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "write failed again after reconnect, dropping command");
                core.drop_link();
                Err(ChannelError::SendFailed)
            }
        }
    }

    /// Closes the link if one is open. Idempotent; the next `send` will
    /// reconnect.
    pub fn close(&self) {
        self.lock_core().drop_link();
    }

    fn lock_core(&self) -> MutexGuard<'_, ChannelCore<T>> {
        self.core.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl<T: LinkTransport> CommandSink for CommandChannel<T> {
    fn send(&self, command: &Command) -> Result<(), ChannelError> {
        CommandChannel::send(self, command)
    }
}

impl<T: LinkTransport> ChannelCore<T> {
    /// Disconnected -> Connected, retrying forever. A disconnected rig is
    /// expected to be replugged by an operator. Callers that need a bounded
    /// wait must wrap the channel on their own thread.
    fn ensure_connected(&mut self) {
        while matches!(self.state, LinkState::Disconnected) {
            match self.transport.open(&self.endpoint) {
                Ok(link) => {
                    info!(port = %self.endpoint.path, "connected");
                    self.state = LinkState::Connected(link);
                }
                Err(e) => {
                    warn!(
                        port = %self.endpoint.path,
                        error = %e,
                        backoff_s = self.backoff.as_secs_f64(),
                        "open failed, retrying"
                    );
                    thread::sleep(self.backoff);
                }
            }
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        match &mut self.state {
            LinkState::Connected(link) => link.write_bytes(bytes),
            LinkState::Disconnected => Err(LinkError::Write("link is not open".into())),
        }
    }

    fn drop_link(&mut self) {
        if let LinkState::Connected(link) = &mut self.state {
            link.close();
        }
        self.state = LinkState::Disconnected;
    }
}
