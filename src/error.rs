use thiserror::Error;

/// Transport-level failures. Always assumed transient; the channel absorbs
/// these and reconnects rather than aborting.
#[derive(Debug, Error, Clone)]
pub enum LinkError {
    #[error("failed to open serial device: {0}")]
    Open(String),
    #[error("write to serial device failed: {0}")]
    Write(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Surfaced only after one reconnect-and-retry cycle has failed.
    /// The command was dropped; resending is the caller's call.
    #[error("command dropped after reconnect and retry")]
    SendFailed,
    #[error("motor id {0} outside configured range 1..={1}")]
    InvalidMotor(u8, u8),
    #[error("control loop closed")]
    Closed,
}

/// Structural problems in a sequence file. Fatal for the whole sequence,
/// surfaced before any command is sent.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("failed to read sequence file: {0}")]
    Io(#[from] std::io::Error),
    #[error("sequence file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sequence must be a list of steps")]
    NotAList,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
