pub mod channel;
pub mod config;
pub mod control_loop;
pub mod conversion;
pub mod error;
pub mod model;
pub mod policy;
pub mod pose;
#[cfg(feature = "python")]
pub mod python;
pub mod sequence;
pub mod transport;
pub mod transport_serial;

pub use channel::{ChannelConfig, CommandChannel, CommandSink};
pub use config::{Config, ControlConfig, SerialConfig, VisionConfig};
pub use control_loop::{start_control_loop, ControlLoopConfig, ControlLoopHandle};
pub use conversion::{observation_from_frame, steps_from_action, OBSERVATION_LEN};
pub use error::{ChannelError, ConfigError, LinkError, SequenceError};
pub use model::{Command, MotorId};
pub use policy::{IdlePolicy, Policy};
pub use pose::{CenterPoseSource, Keypoint, PoseFrame, PosePoints, PoseSource};
pub use sequence::{load_sequence, play_sequence, SequenceStep};
pub use transport::{Endpoint, Link, LinkTransport};
pub use transport_serial::{SerialLink, SerialTransport};
