use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{runtime::Runtime, sync::mpsc, time};
use tracing::warn;

use crate::{
    channel::CommandSink,
    conversion::{observation_from_frame, steps_from_action},
    error::ChannelError,
    model::{Command, MotorId},
    policy::Policy,
    pose::PoseSource,
};

#[derive(Debug, Clone, Copy)]
pub struct ControlLoopConfig {
    pub tick_period: Duration,
    pub step_scale: f64,
    pub motor_count: u8,
    pub channel_capacity: usize,
}

impl Default for ControlLoopConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(100),
            step_scale: 100.0,
            motor_count: 6,
            channel_capacity: 32,
        }
    }
}

pub struct ControlLoopHandle {
    tx: mpsc::Sender<Command>,
    last_observation: Arc<Mutex<Option<Vec<f64>>>>,
    stop: Arc<Mutex<bool>>,
}

impl ControlLoopHandle {
    /// Forward a manual command (e.g. `HomeAll`) through the loop's sink
    /// between ticks.
    pub fn push(&self, command: Command) -> Result<(), ChannelError> {
        self.tx.blocking_send(command).map_err(|_| ChannelError::Closed)
    }

    /// Most recent observation vector, `None` until the first tick completes.
    pub fn last_observation(&self) -> Option<Vec<f64>> {
        self.last_observation.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn close(&self) {
        if let Ok(mut stop) = self.stop.lock() {
            *stop = true;
        }
    }
}

/// Spawns the closed-loop controller on a dedicated thread: every tick,
/// pull a pose frame, ask the policy for an action and feed the resulting
/// motor moves to the sink. Send failures are logged and the loop keeps
/// going; while the channel reconnects, the tick that hit it stalls.
pub fn start_control_loop<S, P, Q>(
    sink: Arc<S>,
    mut pose_source: P,
    mut policy: Q,
    cfg: ControlLoopConfig,
) -> ControlLoopHandle
where
    S: CommandSink + Send + Sync + 'static,
    P: PoseSource,
    Q: Policy,
{
    let (tx, mut rx) = mpsc::channel::<Command>(cfg.channel_capacity);
    let stop = Arc::new(Mutex::new(false));
    let stop_clone = Arc::clone(&stop);

    let last_observation = Arc::new(Mutex::new(None));
    let last_observation_clone = Arc::clone(&last_observation);

    std::thread::spawn(move || {
        Runtime::new().expect("tokio runtime").block_on(async move {
            let mut interval = time::interval(cfg.tick_period);

            loop {
                tokio::select! {
                    Some(cmd) = rx.recv() => {
                        if let Err(e) = sink.send(&cmd) {
                            warn!("manual command failed: {e}");
                        }
                    }
                    _ = interval.tick() => {
                        let frame = pose_source.read_frame();
                        let obs = observation_from_frame(frame.as_ref());
                        if let Ok(mut guard) = last_observation_clone.lock() {
                            *guard = Some(obs.to_vec());
                        }

                        let action = policy.action(&obs);
                        for (i, value) in action.iter().take(cfg.motor_count as usize).enumerate() {
                            let steps = steps_from_action(*value, cfg.step_scale);
                            if steps == 0 {
                                continue;
                            }
                            let cmd = Command::MoveMotor { motor: MotorId(i as u8 + 1), steps };
                            if let Err(e) = sink.send(&cmd) {
                                warn!("motor command failed: {e}");
                            }
                        }
                    }
                }

                if *stop_clone.lock().unwrap_or_else(|p| p.into_inner()) {
                    break;
                }
            }
        });
    });

    ControlLoopHandle { tx, last_observation, stop }
}
