use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stepper_rig_controller::{
    load_sequence, play_sequence, start_control_loop, CenterPoseSource, ChannelConfig, Command,
    CommandChannel, Config, ControlLoopConfig, IdlePolicy, SerialTransport,
};

#[derive(Parser, Debug)]
#[command(name = "rig-ctl", about = "Drive the marionette rig over its serial link")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Play a movement sequence from a JSON file and exit
    #[arg(long)]
    sequence: Option<String>,

    /// Trigger the homing routine and exit
    #[arg(long)]
    home: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config).with_context(|| format!("loading {}", args.config))?;

    // Structural problems in the sequence must surface before the rig is
    // touched, so load it ahead of connecting.
    let sequence = match args.sequence.as_deref() {
        Some(path) => {
            Some(load_sequence(path).with_context(|| format!("loading sequence {path}"))?)
        }
        None => None,
    };

    let channel_cfg = ChannelConfig {
        motor_count: cfg.control.motor_count,
        ..ChannelConfig::default()
    };
    info!(port = %cfg.serial.port, "connecting to rig");
    let channel = CommandChannel::with_config(SerialTransport, cfg.serial.endpoint(), channel_cfg);

    if let Some(steps) = sequence {
        play_sequence(&channel, &steps);
        channel.close();
        return Ok(());
    }

    if args.home {
        let result = channel.send(&Command::HomeAll);
        channel.close();
        return result.context("homing the rig");
    }

    live_mode(channel, &cfg)
}

/// Observation-only loop: centre-placeholder pose source and an idle policy,
/// reporting observations once a second until ctrl-c.
fn live_mode(channel: CommandChannel<SerialTransport>, cfg: &Config) -> Result<()> {
    if cfg.vision.use_keypoints {
        info!(
            camera_index = cfg.vision.camera_index,
            "keypoint extraction runs out of process; using centre placeholder observations"
        );
    }

    let channel = Arc::new(channel);
    let loop_cfg = ControlLoopConfig {
        tick_period: Duration::from_millis(cfg.control.tick_ms),
        step_scale: cfg.control.step_scale,
        motor_count: cfg.control.motor_count,
        ..ControlLoopConfig::default()
    };
    let handle = start_control_loop(
        Arc::clone(&channel),
        CenterPoseSource::new(640.0, 480.0),
        IdlePolicy { motor_count: cfg.control.motor_count as usize },
        loop_cfg,
    );

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("installing ctrl-c handler")?;

    info!("live control loop started; press ctrl-c to exit");
    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_secs(1));
        if let Some(obs) = handle.last_observation() {
            info!(?obs, "observed keypoints");
        }
    }

    info!("shutting down");
    handle.close();
    channel.close();
    Ok(())
}
