use std::time::Duration;

use stepper_rig_controller::{
    play_sequence, Command, CommandChannel, Endpoint, Link, LinkError, LinkTransport, SequenceStep,
};

/// Transport that echoes wire lines to stdout instead of a serial device.
struct EchoTransport;

struct EchoLink;

impl Link for EchoLink {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        print!("wire: {}", String::from_utf8_lossy(bytes));
        Ok(())
    }

    fn close(&mut self) {}
}

impl LinkTransport for EchoTransport {
    type Link = EchoLink;

    fn open(&mut self, endpoint: &Endpoint) -> Result<EchoLink, LinkError> {
        println!("opened {}", endpoint.path);
        Ok(EchoLink)
    }
}

fn main() -> anyhow::Result<()> {
    let endpoint = Endpoint {
        path: "echo".into(),
        baud: 115_200,
        timeout: Duration::from_millis(100),
    };
    let channel = CommandChannel::connect(EchoTransport, endpoint);

    channel.send(&Command::HomeAll)?;

    let steps = vec![
        SequenceStep { motor: 1, steps: 200, delay: 0.0 },
        SequenceStep { motor: 2, steps: -150, delay: 0.1 },
        SequenceStep { motor: 3, steps: 100, delay: 0.0 },
    ];
    play_sequence(&channel, &steps);

    channel.close();
    Ok(())
}
