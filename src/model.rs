#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotorId(pub u8);

/// One fire-and-forget instruction for the rig firmware. Commands carry no
/// identity and expect no response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveMotor { motor: MotorId, steps: i32 },
    HomeAll,
}

impl Command {
    /// Wire form: one ASCII line, `\n`-terminated.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Command::MoveMotor { motor, steps } => format!("M{}:{}\n", motor.0, steps).into_bytes(),
            Command::HomeAll => b"HOME\n".to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_motor_wire_form() {
        let cmd = Command::MoveMotor { motor: MotorId(1), steps: 200 };
        assert_eq!(cmd.encode(), b"M1:200\n");
    }

    #[test]
    fn negative_steps_carry_ascii_minus() {
        let cmd = Command::MoveMotor { motor: MotorId(2), steps: -150 };
        assert_eq!(cmd.encode(), b"M2:-150\n");
    }

    #[test]
    fn zero_steps_have_no_sign_and_no_padding() {
        let cmd = Command::MoveMotor { motor: MotorId(6), steps: 0 };
        assert_eq!(cmd.encode(), b"M6:0\n");
    }

    #[test]
    fn home_all_wire_form() {
        assert_eq!(Command::HomeAll.encode(), b"HOME\n");
    }
}
