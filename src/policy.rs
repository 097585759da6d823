/// Pull interface to the action provider: maps a normalized observation
/// vector to one action component per motor, each in [-1, 1]. Trained
/// policies live outside this crate and plug in through this trait.
pub trait Policy: Send + 'static {
    fn action(&mut self, observation: &[f64]) -> Vec<f64>;
}

/// Policy that never moves the rig. Used by the live observation mode and as
/// a stand-in before a trained policy is wired up.
#[derive(Debug, Clone, Copy)]
pub struct IdlePolicy {
    pub motor_count: usize,
}

impl Policy for IdlePolicy {
    fn action(&mut self, _observation: &[f64]) -> Vec<f64> {
        vec![0.0; self.motor_count]
    }
}
