use crate::pose::{Keypoint, PoseFrame, PosePoints};

/// Length of the observation vector: five keypoints with (x, y) each.
pub const OBSERVATION_LEN: usize = 10;

/// Normalize a pose frame into the [0, 1] observation vector. No detection
/// maps to all zeros; a centre-only frame repeats the centre for every
/// keypoint slot; missing keypoints map to (0, 0).
pub fn observation_from_frame(frame: Option<&PoseFrame>) -> [f64; OBSERVATION_LEN] {
    let mut obs = [0.0; OBSERVATION_LEN];
    let Some(frame) = frame else {
        return obs;
    };

    match &frame.points {
        PosePoints::Center(x, y) => {
            let (nx, ny) = (x / frame.width, y / frame.height);
            for pair in obs.chunks_exact_mut(2) {
                pair[0] = nx;
                pair[1] = ny;
            }
        }
        PosePoints::Keypoints(points) => {
            for (i, kp) in Keypoint::OBSERVATION_ORDER.iter().enumerate() {
                let (x, y) = points.get(kp).copied().unwrap_or((0.0, 0.0));
                obs[2 * i] = x / frame.width;
                obs[2 * i + 1] = y / frame.height;
            }
        }
    }

    obs
}

/// Scale one [-1, 1] action component into a signed step count. Out-of-range
/// components are clamped; the product truncates toward zero.
pub fn steps_from_action(value: f64, step_scale: f64) -> i32 {
    (value.clamp(-1.0, 1.0) * step_scale) as i32
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn keypoint_frame(points: &[(Keypoint, (f64, f64))]) -> PoseFrame {
        PoseFrame {
            width: 640.0,
            height: 480.0,
            points: PosePoints::Keypoints(points.iter().cloned().collect::<HashMap<_, _>>()),
        }
    }

    #[test]
    fn no_detection_is_all_zeros() {
        assert_eq!(observation_from_frame(None), [0.0; OBSERVATION_LEN]);
    }

    #[test]
    fn center_frame_repeats_for_every_slot() {
        let frame = PoseFrame {
            width: 640.0,
            height: 480.0,
            points: PosePoints::Center(320.0, 120.0),
        };
        let obs = observation_from_frame(Some(&frame));
        for pair in obs.chunks_exact(2) {
            assert_eq!(pair, [0.5, 0.25]);
        }
    }

    #[test]
    fn keypoints_pack_in_fixed_order() {
        let frame = keypoint_frame(&[
            (Keypoint::LeftHand, (64.0, 48.0)),
            (Keypoint::Head, (320.0, 240.0)),
        ]);
        let obs = observation_from_frame(Some(&frame));
        assert_eq!(obs[0], 0.1);
        assert_eq!(obs[1], 0.1);
        // slots for absent keypoints stay zero
        assert_eq!(&obs[2..8], &[0.0; 6]);
        assert_eq!(obs[8], 0.5);
        assert_eq!(obs[9], 0.5);
    }

    #[test]
    fn action_scaling_truncates_toward_zero() {
        assert_eq!(steps_from_action(1.0, 100.0), 100);
        assert_eq!(steps_from_action(-0.5, 100.0), -50);
        assert_eq!(steps_from_action(0.999, 100.0), 99);
        assert_eq!(steps_from_action(-0.999, 100.0), -99);
        assert_eq!(steps_from_action(0.0, 100.0), 0);
    }

    #[test]
    fn out_of_range_actions_clamp() {
        assert_eq!(steps_from_action(3.0, 100.0), 100);
        assert_eq!(steps_from_action(-7.5, 100.0), -100);
    }
}
