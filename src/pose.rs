use std::collections::HashMap;

/// Named keypoints the pose source can report. Fixed vocabulary; anything
/// else the extractor finds is not part of the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keypoint {
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
    Head,
}

impl Keypoint {
    /// Packing order of keypoints inside the observation vector.
    pub const OBSERVATION_ORDER: [Keypoint; 5] = [
        Keypoint::LeftHand,
        Keypoint::RightHand,
        Keypoint::LeftFoot,
        Keypoint::RightFoot,
        Keypoint::Head,
    ];
}

/// What a pose source extracted from one frame. Which variant a source
/// emits is decided once when the source is constructed: full skeleton
/// extraction when the tracking backend is available, the frame-centre
/// placeholder otherwise.
#[derive(Debug, Clone)]
pub enum PosePoints {
    /// Pixel coordinates per keypoint. Missing keypoints are simply absent.
    Keypoints(HashMap<Keypoint, (f64, f64)>),
    Center(f64, f64),
}

#[derive(Debug, Clone)]
pub struct PoseFrame {
    pub width: f64,
    pub height: f64,
    pub points: PosePoints,
}

/// Pull interface to the external camera/pose pipeline. `None` means no
/// detection in the current frame.
pub trait PoseSource: Send + 'static {
    fn read_frame(&mut self) -> Option<PoseFrame>;
}

/// Placeholder source reporting the frame centre every time. Stands in when
/// keypoint extraction runs out of process or is unavailable.
#[derive(Debug, Clone, Copy)]
pub struct CenterPoseSource {
    pub width: f64,
    pub height: f64,
}

impl CenterPoseSource {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl PoseSource for CenterPoseSource {
    fn read_frame(&mut self) -> Option<PoseFrame> {
        Some(PoseFrame {
            width: self.width,
            height: self.height,
            points: PosePoints::Center(self.width / 2.0, self.height / 2.0),
        })
    }
}
