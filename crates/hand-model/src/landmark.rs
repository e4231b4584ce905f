//! Landmarks, hands, and fingers.
//!
//! A hand is the 21-point skeleton produced by MediaPipe-style landmark
//! detectors. `x` and `y` are normalized to `[0.0, 1.0]` against the video
//! frame; `z` is signed depth relative to the wrist and may be absent.

use serde::{Deserialize, Serialize};

use handsign_common::error::{HandsignError, HandsignResult};

/// Number of landmarks in a hand.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices (MediaPipe hand landmark convention).
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single detected point on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized X coordinate [0.0, 1.0].
    pub x: f64,
    /// Normalized Y coordinate [0.0, 1.0].
    pub y: f64,
    /// Signed depth. Treated as 0.0 when the detector omits it.
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A landmark without depth.
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance in 3D.
    pub fn distance(&self, other: &Landmark) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Euclidean distance in the image plane, ignoring depth.
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Euclidean distance between two landmarks in 3D.
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    a.distance(b)
}

/// One validated hand: exactly 21 finite landmarks in anatomical order.
///
/// The only way to obtain a `Hand` is through validation, so downstream
/// code can index landmarks without bounds checks failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct Hand {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Hand {
    /// Validate and build a hand from detector output.
    pub fn new(landmarks: &[Landmark]) -> HandsignResult<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks.try_into().map_err(|_| {
            HandsignError::invalid_input(format!(
                "hand has {} landmarks, expected {LANDMARK_COUNT}",
                landmarks.len()
            ))
        })?;

        if let Some(i) = landmarks.iter().position(|l| !l.is_finite()) {
            return Err(HandsignError::invalid_input(format!(
                "landmark {i} has a non-finite coordinate"
            )));
        }

        Ok(Self { landmarks })
    }

    /// Wrap landmarks whose coordinates are known to be finite.
    pub(crate) fn from_trusted(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        debug_assert!(landmarks.iter().all(Landmark::is_finite));
        Self { landmarks }
    }

    /// All landmarks in anatomical order.
    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Landmark at `idx`. Panics if `idx >= 21`; use the `index` constants.
    pub fn landmark(&self, idx: usize) -> &Landmark {
        &self.landmarks[idx]
    }

    pub fn wrist(&self) -> &Landmark {
        &self.landmarks[index::WRIST]
    }

    /// 3D distance from the wrist to landmark `idx`.
    pub fn distance_from_wrist(&self, idx: usize) -> f64 {
        self.wrist().distance(self.landmark(idx))
    }

    /// Image-plane distance from the wrist to landmark `idx`.
    pub fn planar_distance_from_wrist(&self, idx: usize) -> f64 {
        self.wrist().planar_distance(self.landmark(idx))
    }
}

impl TryFrom<Vec<Landmark>> for Hand {
    type Error = HandsignError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        Hand::new(&landmarks)
    }
}

impl From<Hand> for Vec<Landmark> {
    fn from(hand: Hand) -> Self {
        hand.landmarks.to_vec()
    }
}

/// The five digits of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers, thumb first.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn tip(self) -> usize {
        match self {
            Self::Thumb => index::THUMB_TIP,
            Self::Index => index::INDEX_TIP,
            Self::Middle => index::MIDDLE_TIP,
            Self::Ring => index::RING_TIP,
            Self::Pinky => index::PINKY_TIP,
        }
    }

    /// Second joint from the tip. For the thumb this is the IP joint.
    pub fn pip(self) -> usize {
        match self {
            Self::Thumb => index::THUMB_IP,
            Self::Index => index::INDEX_PIP,
            Self::Middle => index::MIDDLE_PIP,
            Self::Ring => index::RING_PIP,
            Self::Pinky => index::PINKY_PIP,
        }
    }

    /// Base knuckle.
    pub fn mcp(self) -> usize {
        match self {
            Self::Thumb => index::THUMB_MCP,
            Self::Index => index::INDEX_MCP,
            Self::Middle => index::MIDDLE_MCP,
            Self::Ring => index::RING_MCP,
            Self::Pinky => index::PINKY_MCP,
        }
    }

    /// Landmark indices from base to tip (4 entries for every finger).
    pub fn chain(self) -> [usize; 4] {
        let tip = self.tip();
        [tip - 3, tip - 2, tip - 1, tip]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }
}

impl std::fmt::Display for Finger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand(n: usize) -> Vec<Landmark> {
        (0..n)
            .map(|i| Landmark::planar(0.5, 0.9 - i as f64 * 0.01))
            .collect()
    }

    #[test]
    fn test_distance_3d() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.3, 0.4, 1.2);
        assert!((a.distance(&b) - 1.3).abs() < 1e-12);
        assert!((a.planar_distance(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_z_defaults_to_zero() {
        let parsed: Landmark = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
        assert_eq!(parsed, Landmark::new(0.25, 0.75, 0.0));
    }

    #[test]
    fn test_missing_y_is_rejected() {
        assert!(serde_json::from_str::<Landmark>(r#"{"x":0.25,"z":0.1}"#).is_err());
    }

    #[test]
    fn test_hand_requires_21_landmarks() {
        assert!(Hand::new(&flat_hand(21)).is_ok());

        let err = Hand::new(&flat_hand(20)).unwrap_err();
        assert!(err.is_frame_scoped());
        assert!(err.to_string().contains("20 landmarks"));

        assert!(Hand::new(&flat_hand(22)).is_err());
        assert!(Hand::new(&[]).is_err());
    }

    #[test]
    fn test_hand_rejects_non_finite_coordinates() {
        let mut points = flat_hand(21);
        points[7].z = f64::NAN;
        let err = Hand::new(&points).unwrap_err();
        assert!(err.to_string().contains("landmark 7"));
    }

    #[test]
    fn test_hand_deserialization_validates_length() {
        let json = serde_json::to_string(&flat_hand(20)).unwrap();
        assert!(serde_json::from_str::<Hand>(&json).is_err());

        let json = serde_json::to_string(&flat_hand(21)).unwrap();
        let hand: Hand = serde_json::from_str(&json).unwrap();
        assert_eq!(hand.landmarks().len(), LANDMARK_COUNT);
    }

    #[test]
    fn test_distance_from_wrist() {
        let hand = Hand::new(&flat_hand(21)).unwrap();
        assert_eq!(hand.distance_from_wrist(index::WRIST), 0.0);
        assert!((hand.distance_from_wrist(index::INDEX_TIP) - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_finger_joint_indices() {
        assert_eq!(
            (Finger::Index.tip(), Finger::Index.pip(), Finger::Index.mcp()),
            (8, 6, 5)
        );
        assert_eq!(
            (Finger::Middle.tip(), Finger::Middle.pip(), Finger::Middle.mcp()),
            (12, 10, 9)
        );
        assert_eq!(
            (Finger::Ring.tip(), Finger::Ring.pip(), Finger::Ring.mcp()),
            (16, 14, 13)
        );
        assert_eq!(
            (Finger::Pinky.tip(), Finger::Pinky.pip(), Finger::Pinky.mcp()),
            (20, 18, 17)
        );
        assert_eq!((Finger::Thumb.tip(), Finger::Thumb.pip()), (4, 3));
        assert_eq!(Finger::Thumb.chain(), [1, 2, 3, 4]);
        assert_eq!(Finger::Pinky.chain(), [17, 18, 19, 20]);
    }
}
