//! Synthetic hand poses for fixtures, replay logs, and tests.
//!
//! Each finger is laid out along a ray from the wrist. Extended fingers
//! place their joints at increasing distances; curled fingers fold the
//! tip back to roughly the knuckle distance. Depth grows linearly with the
//! distance from the wrist so that 3D and image-plane ratios agree.

use crate::gesture::{FingerStates, Gesture};
use crate::landmark::{Finger, Hand, Landmark, LANDMARK_COUNT};

/// Distances from the wrist for thumb landmarks 1..=4.
const THUMB_EXTENDED: [f64; 4] = [0.05, 0.09, 0.12, 0.17];
const THUMB_CURLED: [f64; 4] = [0.05, 0.09, 0.12, 0.12];

/// Distances from the wrist for MCP, PIP, DIP, TIP.
const FINGER_EXTENDED: [f64; 4] = [0.15, 0.20, 0.25, 0.30];
const FINGER_CURLED: [f64; 4] = [0.15, 0.18, 0.17, 0.15];

/// Builds hands with a given finger configuration.
#[derive(Debug, Clone, Copy)]
pub struct PoseBuilder {
    /// Wrist position.
    pub wrist: Landmark,
    /// Uniform scale applied to every joint distance.
    pub scale: f64,
    /// Depth change per unit of distance from the wrist.
    pub depth_slope: f64,
}

impl Default for PoseBuilder {
    fn default() -> Self {
        Self {
            wrist: Landmark::new(0.5, 0.85, 0.0),
            scale: 1.0,
            depth_slope: -0.05,
        }
    }
}

impl PoseBuilder {
    /// Build a hand whose fingers are extended exactly as in `states`.
    pub fn build(&self, states: FingerStates) -> Hand {
        let mut landmarks = [self.wrist; LANDMARK_COUNT];

        for finger in Finger::ALL {
            let radii = match (finger, states.get(finger)) {
                (Finger::Thumb, true) => THUMB_EXTENDED,
                (Finger::Thumb, false) => THUMB_CURLED,
                (_, true) => FINGER_EXTENDED,
                (_, false) => FINGER_CURLED,
            };
            let angle = ray_angle(finger);
            for (idx, radius) in finger.chain().into_iter().zip(radii) {
                landmarks[idx] = self.point_on_ray(angle, radius);
            }
        }

        Hand::from_trusted(landmarks)
    }

    /// Point at `radius` from the wrist; angle 0 points up the image.
    fn point_on_ray(&self, angle: f64, radius: f64) -> Landmark {
        let r = radius * self.scale;
        Landmark::new(
            self.wrist.x + r * angle.sin(),
            self.wrist.y - r * angle.cos(),
            self.wrist.z + r * self.depth_slope,
        )
    }
}

/// Splay angle (radians) of each finger ray.
fn ray_angle(finger: Finger) -> f64 {
    match finger {
        Finger::Thumb => -0.9,
        Finger::Index => -0.25,
        Finger::Middle => 0.0,
        Finger::Ring => 0.2,
        Finger::Pinky => 0.4,
    }
}

/// Build a hand with the default layout.
pub fn pose(states: FingerStates) -> Hand {
    PoseBuilder::default().build(states)
}

/// Representative finger states for a built-in gesture.
///
/// `Unknown` maps to thumb and pinky extended ("call me"), which no
/// default rule matches. Custom gestures have no canonical pose.
pub fn canonical_states(gesture: &Gesture) -> Option<FingerStates> {
    let states = match gesture {
        Gesture::IndexUp => FingerStates::new(false, true, false, false, false),
        Gesture::MiddleOnly => FingerStates::new(false, false, true, false, false),
        Gesture::Peace => FingerStates::new(false, true, true, false, false),
        Gesture::ThumbsUp => FingerStates::new(true, false, false, false, false),
        Gesture::OpenHand => FingerStates::new(true, true, true, true, true),
        Gesture::Fist => FingerStates::CURLED,
        Gesture::Unknown => FingerStates::new(true, false, false, false, true),
        Gesture::Custom(_) => return None,
    };
    Some(states)
}

/// A 20-landmark hand that fails validation.
pub fn truncated_landmarks(states: FingerStates) -> Vec<Landmark> {
    let mut landmarks = pose(states).landmarks().to_vec();
    landmarks.pop();
    landmarks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::index;

    #[test]
    fn test_extended_index_distances() {
        let hand = pose(FingerStates::new(false, true, false, false, false));
        let tip = hand.distance_from_wrist(index::INDEX_TIP);
        let pip = hand.distance_from_wrist(index::INDEX_PIP);
        let mcp = hand.distance_from_wrist(index::INDEX_MCP);
        let depth = (1.0f64 + 0.05 * 0.05).sqrt();
        assert!((tip - 0.30 * depth).abs() < 1e-9);
        assert!((pip - 0.20 * depth).abs() < 1e-9);
        assert!((mcp - 0.15 * depth).abs() < 1e-9);
    }

    #[test]
    fn test_curled_tip_returns_to_knuckle_distance() {
        let hand = pose(FingerStates::CURLED);
        let tip = hand.distance_from_wrist(index::RING_TIP);
        let mcp = hand.distance_from_wrist(index::RING_MCP);
        assert!((tip - mcp).abs() < 1e-9);
    }

    #[test]
    fn test_landmarks_stay_in_frame() {
        let hand = pose(FingerStates::from_bits(0b11111));
        for l in hand.landmarks() {
            assert!((0.0..=1.0).contains(&l.x), "x={} out of frame", l.x);
            assert!((0.0..=1.0).contains(&l.y), "y={} out of frame", l.y);
        }
    }

    #[test]
    fn test_canonical_states() {
        assert_eq!(
            canonical_states(&Gesture::Fist),
            Some(FingerStates::CURLED)
        );
        assert_eq!(
            canonical_states(&Gesture::OpenHand).map(|s| s.extended_count()),
            Some(5)
        );
        assert!(canonical_states(&Gesture::custom("wave").unwrap()).is_none());
    }

    #[test]
    fn test_truncated_landmarks_fail_validation() {
        let raw = truncated_landmarks(FingerStates::CURLED);
        assert_eq!(raw.len(), 20);
        assert!(Hand::new(&raw).is_err());
    }
}
