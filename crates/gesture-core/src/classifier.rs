//! The gesture classifier.
//!
//! Classification is a pure function of one hand in one frame: finger
//! extension states are computed from landmark distances, then looked up
//! in the gesture table. Nothing is remembered between calls.

use serde::{Deserialize, Serialize};

use handsign_common::config::AppConfig;
use handsign_common::error::HandsignResult;
use handsign_hand_model::frame::HandFrame;
use handsign_hand_model::gesture::{FingerStates, Gesture};
use handsign_hand_model::landmark::{Hand, Landmark};

use crate::extension::{finger_states, ExtensionThresholds};
use crate::table::GestureTable;

/// Stateless classifier for single hands.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: ExtensionThresholds,
    table: GestureTable,
}

/// Result of classifying one frame.
///
/// `NoHand` is a normal outcome, distinct from a hand that matched no
/// rule (`Gesture::Unknown`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FrameOutcome {
    NoHand,
    Hand {
        gesture: Gesture,
        fingers: FingerStates,
    },
}

impl FrameOutcome {
    /// The detected gesture, or `None` when there was no hand.
    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            Self::NoHand => None,
            Self::Hand { gesture, .. } => Some(gesture),
        }
    }

    pub fn fingers(&self) -> Option<FingerStates> {
        match self {
            Self::NoHand => None,
            Self::Hand { fingers, .. } => Some(*fingers),
        }
    }

    pub fn has_hand(&self) -> bool {
        matches!(self, Self::Hand { .. })
    }
}

impl std::fmt::Display for FrameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHand => f.write_str("no_hand"),
            Self::Hand { gesture, fingers } => write!(f, "{gesture} [{fingers}]"),
        }
    }
}

impl GestureClassifier {
    pub fn new(thresholds: ExtensionThresholds, table: GestureTable) -> Self {
        Self { thresholds, table }
    }

    /// Default margins (1.10 / 1.30 / 1.05) and the standard table.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Build from application config, validating margins and rules.
    pub fn from_config(config: &AppConfig) -> HandsignResult<Self> {
        let thresholds = ExtensionThresholds::from_settings(&config.classifier)?;
        let table = match &config.gestures {
            Some(rules) => GestureTable::from_settings(rules)?,
            None => GestureTable::standard(),
        };
        Ok(Self::new(thresholds, table))
    }

    pub fn thresholds(&self) -> &ExtensionThresholds {
        &self.thresholds
    }

    pub fn table(&self) -> &GestureTable {
        &self.table
    }

    /// Extended/curled state of each finger.
    pub fn finger_states(&self, hand: &Hand) -> FingerStates {
        finger_states(hand, &self.thresholds)
    }

    /// Gesture label for a validated hand.
    pub fn classify(&self, hand: &Hand) -> Gesture {
        self.table.evaluate(&self.finger_states(hand))
    }

    /// Validate raw detector output, then classify it.
    ///
    /// Fails with `InvalidInput` unless exactly 21 finite landmarks are given.
    pub fn classify_landmarks(&self, landmarks: &[Landmark]) -> HandsignResult<Gesture> {
        let hand = Hand::new(landmarks)?;
        Ok(self.classify(&hand))
    }

    /// Classify the hand of interest (the first detected hand) of a frame.
    pub fn classify_frame(&self, frame: &HandFrame) -> HandsignResult<FrameOutcome> {
        let Some(hand) = frame.primary_hand() else {
            tracing::trace!(t = frame.timestamp_ns, "No hand in frame");
            return Ok(FrameOutcome::NoHand);
        };
        let hand = hand?;

        let fingers = self.finger_states(&hand);
        let gesture = self.table.evaluate(&fingers);
        tracing::debug!(
            t = frame.timestamp_ns,
            hands = frame.hand_count(),
            fingers = %fingers,
            gesture = %gesture,
            "Classified frame"
        );

        Ok(FrameOutcome::Hand { gesture, fingers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_common::config::GestureRuleSettings;
    use handsign_hand_model::synthetic::{canonical_states, pose, truncated_landmarks};

    #[test]
    fn test_canonical_poses_classify_as_their_gesture() {
        let classifier = GestureClassifier::with_defaults();
        for gesture in Gesture::BUILTIN {
            let states = canonical_states(&gesture).unwrap();
            let hand = pose(states);
            assert_eq!(classifier.finger_states(&hand), states);
            assert_eq!(classifier.classify(&hand), gesture);
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = GestureClassifier::with_defaults();
        let hand = pose(FingerStates::new(false, true, true, false, false));
        let first = classifier.classify(&hand);
        let second = classifier.classify(&hand);
        assert_eq!(first, second);
        assert_eq!(first, Gesture::Peace);
    }

    #[test]
    fn test_classify_landmarks_rejects_20_points() {
        let classifier = GestureClassifier::with_defaults();
        let err = classifier
            .classify_landmarks(&truncated_landmarks(FingerStates::CURLED))
            .unwrap_err();
        assert!(err.is_frame_scoped());
    }

    #[test]
    fn test_classify_frame_outcomes() {
        let classifier = GestureClassifier::with_defaults();

        let outcome = classifier.classify_frame(&HandFrame::empty(0)).unwrap();
        assert_eq!(outcome, FrameOutcome::NoHand);
        assert!(outcome.gesture().is_none());

        let hand = pose(FingerStates::CURLED);
        let outcome = classifier
            .classify_frame(&HandFrame::with_hand(1, &hand))
            .unwrap();
        assert_eq!(outcome.gesture(), Some(&Gesture::Fist));
        assert_eq!(outcome.fingers(), Some(FingerStates::CURLED));
    }

    #[test]
    fn test_classify_frame_uses_first_hand() {
        let classifier = GestureClassifier::with_defaults();
        let first = pose(FingerStates::new(false, true, false, false, false));
        let second = pose(FingerStates::CURLED);
        let frame = HandFrame {
            timestamp_ns: 0,
            hands: vec![
                first.landmarks().to_vec(),
                second.landmarks().to_vec(),
            ],
        };
        let outcome = classifier.classify_frame(&frame).unwrap();
        assert_eq!(outcome.gesture(), Some(&Gesture::IndexUp));
    }

    #[test]
    fn test_classify_frame_with_malformed_hand_fails() {
        let classifier = GestureClassifier::with_defaults();
        let frame = HandFrame {
            timestamp_ns: 0,
            hands: vec![truncated_landmarks(FingerStates::CURLED)],
        };
        assert!(classifier.classify_frame(&frame).is_err());
    }

    #[test]
    fn test_from_config_uses_configured_table() {
        let mut config = AppConfig::default();
        config.gestures = Some(vec![GestureRuleSettings {
            gesture: "any_hand".to_string(),
            thumb: None,
            index: None,
            middle: None,
            ring: None,
            pinky: None,
        }]);
        let classifier = GestureClassifier::from_config(&config).unwrap();
        let hand = pose(FingerStates::CURLED);
        assert_eq!(
            classifier.classify(&hand),
            Gesture::custom("any_hand").unwrap()
        );
    }

    #[test]
    fn test_from_config_rejects_bad_margins() {
        let mut config = AppConfig::default();
        config.classifier.thumb_margin = 1.0;
        assert!(GestureClassifier::from_config(&config).is_err());
    }

    #[test]
    fn test_outcome_json_format() {
        let outcome = FrameOutcome::Hand {
            gesture: Gesture::IndexUp,
            fingers: FingerStates::new(false, true, false, false, false),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"state\":\"hand\""));
        assert!(json.contains("\"gesture\":\"index_up\""));

        let json = serde_json::to_string(&FrameOutcome::NoHand).unwrap();
        assert_eq!(json, r#"{"state":"no_hand"}"#);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(FrameOutcome::NoHand.to_string(), "no_hand");
        let outcome = FrameOutcome::Hand {
            gesture: Gesture::Fist,
            fingers: FingerStates::CURLED,
        };
        assert_eq!(outcome.to_string(), "fist [-----]");
    }
}
