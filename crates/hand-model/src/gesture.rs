//! Finger states and gesture labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use handsign_common::error::HandsignError;

use crate::landmark::Finger;

/// Extended/curled state of every finger of one hand in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// No finger extended.
    pub const CURLED: FingerStates = FingerStates {
        thumb: false,
        index: false,
        middle: false,
        ring: false,
        pinky: false,
    };

    pub fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn get(&self, finger: Finger) -> bool {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }

    pub fn set(&mut self, finger: Finger, extended: bool) {
        match finger {
            Finger::Thumb => self.thumb = extended,
            Finger::Index => self.index = extended,
            Finger::Middle => self.middle = extended,
            Finger::Ring => self.ring = extended,
            Finger::Pinky => self.pinky = extended,
        }
    }

    /// Number of extended fingers.
    pub fn extended_count(&self) -> usize {
        Finger::ALL.iter().filter(|f| self.get(**f)).count()
    }

    /// Pack into the low five bits, thumb as bit 0.
    pub fn bits(&self) -> u8 {
        Finger::ALL
            .iter()
            .enumerate()
            .filter(|(_, f)| self.get(**f))
            .fold(0, |acc, (i, _)| acc | (1u8 << i))
    }

    /// Inverse of [`FingerStates::bits`]. Bits above the fifth are ignored.
    pub fn from_bits(bits: u8) -> Self {
        let mut states = Self::CURLED;
        for (i, finger) in Finger::ALL.iter().enumerate() {
            states.set(*finger, bits & (1u8 << i) != 0);
        }
        states
    }

    /// Every one of the 32 possible combinations.
    pub fn all_combinations() -> impl Iterator<Item = FingerStates> {
        (0u8..32).map(Self::from_bits)
    }
}

impl fmt::Display for FingerStates {
    /// Renders as `T I M R P`, with `-` for curled fingers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marks = ['T', 'I', 'M', 'R', 'P'];
        for (finger, mark) in Finger::ALL.iter().zip(marks) {
            let c = if self.get(*finger) { mark } else { '-' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// A gesture label for one hand in one frame.
///
/// Serialized as its snake_case name; any name that is not built in
/// becomes [`Gesture::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Gesture {
    /// Index finger extended, everything else curled.
    IndexUp,
    /// Only the middle finger extended (thumb ignored).
    MiddleOnly,
    /// Index and middle extended, ring and pinky curled.
    Peace,
    /// Thumb extended, all other fingers curled.
    ThumbsUp,
    /// Index, middle, ring, and pinky extended.
    OpenHand,
    /// Index, middle, ring, and pinky curled.
    Fist,
    /// A hand is present but no rule matched.
    Unknown,
    /// Deployment-defined label.
    Custom(String),
}

impl Gesture {
    /// Built-in labels, in default priority order.
    pub const BUILTIN: [Gesture; 7] = [
        Gesture::IndexUp,
        Gesture::MiddleOnly,
        Gesture::Peace,
        Gesture::ThumbsUp,
        Gesture::OpenHand,
        Gesture::Fist,
        Gesture::Unknown,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::IndexUp => "index_up",
            Self::MiddleOnly => "middle_only",
            Self::Peace => "peace",
            Self::ThumbsUp => "thumbs_up",
            Self::OpenHand => "open_hand",
            Self::Fist => "fist",
            Self::Unknown => "unknown",
            Self::Custom(name) => name,
        }
    }

    /// Label for a deployment-defined gesture.
    ///
    /// The name is normalized like [`FromStr`], so the label survives a
    /// JSON round trip. A name that normalizes to a built-in returns it.
    pub fn custom(name: impl AsRef<str>) -> Result<Self, HandsignError> {
        name.as_ref().parse()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gesture {
    type Err = HandsignError;

    /// Case-insensitive; `-` and spaces are read as `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_name(s);

        if normalized.is_empty() {
            return Err(HandsignError::config("gesture name must not be empty"));
        }

        let builtin = Gesture::BUILTIN
            .iter()
            .find(|g| g.as_str() == normalized)
            .cloned();
        Ok(builtin.unwrap_or(Gesture::Custom(normalized)))
    }
}

impl From<Gesture> for String {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl TryFrom<String> for Gesture {
    type Error = HandsignError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_roundtrip_covers_all_combinations() {
        let all: Vec<FingerStates> = FingerStates::all_combinations().collect();
        assert_eq!(all.len(), 32);
        for (bits, states) in all.iter().enumerate() {
            assert_eq!(states.bits() as usize, bits);
        }
        assert_eq!(FingerStates::from_bits(0), FingerStates::CURLED);
        assert_eq!(FingerStates::from_bits(0b11111).extended_count(), 5);
    }

    #[test]
    fn test_get_and_set() {
        let mut states = FingerStates::CURLED;
        states.set(Finger::Ring, true);
        assert!(states.get(Finger::Ring));
        assert!(states.ring);
        assert_eq!(states.extended_count(), 1);
    }

    #[test]
    fn test_display_mask() {
        let states = FingerStates::new(false, true, true, false, false);
        assert_eq!(states.to_string(), "-IM--");
    }

    #[test]
    fn test_gesture_parse_builtin_names() {
        assert_eq!("index_up".parse::<Gesture>().unwrap(), Gesture::IndexUp);
        assert_eq!("Thumbs-Up".parse::<Gesture>().unwrap(), Gesture::ThumbsUp);
        assert_eq!("open hand".parse::<Gesture>().unwrap(), Gesture::OpenHand);
        for gesture in Gesture::BUILTIN {
            assert_eq!(gesture.as_str().parse::<Gesture>().unwrap(), gesture);
        }
    }

    #[test]
    fn test_gesture_parse_custom_and_empty() {
        assert_eq!(
            "rock-on".parse::<Gesture>().unwrap(),
            Gesture::custom("rock_on").unwrap()
        );
        assert!("  ".parse::<Gesture>().is_err());
    }

    #[test]
    fn test_gesture_serializes_as_plain_string() {
        assert_eq!(
            serde_json::to_string(&Gesture::IndexUp).unwrap(),
            "\"index_up\""
        );
        let custom: Gesture = serde_json::from_str("\"call_me\"").unwrap();
        assert_eq!(custom, Gesture::custom("call_me").unwrap());
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"call_me\"");
    }

    #[test]
    fn test_custom_constructor_normalizes_for_roundtrip() {
        let wave = Gesture::custom("Wave").unwrap();
        assert_eq!(wave.as_str(), "wave");

        let json = serde_json::to_string(&wave).unwrap();
        let parsed: Gesture = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, wave);

        assert_eq!(Gesture::custom("Open Hand").unwrap(), Gesture::OpenHand);
        assert!(Gesture::custom("").is_err());
    }
}
