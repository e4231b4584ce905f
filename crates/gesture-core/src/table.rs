//! Ordered gesture tables.
//!
//! A table is a list of `(pattern, gesture)` rules evaluated top to
//! bottom; the first matching rule wins and `Unknown` is returned when
//! nothing matches. Several gestures overlap (an open hand also satisfies
//! the index and middle clauses of `peace`), so order is significant.

use serde::{Deserialize, Serialize};

use handsign_common::config::GestureRuleSettings;
use handsign_common::error::HandsignResult;
use handsign_hand_model::gesture::{FingerStates, Gesture};
use handsign_hand_model::landmark::Finger;

/// Per-finger constraint: `Some(true)` extended, `Some(false)` curled,
/// `None` don't care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FingerPattern {
    pub thumb: Option<bool>,
    pub index: Option<bool>,
    pub middle: Option<bool>,
    pub ring: Option<bool>,
    pub pinky: Option<bool>,
}

impl FingerPattern {
    /// Pattern that matches every hand.
    pub fn any() -> Self {
        Self::default()
    }

    /// Pattern that constrains all five fingers to `states`.
    pub fn exact(states: FingerStates) -> Self {
        Finger::ALL
            .into_iter()
            .fold(Self::any(), |p, f| p.with(f, states.get(f)))
    }

    /// Require `finger` to be extended (`true`) or curled (`false`).
    pub fn with(mut self, finger: Finger, extended: bool) -> Self {
        *self.slot(finger) = Some(extended);
        self
    }

    pub fn extended(self, finger: Finger) -> Self {
        self.with(finger, true)
    }

    pub fn curled(self, finger: Finger) -> Self {
        self.with(finger, false)
    }

    pub fn get(&self, finger: Finger) -> Option<bool> {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }

    fn slot(&mut self, finger: Finger) -> &mut Option<bool> {
        match finger {
            Finger::Thumb => &mut self.thumb,
            Finger::Index => &mut self.index,
            Finger::Middle => &mut self.middle,
            Finger::Ring => &mut self.ring,
            Finger::Pinky => &mut self.pinky,
        }
    }

    pub fn matches(&self, states: &FingerStates) -> bool {
        Finger::ALL
            .into_iter()
            .all(|f| self.get(f).map_or(true, |want| states.get(f) == want))
    }
}

/// One row of a gesture table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureRule {
    pub gesture: Gesture,
    pub pattern: FingerPattern,
}

impl GestureRule {
    pub fn new(gesture: Gesture, pattern: FingerPattern) -> Self {
        Self { gesture, pattern }
    }

    pub fn matches(&self, states: &FingerStates) -> bool {
        self.pattern.matches(states)
    }

    /// Parse a configured rule.
    pub fn from_settings(settings: &GestureRuleSettings) -> HandsignResult<Self> {
        let gesture: Gesture = settings.gesture.parse()?;
        let pattern = FingerPattern {
            thumb: settings.thumb,
            index: settings.index,
            middle: settings.middle,
            ring: settings.ring,
            pinky: settings.pinky,
        };
        Ok(Self { gesture, pattern })
    }

    pub fn to_settings(&self) -> GestureRuleSettings {
        GestureRuleSettings {
            gesture: self.gesture.to_string(),
            thumb: self.pattern.thumb,
            index: self.pattern.index,
            middle: self.pattern.middle,
            ring: self.pattern.ring,
            pinky: self.pattern.pinky,
        }
    }
}

/// Ordered first-match gesture table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureTable {
    rules: Vec<GestureRule>,
}

impl Default for GestureTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl GestureTable {
    /// The built-in priority order:
    /// index_up, middle_only, peace, thumbs_up, open_hand, fist.
    pub fn standard() -> Self {
        use Finger::*;

        let rules = vec![
            GestureRule::new(
                Gesture::IndexUp,
                FingerPattern::any()
                    .extended(Index)
                    .curled(Middle)
                    .curled(Ring)
                    .curled(Pinky)
                    .curled(Thumb),
            ),
            GestureRule::new(
                Gesture::MiddleOnly,
                FingerPattern::any()
                    .extended(Middle)
                    .curled(Index)
                    .curled(Ring)
                    .curled(Pinky),
            ),
            GestureRule::new(
                Gesture::Peace,
                FingerPattern::any()
                    .extended(Index)
                    .extended(Middle)
                    .curled(Ring)
                    .curled(Pinky),
            ),
            GestureRule::new(
                Gesture::ThumbsUp,
                FingerPattern::any()
                    .extended(Thumb)
                    .curled(Index)
                    .curled(Middle)
                    .curled(Ring)
                    .curled(Pinky),
            ),
            GestureRule::new(
                Gesture::OpenHand,
                FingerPattern::any()
                    .extended(Index)
                    .extended(Middle)
                    .extended(Ring)
                    .extended(Pinky),
            ),
            GestureRule::new(
                Gesture::Fist,
                FingerPattern::any()
                    .curled(Index)
                    .curled(Middle)
                    .curled(Ring)
                    .curled(Pinky),
            ),
        ];

        Self { rules }
    }

    /// A table with no rules; every hand classifies as `Unknown`.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn from_rules(rules: Vec<GestureRule>) -> Self {
        Self { rules }
    }

    /// Parse a configured table, preserving order.
    pub fn from_settings(settings: &[GestureRuleSettings]) -> HandsignResult<Self> {
        let rules = settings
            .iter()
            .map(GestureRule::from_settings)
            .collect::<HandsignResult<Vec<_>>>()?;
        if rules.is_empty() {
            tracing::warn!("Configured gesture table is empty; every hand will be unknown");
        }
        Ok(Self { rules })
    }

    pub fn to_settings(&self) -> Vec<GestureRuleSettings> {
        self.rules.iter().map(GestureRule::to_settings).collect()
    }

    pub fn rules(&self) -> &[GestureRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append a rule with the lowest priority.
    pub fn push(&mut self, rule: GestureRule) {
        self.rules.push(rule);
    }

    /// Insert a rule at `position` (clamped to the table length).
    pub fn insert(&mut self, position: usize, rule: GestureRule) {
        let position = position.min(self.rules.len());
        self.rules.insert(position, rule);
    }

    /// Remove the first rule labelled `gesture`.
    pub fn remove(&mut self, gesture: &Gesture) -> Option<GestureRule> {
        let position = self.position(gesture)?;
        Some(self.rules.remove(position))
    }

    /// Priority of the first rule labelled `gesture`.
    pub fn position(&self, gesture: &Gesture) -> Option<usize> {
        self.rules.iter().position(|r| &r.gesture == gesture)
    }

    /// Move the first rule labelled `gesture` to `position`.
    ///
    /// Returns `false` when no such rule exists.
    pub fn move_to(&mut self, gesture: &Gesture, position: usize) -> bool {
        match self.remove(gesture) {
            Some(rule) => {
                self.insert(position, rule);
                true
            }
            None => false,
        }
    }

    /// First rule matching `states`, with its priority.
    pub fn matching_rule(&self, states: &FingerStates) -> Option<(usize, &GestureRule)> {
        self.rules.iter().enumerate().find(|(_, r)| r.matches(states))
    }

    /// Label for `states`; `Unknown` when no rule matches.
    pub fn evaluate(&self, states: &FingerStates) -> Gesture {
        self.matching_rule(states)
            .map(|(_, rule)| rule.gesture.clone())
            .unwrap_or(Gesture::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> FingerStates {
        FingerStates::new(thumb, index, middle, ring, pinky)
    }

    #[test]
    fn test_standard_table_rows() {
        let table = GestureTable::standard();
        let cases = [
            (states(false, true, false, false, false), Gesture::IndexUp),
            (states(false, false, true, false, false), Gesture::MiddleOnly),
            (states(true, false, true, false, false), Gesture::MiddleOnly),
            (states(false, true, true, false, false), Gesture::Peace),
            (states(true, false, false, false, false), Gesture::ThumbsUp),
            (states(false, true, true, true, true), Gesture::OpenHand),
            (states(false, false, false, false, false), Gesture::Fist),
            (states(true, false, false, false, true), Gesture::Unknown),
            (states(false, true, false, false, true), Gesture::Unknown),
        ];
        for (s, expected) in cases {
            assert_eq!(table.evaluate(&s), expected, "states {s}");
        }
    }

    #[test]
    fn test_index_with_thumb_is_not_index_up() {
        let table = GestureTable::standard();
        assert_eq!(
            table.evaluate(&states(true, true, false, false, false)),
            Gesture::Unknown
        );
    }

    #[test]
    fn test_overlap_resolved_by_order() {
        let table = GestureTable::standard();
        // All five extended: peace needs ring/pinky curled, so open_hand wins.
        assert_eq!(
            table.evaluate(&states(true, true, true, true, true)),
            Gesture::OpenHand
        );
        // Peace ignores the thumb.
        assert_eq!(
            table.evaluate(&states(true, true, true, false, false)),
            Gesture::Peace
        );
        // Thumbs-up hand is also a fist, but thumbs_up is listed first.
        let (position, rule) = table
            .matching_rule(&states(true, false, false, false, false))
            .unwrap();
        assert_eq!(rule.gesture, Gesture::ThumbsUp);
        assert_eq!(position, 3);
    }

    #[test]
    fn test_reordering_changes_result() {
        let mut table = GestureTable::standard();
        let thumbs_up = states(true, false, false, false, false);

        assert!(table.move_to(&Gesture::Fist, 0));
        assert_eq!(table.position(&Gesture::Fist), Some(0));
        assert_eq!(table.evaluate(&thumbs_up), Gesture::Fist);

        assert!(!table.move_to(&Gesture::custom("wave").unwrap(), 0));
    }

    #[test]
    fn test_custom_rule_extends_table() {
        let mut table = GestureTable::standard();
        let rock_on = Gesture::custom("rock_on").unwrap();
        table.insert(
            0,
            GestureRule::new(
                rock_on.clone(),
                FingerPattern::exact(states(false, true, false, false, true)),
            ),
        );
        assert_eq!(
            table.evaluate(&states(false, true, false, false, true)),
            rock_on
        );
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_empty_table_is_unknown() {
        let table = GestureTable::empty();
        assert!(table.is_empty());
        for s in FingerStates::all_combinations() {
            assert_eq!(table.evaluate(&s), Gesture::Unknown);
        }
    }

    #[test]
    fn test_settings_roundtrip_preserves_order() {
        let table = GestureTable::standard();
        let settings = table.to_settings();
        assert_eq!(settings[0].gesture, "index_up");
        assert_eq!(settings[5].thumb, None);
        let parsed = GestureTable::from_settings(&settings).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_from_settings_rejects_blank_gesture() {
        let settings = vec![GestureRuleSettings {
            gesture: " ".to_string(),
            thumb: None,
            index: Some(true),
            middle: None,
            ring: None,
            pinky: None,
        }];
        assert!(GestureTable::from_settings(&settings).is_err());
    }

    #[test]
    fn test_pattern_exact_constrains_every_finger() {
        let s = states(true, false, true, false, true);
        let pattern = FingerPattern::exact(s);
        assert!(pattern.matches(&s));
        assert!(!pattern.matches(&states(true, false, true, false, false)));
        assert!(FingerPattern::any().matches(&s));
    }
}
