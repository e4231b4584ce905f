//! Temporal wrappers around the stateless classifier.
//!
//! These hold the only state in the crate: the previous frame's level or
//! label. They are owned by the caller and fed only frames that classified
//! successfully, so a skipped frame leaves them untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use handsign_hand_model::gesture::Gesture;

use crate::classifier::FrameOutcome;

/// Detects false-to-true transitions of a boolean signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RisingEdge {
    previous: bool,
}

impl RisingEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level. Returns true on a rising edge.
    pub fn update(&mut self, current: bool) -> bool {
        let rising = current && !self.previous;
        self.previous = current;
        rising
    }

    /// Level seen on the last update.
    pub fn level(&self) -> bool {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = false;
    }
}

/// Emitted when the target gesture starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureEdge {
    pub gesture: Gesture,
    /// Number of rising edges so far, including this one.
    pub count: u64,
}

/// Counts how many times one gesture is entered, e.g. "index finger up".
#[derive(Debug, Clone)]
pub struct GestureEdgeDetector {
    target: Gesture,
    edge: RisingEdge,
    count: u64,
}

impl GestureEdgeDetector {
    pub fn new(target: Gesture) -> Self {
        Self {
            target,
            edge: RisingEdge::new(),
            count: 0,
        }
    }

    /// Feed one classified frame.
    pub fn observe(&mut self, outcome: &FrameOutcome) -> Option<GestureEdge> {
        let active = outcome.gesture() == Some(&self.target);
        if !self.edge.update(active) {
            return None;
        }
        self.count += 1;
        tracing::debug!(gesture = %self.target, count = self.count, "Gesture rising edge");
        Some(GestureEdge {
            gesture: self.target.clone(),
            count: self.count,
        })
    }

    pub fn target(&self) -> &Gesture {
        &self.target
    }

    /// Rising edges seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether the target was active in the last observed frame.
    pub fn is_active(&self) -> bool {
        self.edge.level()
    }
}

/// A change of gesture between consecutive observed frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    Started { gesture: Gesture },
    Ended { gesture: Gesture },
}

/// Tracks label transitions for every gesture.
///
/// Losing the hand ends the current gesture; `Unknown` is tracked like any
/// other label.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    current: Option<Gesture>,
    rising_edges: HashMap<Gesture, u64>,
    frames_observed: u64,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one classified frame, returning the transitions it caused.
    pub fn observe(&mut self, outcome: &FrameOutcome) -> Vec<GestureEvent> {
        self.frames_observed += 1;
        let next = outcome.gesture().cloned();
        if next == self.current {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(gesture) = self.current.take() {
            events.push(GestureEvent::Ended { gesture });
        }
        if let Some(gesture) = &next {
            *self.rising_edges.entry(gesture.clone()).or_insert(0) += 1;
            events.push(GestureEvent::Started {
                gesture: gesture.clone(),
            });
        }
        self.current = next;
        events
    }

    /// Gesture of the last observed frame; `None` when no hand.
    pub fn current(&self) -> Option<&Gesture> {
        self.current.as_ref()
    }

    /// Times `gesture` has started.
    pub fn rising_edges(&self, gesture: &Gesture) -> u64 {
        self.rising_edges.get(gesture).copied().unwrap_or(0)
    }

    /// Start counts for every gesture seen, sorted by name.
    pub fn summary(&self) -> Vec<(Gesture, u64)> {
        let mut counts: Vec<(Gesture, u64)> = self
            .rising_edges
            .iter()
            .map(|(g, n)| (g.clone(), *n))
            .collect();
        counts.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        counts
    }

    pub fn frames_observed(&self) -> u64 {
        self.frames_observed
    }
}
