//! Finger extension predicates.
//!
//! A finger counts as extended when its tip is clearly further from the
//! wrist than its own joints. Margins absorb landmark jitter:
//!
//! - index..pinky: `tip > pip * pip_margin && tip > mcp * mcp_margin`
//! - thumb: `tip > ip * thumb_margin`
//!
//! Non-thumb fingers always use 3D distances. The thumb metric is
//! configurable; see [`ThumbMetric`].

use serde::{Deserialize, Serialize};

use handsign_common::config::{ClassifierSettings, ThumbMetric};
use handsign_common::error::HandsignResult;
use handsign_hand_model::gesture::FingerStates;
use handsign_hand_model::landmark::{Finger, Hand};

/// Validated extension margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtensionThresholds {
    pip_margin: f64,
    mcp_margin: f64,
    thumb_margin: f64,
    thumb_metric: ThumbMetric,
}

impl Default for ExtensionThresholds {
    fn default() -> Self {
        let settings = ClassifierSettings::default();
        Self {
            pip_margin: settings.pip_margin,
            mcp_margin: settings.mcp_margin,
            thumb_margin: settings.thumb_margin,
            thumb_metric: settings.thumb_metric,
        }
    }
}

impl ExtensionThresholds {
    /// Build thresholds from config, rejecting margins that are not > 1.0.
    pub fn from_settings(settings: &ClassifierSettings) -> HandsignResult<Self> {
        settings.validate()?;
        Ok(Self {
            pip_margin: settings.pip_margin,
            mcp_margin: settings.mcp_margin,
            thumb_margin: settings.thumb_margin,
            thumb_metric: settings.thumb_metric,
        })
    }

    /// Same margins with a different thumb metric.
    pub fn with_thumb_metric(mut self, metric: ThumbMetric) -> Self {
        self.thumb_metric = metric;
        self
    }

    pub fn pip_margin(&self) -> f64 {
        self.pip_margin
    }

    pub fn mcp_margin(&self) -> f64 {
        self.mcp_margin
    }

    pub fn thumb_margin(&self) -> f64 {
        self.thumb_margin
    }

    pub fn thumb_metric(&self) -> ThumbMetric {
        self.thumb_metric
    }

    /// Back to the serializable config form.
    pub fn to_settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            pip_margin: self.pip_margin,
            mcp_margin: self.mcp_margin,
            thumb_margin: self.thumb_margin,
            thumb_metric: self.thumb_metric,
        }
    }
}

/// Distances from the wrist to one finger's tip, PIP (thumb: IP), and MCP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FingerReach {
    pub tip: f64,
    pub pip: f64,
    pub mcp: f64,
}

impl FingerReach {
    /// Measure `finger` on `hand` with the given metric.
    pub fn measure(hand: &Hand, finger: Finger, metric: ThumbMetric) -> Self {
        let d = |idx| match metric {
            ThumbMetric::Spatial => hand.distance_from_wrist(idx),
            ThumbMetric::Planar => hand.planar_distance_from_wrist(idx),
        };
        Self {
            tip: d(finger.tip()),
            pip: d(finger.pip()),
            mcp: d(finger.mcp()),
        }
    }
}

/// Non-thumb rule applied to precomputed distances.
pub fn reach_is_extended(reach: &FingerReach, pip_margin: f64, mcp_margin: f64) -> bool {
    reach.tip > reach.pip * pip_margin && reach.tip > reach.mcp * mcp_margin
}

/// Thumb rule applied to precomputed distances.
pub fn thumb_reach_is_extended(reach: &FingerReach, thumb_margin: f64) -> bool {
    reach.tip > reach.pip * thumb_margin
}

/// Whether `finger` is extended on `hand`.
pub fn is_extended(hand: &Hand, finger: Finger, thresholds: &ExtensionThresholds) -> bool {
    match finger {
        Finger::Thumb => {
            let reach = FingerReach::measure(hand, finger, thresholds.thumb_metric);
            thumb_reach_is_extended(&reach, thresholds.thumb_margin)
        }
        _ => {
            let reach = FingerReach::measure(hand, finger, ThumbMetric::Spatial);
            reach_is_extended(&reach, thresholds.pip_margin, thresholds.mcp_margin)
        }
    }
}

/// Extended/curled state of all five fingers.
pub fn finger_states(hand: &Hand, thresholds: &ExtensionThresholds) -> FingerStates {
    let mut states = FingerStates::CURLED;
    for finger in Finger::ALL {
        states.set(finger, is_extended(hand, finger, thresholds));
    }
    states
}
