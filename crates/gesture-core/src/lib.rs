//! Handsign Gesture Core: the classifier.
//!
//! Turns one hand's 21 landmarks into a gesture label:
//! - **Extension:** per-finger extended/curled predicates with tunable margins
//! - **Table:** ordered first-match gesture rules, extensible and reorderable
//! - **Classifier:** stateless `classify(hand) -> Gesture` and per-frame outcomes
//! - **Edge:** caller-owned wrappers that turn per-frame labels into events
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod classifier;
pub mod edge;
pub mod extension;
pub mod table;

pub use classifier::{FrameOutcome, GestureClassifier};
pub use edge::{GestureEdgeDetector, GestureEvent, GestureTracker, RisingEdge};
pub use extension::ExtensionThresholds;
pub use table::{FingerPattern, GestureRule, GestureTable};
