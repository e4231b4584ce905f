//! Handsign Hand Model
//!
//! Defines the data contracts shared by the classifier and its callers:
//! - **Landmarks:** 3D points produced by an external hand-landmark detector
//! - **Hands:** validated 21-landmark skeletons in anatomical order
//! - **Gestures:** per-finger extended/curled states and gesture labels
//! - **Frames:** per-frame detector output and the JSONL frame log format
//!
//! `x`/`y` are normalized to `[0.0, 1.0]` against the video frame.

pub mod frame;
pub mod gesture;
pub mod landmark;
pub mod synthetic;
pub mod writer;

pub use frame::*;
pub use gesture::*;
pub use landmark::*;
pub use writer::JsonlWriter;
