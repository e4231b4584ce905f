//! Per-frame detector output and the JSONL frame log format.
//!
//! A frame log starts with a header comment line (`# {json}`) followed by
//! one JSON object per frame:
//!
//! ```text
//! # {"schema_version":"1.0","source":"mediapipe","created_at":"...","fps":30}
//! {"t":0,"hands":[]}
//! {"t":33333333,"hands":[[{"x":0.5,"y":0.9,"z":0.0}, ...21 points]]}
//! ```
//!
//! Hands are stored unvalidated. Validation happens when a frame is
//! classified, so one bad frame never poisons the rest of the log.

use serde::{Deserialize, Serialize};

use handsign_common::clock::TimestampNs;
use handsign_common::error::{HandsignError, HandsignResult};

use crate::landmark::{Hand, Landmark};

/// Current frame log schema version.
pub const FRAME_SCHEMA_VERSION: &str = "1.0";

/// Everything the landmark detector delivered for one video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// Monotonic nanoseconds since the first frame.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Zero or more hands, each a raw landmark list in detector order.
    #[serde(default)]
    pub hands: Vec<Vec<Landmark>>,
}

impl HandFrame {
    /// A frame in which the detector found no hand.
    pub fn empty(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            hands: Vec::new(),
        }
    }

    /// A frame holding a single validated hand.
    pub fn with_hand(timestamp_ns: TimestampNs, hand: &Hand) -> Self {
        Self {
            timestamp_ns,
            hands: vec![hand.landmarks().to_vec()],
        }
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    /// Validate the hand of interest (the first detected hand).
    ///
    /// Returns `None` when no hand was detected.
    pub fn primary_hand(&self) -> Option<HandsignResult<Hand>> {
        self.hands.first().map(|raw| Hand::new(raw))
    }

    /// Timestamp as fractional seconds.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Frame log metadata, stored as the leading comment line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Producer of the landmarks (detector name, "synthetic", ...).
    pub source: String,

    /// Wall-clock time the log was created (RFC 3339).
    pub created_at: String,

    /// Nominal frame rate.
    pub fps: u32,
}

impl FrameStreamHeader {
    pub fn new(source: impl Into<String>, created_at: impl Into<String>, fps: u32) -> Self {
        Self {
            schema_version: FRAME_SCHEMA_VERSION.to_string(),
            source: source.into(),
            created_at: created_at.into(),
            fps,
        }
    }
}

/// One frame line of a log, parsed or not.
#[derive(Debug)]
pub struct FrameRecord {
    /// 1-based line number in the source text.
    pub line: usize,

    /// The parsed frame, or an `InvalidInput` error scoped to this line.
    pub frame: HandsignResult<HandFrame>,
}

/// A parsed frame log.
#[derive(Debug, Default)]
pub struct FrameLog {
    pub header: Option<FrameStreamHeader>,
    pub records: Vec<FrameRecord>,
}

impl FrameLog {
    /// Frames that parsed successfully.
    pub fn frames(&self) -> impl Iterator<Item = &HandFrame> {
        self.records.iter().filter_map(|r| r.frame.as_ref().ok())
    }

    /// Number of lines that failed to parse.
    pub fn malformed_count(&self) -> usize {
        self.records.iter().filter(|r| r.frame.is_err()).count()
    }
}

/// Parse a single frame line.
///
/// Shape errors (missing `x`/`y`, wrong types) are reported as
/// `InvalidInput` so callers can skip the frame.
pub fn parse_frame(line: &str) -> HandsignResult<HandFrame> {
    serde_json::from_str(line.trim())
        .map_err(|e| HandsignError::invalid_input(format!("malformed frame: {e}")))
}

/// Parse a header comment line. Returns `None` for anything else.
pub fn parse_header(line: &str) -> Option<FrameStreamHeader> {
    let json = line.trim().strip_prefix('#')?;
    serde_json::from_str(json.trim()).ok()
}

/// Parse a whole JSONL frame log.
///
/// The first parsable `#` line becomes the header; other comment lines
/// and blank lines are ignored. Malformed frames are kept as errors.
pub fn read_frame_log(content: &str) -> FrameLog {
    let mut log = FrameLog::default();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') {
            if log.header.is_none() {
                log.header = parse_header(trimmed);
            }
            continue;
        }
        log.records.push(FrameRecord {
            line: i + 1,
            frame: parse_frame(trimmed),
        });
    }

    log
}

/// Serialize frames to JSONL format (no header).
pub fn serialize_frames(frames: &[HandFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
