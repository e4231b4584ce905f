pub mod classify;
pub mod config;
pub mod count;
pub mod synth;

use std::path::Path;

use handsign_common::config::{AppConfig, ThumbMetric};
use handsign_gesture_core::classifier::{FrameOutcome, GestureClassifier};
use handsign_gesture_core::extension::ExtensionThresholds;
use handsign_hand_model::frame::{read_frame_log, FrameLog, FrameRecord, HandFrame};

/// Build the classifier from config, applying a CLI thumb-metric override.
pub fn build_classifier(
    config: &AppConfig,
    thumb_metric: Option<&str>,
) -> anyhow::Result<GestureClassifier> {
    let classifier = GestureClassifier::from_config(config)
        .map_err(|e| anyhow::anyhow!("Invalid classifier config: {e}"))?;

    let Some(metric) = thumb_metric else {
        return Ok(classifier);
    };
    let metric = match metric {
        "spatial" | "3d" => ThumbMetric::Spatial,
        "planar" | "2d" => ThumbMetric::Planar,
        other => anyhow::bail!("Unknown thumb metric: {other} (expected spatial|planar)"),
    };
    let thresholds: ExtensionThresholds = classifier.thresholds().with_thumb_metric(metric);
    Ok(GestureClassifier::new(thresholds, classifier.table().clone()))
}

/// Read and parse a frame log.
pub fn read_log(path: &Path) -> anyhow::Result<FrameLog> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read frame log {}: {e}", path.display()))?;
    let log = read_frame_log(&content);

    match &log.header {
        Some(header) => tracing::info!(
            source = %header.source,
            fps = header.fps,
            created_at = %header.created_at,
            "Loaded frame log"
        ),
        None => tracing::warn!(path = %path.display(), "Frame log has no header"),
    }

    Ok(log)
}

/// Classify one log record.
///
/// Lines that failed to parse and hands that fail validation are logged and
/// yield `Ok(None)`; the caller counts them as skipped.
pub fn classify_record<'a>(
    classifier: &GestureClassifier,
    record: &'a FrameRecord,
) -> anyhow::Result<Option<(&'a HandFrame, FrameOutcome)>> {
    let frame = match &record.frame {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(line = record.line, error = %e, "Skipping frame");
            return Ok(None);
        }
    };

    match classifier.classify_frame(frame) {
        Ok(outcome) => Ok(Some((frame, outcome))),
        Err(e) if e.is_frame_scoped() => {
            tracing::warn!(line = record.line, t = frame.timestamp_ns, error = %e, "Skipping frame");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
