//! Classify every frame of a frame log.

use std::path::PathBuf;

use serde::Serialize;

use handsign_common::clock::FrameClock;
use handsign_common::config::AppConfig;
use handsign_gesture_core::classifier::FrameOutcome;
use handsign_gesture_core::edge::{GestureEvent, GestureTracker};
use handsign_hand_model::writer::JsonlWriter;

/// One line of `--output`.
#[derive(Serialize)]
struct ClassifiedFrame<'a> {
    t: u64,
    #[serde(flatten)]
    outcome: &'a FrameOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<GestureEvent>,
}

pub fn run(
    config: &AppConfig,
    path: PathBuf,
    thumb_metric: Option<String>,
    output: Option<PathBuf>,
    quiet: bool,
) -> anyhow::Result<()> {
    let classifier = super::build_classifier(config, thumb_metric.as_deref())?;
    let log = super::read_log(&path)?;

    println!("Classifying frames from: {}", path.display());
    println!(
        "  Thumb metric: {:?}, rules: {}",
        classifier.thresholds().thumb_metric(),
        classifier.table().len()
    );

    let mut writer = match &output {
        Some(out) => Some(
            JsonlWriter::create(out, log.header.as_ref())
                .map_err(|e| anyhow::anyhow!("Failed to create output: {e}"))?,
        ),
        None => None,
    };

    let mut tracker = GestureTracker::new();
    let mut no_hand = 0u64;
    let mut skipped = 0u64;

    for record in &log.records {
        let Some((frame, outcome)) = super::classify_record(&classifier, record)? else {
            skipped += 1;
            continue;
        };

        if !outcome.has_hand() {
            no_hand += 1;
        }
        let events = tracker.observe(&outcome);

        if !quiet {
            let secs = FrameClock::ns_to_secs(frame.timestamp_ns);
            println!("  {secs:>8.3}s  {outcome}");
            for event in &events {
                if let GestureEvent::Started { gesture } = event {
                    println!("             -> {gesture} started");
                }
            }
        }

        if let Some(writer) = writer.as_mut() {
            writer.write_record(&ClassifiedFrame {
                t: frame.timestamp_ns,
                outcome: &outcome,
                events,
            })?;
        }
    }

    println!();
    println!("Summary:");
    println!("  Frames classified: {}", tracker.frames_observed());
    println!("  No hand: {no_hand}");
    println!("  Skipped (invalid): {skipped}");
    for (gesture, starts) in tracker.summary() {
        println!("  {gesture}: started {starts} time(s)");
    }

    if let Some(writer) = writer {
        let path = writer.path().to_path_buf();
        let rows = writer.finish()?;
        println!("  Results written to: {} ({rows} rows)", path.display());
    }

    Ok(())
}
