//! Count how many times a gesture starts in a frame log.

use std::path::PathBuf;

use handsign_common::clock::FrameClock;
use handsign_common::config::AppConfig;
use handsign_gesture_core::edge::GestureEdgeDetector;
use handsign_hand_model::gesture::Gesture;

pub fn run(config: &AppConfig, path: PathBuf, gesture: String) -> anyhow::Result<()> {
    let target: Gesture = gesture
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid gesture '{gesture}': {e}"))?;
    let classifier = super::build_classifier(config, None)?;
    let log = super::read_log(&path)?;

    if classifier.table().position(&target).is_none() && !target.is_unknown() {
        tracing::warn!(gesture = %target, "Gesture is not in the active table; count will be zero");
    }

    println!("Counting '{target}' in: {}", path.display());

    let mut detector = GestureEdgeDetector::new(target);
    let mut skipped = 0u64;
    for record in &log.records {
        let Some((frame, outcome)) = super::classify_record(&classifier, record)? else {
            skipped += 1;
            continue;
        };
        if let Some(edge) = detector.observe(&outcome) {
            println!(
                "  #{:<4} at {:.3}s",
                edge.count,
                FrameClock::ns_to_secs(frame.timestamp_ns)
            );
        }
    }

    println!("\nTotal: {}", detector.count());
    if skipped > 0 {
        println!("Skipped (invalid): {skipped}");
    }
    Ok(())
}
