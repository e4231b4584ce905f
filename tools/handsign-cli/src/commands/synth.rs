//! Write a synthetic frame log.

use std::path::PathBuf;

use handsign_common::clock::FrameClock;
use handsign_hand_model::frame::{FrameStreamHeader, HandFrame};
use handsign_hand_model::gesture::Gesture;
use handsign_hand_model::synthetic::{canonical_states, pose, truncated_landmarks};
use handsign_hand_model::writer::JsonlWriter;

/// What to put in one synthetic frame.
enum SynthPose {
    NoHand,
    Malformed,
    Gesture(Gesture),
}

fn parse_pose(name: &str) -> anyhow::Result<SynthPose> {
    match name.trim() {
        "none" | "no_hand" => return Ok(SynthPose::NoHand),
        "malformed" => return Ok(SynthPose::Malformed),
        _ => {}
    }
    let gesture: Gesture = name
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid pose '{name}': {e}"))?;
    if canonical_states(&gesture).is_none() {
        anyhow::bail!("No synthetic pose for custom gesture '{gesture}'");
    }
    Ok(SynthPose::Gesture(gesture))
}

pub fn run(poses: Vec<String>, output: PathBuf, fps: u32, hold: u32) -> anyhow::Result<()> {
    let poses = poses
        .iter()
        .map(|p| parse_pose(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let clock = FrameClock::start(fps);
    let header = FrameStreamHeader::new("synthetic", clock.epoch_wall(), clock.fps());
    let mut writer = JsonlWriter::create(&output, Some(&header))
        .map_err(|e| anyhow::anyhow!("Failed to create frame log: {e}"))?;

    let mut index = 0u64;
    for synth in &poses {
        for _ in 0..hold.max(1) {
            let t = clock.timestamp_ns(index);
            let frame = match synth {
                SynthPose::NoHand => HandFrame::empty(t),
                SynthPose::Malformed => HandFrame {
                    timestamp_ns: t,
                    hands: vec![truncated_landmarks(Default::default())],
                },
                SynthPose::Gesture(gesture) => {
                    let states = canonical_states(gesture).unwrap_or_default();
                    HandFrame::with_hand(t, &pose(states))
                }
            };
            writer.write_record(&frame)?;
            index += 1;
        }
    }
    let frames = writer.finish()?;

    tracing::info!(frames, "Synthetic frame log written");
    println!(
        "Wrote {frames} frames ({} poses x {}) to {}",
        poses.len(),
        hold.max(1),
        output.display()
    );

    Ok(())
}
