/// The choreography as data: one entry per presented frame.
///
/// The sequencer walks this table in order, drawing `(stage, frame)` and
/// then pausing for `pause`. Nothing else decides timing.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    TooSmall,
    DrawPaper,
    Ignition,
    Consumption,
    FullBurn,
    Embers,
    Ashes,
    FinalMessage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameEntry {
    pub stage: Stage,
    /// 0-based frame index within the stage.
    pub frame: usize,
    pub pause: Duration,
}

pub const FULL_BURN_FRAMES: usize = 6;
pub const EMBER_FRAMES: usize = 4;
pub const ASH_FRAMES: usize = 5;

const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub const TOO_SMALL_PAUSE: Duration = ms(2000);
pub const PAPER_PAUSE: Duration = ms(600);
pub const SPARK_PAUSE: Duration = ms(250);
pub const FLAME_PAUSE: Duration = ms(180);
pub const PULSE_PAUSE: Duration = ms(300);
pub const EMBER_WARM_PAUSE: Duration = ms(250);
pub const EMBER_COOL_PAUSE: Duration = ms(350);
pub const ASH_PAUSE: Duration = ms(350);
pub const FADE_PAUSE: Duration = ms(300);

fn entry(stage: Stage, frame: usize, pause: Duration) -> FrameEntry {
    FrameEntry { stage, frame, pause }
}

/// The single frame shown when the box does not fit.
pub fn too_small() -> Vec<FrameEntry> {
    vec![entry(Stage::TooSmall, 0, TOO_SMALL_PAUSE)]
}

/// Pause after consumption iteration `i` (1-based) of `name_len`.
///
/// Five evenly spaced checkpoints hold longer so the burn pulses.
/// Names of five chars or fewer pulse on every iteration but the last.
pub fn consumption_pause(i: usize, name_len: usize) -> Duration {
    let spacing = if name_len > 5 { (name_len / 5).max(1) } else { 1 };
    if i > 0 && i < name_len && i % spacing == 0 {
        PULSE_PAUSE
    } else {
        FLAME_PAUSE
    }
}

/// Every frame from the blank paper to the final message.
pub fn choreography(name_len: usize) -> Vec<FrameEntry> {
    let mut frames = Vec::with_capacity(name_len + 20);

    frames.push(entry(Stage::DrawPaper, 0, PAPER_PAUSE));

    frames.push(entry(Stage::Ignition, 0, SPARK_PAUSE));
    frames.push(entry(Stage::Ignition, 1, FLAME_PAUSE));

    for i in 1..=name_len {
        frames.push(entry(Stage::Consumption, i - 1, consumption_pause(i, name_len)));
    }

    for f in 0..FULL_BURN_FRAMES {
        frames.push(entry(Stage::FullBurn, f, FLAME_PAUSE));
    }

    for f in 0..EMBER_FRAMES {
        let pause = if f > 1 { EMBER_COOL_PAUSE } else { EMBER_WARM_PAUSE };
        frames.push(entry(Stage::Embers, f, pause));
    }

    for f in 0..ASH_FRAMES {
        frames.push(entry(Stage::Ashes, f, ASH_PAUSE));
    }

    frames.push(entry(Stage::FinalMessage, 0, FADE_PAUSE));
    frames.push(entry(Stage::FinalMessage, 1, Duration::ZERO));

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(frames: &[FrameEntry], stage: Stage) -> usize {
        frames.iter().filter(|f| f.stage == stage).count()
    }

    #[test]
    fn stage_order_is_fixed() {
        let frames = choreography(7);
        let mut order: Vec<Stage> = Vec::new();
        for f in &frames {
            if order.last() != Some(&f.stage) {
                order.push(f.stage);
            }
        }
        assert_eq!(
            order,
            vec![
                Stage::DrawPaper,
                Stage::Ignition,
                Stage::Consumption,
                Stage::FullBurn,
                Stage::Embers,
                Stage::Ashes,
                Stage::FinalMessage,
            ]
        );
    }

    #[test]
    fn frame_counts_per_stage() {
        let frames = choreography(10);
        assert_eq!(count(&frames, Stage::DrawPaper), 1);
        assert_eq!(count(&frames, Stage::Ignition), 2);
        assert_eq!(count(&frames, Stage::Consumption), 10);
        assert_eq!(count(&frames, Stage::FullBurn), 6);
        assert_eq!(count(&frames, Stage::Embers), 4);
        assert_eq!(count(&frames, Stage::Ashes), 5);
        assert_eq!(count(&frames, Stage::FinalMessage), 2);
    }

    #[test]
    fn empty_name_skips_consumption() {
        let frames = choreography(0);
        assert_eq!(count(&frames, Stage::Consumption), 0);
        assert_eq!(frames.len(), 1 + 2 + 6 + 4 + 5 + 2);
    }

    #[test]
    fn consumption_pulses_at_checkpoints() {
        // 20 chars: spacing 4, pulses at 4, 8, 12, 16 (20 is the last frame).
        let pulses: Vec<usize> = (1..=20)
            .filter(|&i| consumption_pause(i, 20) == PULSE_PAUSE)
            .collect();
        assert_eq!(pulses, vec![4, 8, 12, 16]);

        // Short names pulse on every frame except the last.
        let pulses: Vec<usize> = (1..=4)
            .filter(|&i| consumption_pause(i, 4) == PULSE_PAUSE)
            .collect();
        assert_eq!(pulses, vec![1, 2, 3]);
        assert_eq!(consumption_pause(1, 1), FLAME_PAUSE);
    }

    #[test]
    fn ember_pauses_cool_down() {
        let pauses: Vec<Duration> = choreography(3)
            .iter()
            .filter(|f| f.stage == Stage::Embers)
            .map(|f| f.pause)
            .collect();
        assert_eq!(pauses, vec![ms(250), ms(250), ms(350), ms(350)]);
    }

    #[test]
    fn ignition_spans_two_subframes() {
        let ignition: Duration = choreography(3)
            .iter()
            .filter(|f| f.stage == Stage::Ignition)
            .map(|f| f.pause)
            .sum();
        assert_eq!(ignition, ms(430));
    }
}
