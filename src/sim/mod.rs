/// Choreography: the frame table, the stage sequencer, run errors.

pub mod error;
pub mod schedule;
pub mod sequencer;
