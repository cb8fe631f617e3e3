/// bfl: burn a file in the terminal, then let it go.
///
/// The engine takes a display name, a surface and a palette, plays the
/// burn to completion and returns. It never touches the filesystem; the
/// binary decides what happens to the file afterwards.

pub mod config;
pub mod domain;
pub mod sim;
pub mod ui;

pub use domain::palette::{ColorDepth, Palette};
pub use sim::error::BurnError;
pub use sim::sequencer::{run, Outcome};
