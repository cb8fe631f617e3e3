/// Run failures that escape the engine.
///
/// A terminal too small to animate is not listed here: it ends the run
/// normally with `Outcome::TooSmall`. Single-cell write failures never
/// leave the safe writer.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BurnError {
    /// The surface stopped accepting clears, flushes or key reads mid-run.
    #[error("terminal surface failed: {0}")]
    Surface(#[from] io::Error),

    /// Raw mode, alternate screen or size query failed before the run.
    #[error("could not prepare the terminal: {0}")]
    Terminal(#[source] io::Error),
}
