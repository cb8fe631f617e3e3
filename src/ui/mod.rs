/// Terminal I/O: surfaces, the safe writer, and the frame clock.

pub mod buffer;
pub mod clock;
pub mod surface;
pub mod terminal;
