/// Frame clock: the only place the animation waits.

use std::time::Duration;

pub trait Clock {
    fn sleep(&mut self, pause: Duration);
}

/// Blocks the thread for the full pause.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, pause: Duration) {
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }
}

/// Returns immediately and remembers every pause.
#[derive(Clone, Debug, Default)]
pub struct RecordingClock {
    pub pauses: Vec<Duration>,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Duration {
        self.pauses.iter().sum()
    }
}

impl Clock for RecordingClock {
    fn sleep(&mut self, pause: Duration) {
        self.pauses.push(pause);
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn sleep(&mut self, pause: Duration) {
        (**self).sleep(pause)
    }
}
