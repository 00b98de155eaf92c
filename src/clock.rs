use std::time::Instant;

/// Monotonic millisecond source the app reads `now_ms` from.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the app came up.
pub struct Ticktimer {
    origin: Instant,
}

impl Ticktimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for Ticktimer {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::Clock;

    /// Hand-advanced clock. Clones share the same time.
    #[derive(Clone, Default)]
    pub struct ManualClock {
        now: Rc<Cell<u64>>,
    }

    impl ManualClock {
        pub fn at(now_ms: u64) -> Self {
            let clock = Self::default();
            clock.now.set(now_ms);
            clock
        }

        pub fn advance(&self, ms: u64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> u64 {
            self.now.get()
        }
    }
}
