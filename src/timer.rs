//! Millisecond time keeping.

/// A monotonic millisecond counter.
///
/// The counter may wrap around; elapsed times are computed with wrapping arithmetic, so only
/// durations longer than `u32::MAX` milliseconds are ambiguous.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Elapsed time since the last `reset`.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stopwatch {
    started_at: u32,
}

impl Stopwatch {
    pub const fn new(now_ms: u32) -> Stopwatch {
        Stopwatch { started_at: now_ms }
    }

    pub fn reset(&mut self, now_ms: u32) {
        self.started_at = now_ms;
    }

    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.started_at)
    }
}
