use crate::gesture::Events;

/// Default switch debounce lockout period (ms).
pub const DEFAULT_DEBOUNCE_MS: u32 = 80;
/// Default maximum delay between the first release and the second press (ms).
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u32 = 300;
/// Default minimum duration of a long press (ms).
pub const DEFAULT_LONG_PRESS_MS: u32 = 1000;

/// Timing used for debouncing and gesture classification, all in milliseconds.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Delays {
    pub debounce_ms: u32,
    pub double_tap_window_ms: u32,
    pub long_press_ms: u32,
}

impl Delays {
    pub const fn new() -> Delays {
        Delays {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            double_tap_window_ms: DEFAULT_DOUBLE_TAP_WINDOW_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }

    /// Replaces every field for which the override is non-zero.
    pub fn merge(&mut self, debounce_ms: u32, double_tap_window_ms: u32, long_press_ms: u32) {
        if debounce_ms > 0 {
            self.debounce_ms = debounce_ms;
        }
        if double_tap_window_ms > 0 {
            self.double_tap_window_ms = double_tap_window_ms;
        }
        if long_press_ms > 0 {
            self.long_press_ms = long_press_ms;
        }
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a detector needs to classify one gesture.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct Settings {
    pub delays: Delays,
    pub events: Events,
}

impl Settings {
    pub const fn new() -> Settings {
        Settings {
            delays: Delays::new(),
            events: Events::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let delays = Delays::default();
        assert_eq!(delays.debounce_ms, 80);
        assert_eq!(delays.double_tap_window_ms, 300);
        assert_eq!(delays.long_press_ms, 1000);
    }

    #[test]
    fn zero_overrides_are_ignored() {
        let mut delays = Delays::new();
        delays.merge(0, 0, 0);
        assert_eq!(delays, Delays::new());
    }

    #[test]
    fn partial_override_keeps_the_rest() {
        let mut delays = Delays::new();
        delays.merge(10, 0, 2000);
        assert_eq!(delays.debounce_ms, 10);
        assert_eq!(delays.double_tap_window_ms, 300);
        assert_eq!(delays.long_press_ms, 2000);

        delays.merge(0, 150, 0);
        assert_eq!(delays.debounce_ms, 10);
        assert_eq!(delays.double_tap_window_ms, 150);
        assert_eq!(delays.long_press_ms, 2000);
    }
}
