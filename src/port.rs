use generic_array::typenum::{IsLessOrEqual, True, Unsigned, U32};
use generic_array::{ArrayLength, GenericArray};

use crate::config::Delays;
use crate::detector::GestureDetector;
use crate::gesture::{Events, Gesture};

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The queried button index is not below the `BTNS` the bank was built with
    BtnUninitialized,
}

/// Detects gestures on every button of a port in one pass.
///
/// Each button gets its own [`GestureDetector`], so buttons are completely independent: one may
/// be in a double-tap window while another is held for a long press.
///
/// A port word has 32 bits, so `BTNS` is limited to 32 buttons at compile time:
///
/// ```rust,compile_fail
/// use pushbutton::typenum::consts::U33;
/// use pushbutton::PortGestureDetector;
///
/// let port: PortGestureDetector<U33> = PortGestureDetector::new();
/// ```
pub struct PortGestureDetector<BTNS>
where
    BTNS: ArrayLength<GestureDetector> + IsLessOrEqual<U32, Output = True>,
{
    detectors: GenericArray<GestureDetector, BTNS>,
}

impl<BTNS> PortGestureDetector<BTNS>
where
    BTNS: ArrayLength<GestureDetector> + IsLessOrEqual<U32, Output = True>,
{
    /// Returns a PortGestureDetector struct
    ///
    /// # Generic arguments
    ///
    /// * `BTNS` - Number of buttons, 1 to 32. Button `n` is read from bit `n` of the word passed
    /// to `update`
    pub fn new() -> PortGestureDetector<BTNS> {
        PortGestureDetector {
            detectors: GenericArray::default(),
        }
    }

    /// Enables the optional gestures on every button.
    pub fn enable_events(&mut self, events: Events) {
        for detector in self.detectors.iter_mut() {
            detector.enable_events(events);
        }
    }

    /// Overrides the delays of every button, `0` keeps the current value.
    pub fn set_delays(&mut self, debounce_ms: u32, double_tap_window_ms: u32, long_press_ms: u32) {
        for detector in self.detectors.iter_mut() {
            detector.set_delays(debounce_ms, double_tap_window_ms, long_press_ms);
        }
    }

    /// This method should be called more often than once per debounce period.
    ///
    /// # Arguments
    ///
    /// * `now_ms` - Current value of a monotonic millisecond counter
    /// * `port_value` - One bit per button, a set bit meaning pressed. Invert an active-low port
    /// with `!` first. Bits at or above `BTNS` are ignored. Every bit feeds its own detector, so
    /// a lockout on one button never hides the level of another
    pub fn update(&mut self, now_ms: u32, port_value: u32) {
        for (index, detector) in self.detectors.iter_mut().enumerate() {
            detector.update(now_ms, port_value & (1u32 << index) != 0);
        }
    }

    pub fn get(&self, pin: usize) -> Result<&GestureDetector, Error> {
        self.detectors.get(pin).ok_or(Error::BtnUninitialized)
    }

    pub fn get_mut(&mut self, pin: usize) -> Result<&mut GestureDetector, Error> {
        self.detectors.get_mut(pin).ok_or(Error::BtnUninitialized)
    }

    pub fn delays(&self, pin: usize) -> Result<Delays, Error> {
        self.get(pin).map(GestureDetector::delays)
    }

    /// Returns and clears the pending gesture of the queried button.
    ///
    /// # Arguments
    ///
    /// * `pin` - Index of the button, the same as its bit in `port_value`
    pub fn take_event(&mut self, pin: usize) -> Result<Option<Gesture>, Error> {
        self.get_mut(pin).map(GestureDetector::take_event)
    }

    /// Drains the pending gestures of all buttons, yielding `(button, gesture)` pairs.
    pub fn events(&mut self) -> impl Iterator<Item = (usize, Gesture)> + '_ {
        self.detectors
            .iter_mut()
            .enumerate()
            .filter_map(|(index, detector)| detector.take_event().map(|gesture| (index, gesture)))
    }

    pub fn len(&self) -> usize {
        BTNS::USIZE
    }

    pub fn is_empty(&self) -> bool {
        BTNS::USIZE == 0
    }
}

impl<BTNS> Default for PortGestureDetector<BTNS>
where
    BTNS: ArrayLength<GestureDetector> + IsLessOrEqual<U32, Output = True>,
{
    fn default() -> Self {
        Self::new()
    }
}
