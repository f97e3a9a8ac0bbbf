use embedded_hal::digital::InputPin;

use crate::config::Delays;
use crate::detector::{GestureDetector, State};
use crate::gesture::{Events, Gesture};
use crate::timer::Clock;

/// Logic level at which the button is considered pressed.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    Low,
    High,
}

impl ActiveLevel {
    pub fn is_active<P: InputPin>(self, pin: &mut P) -> Result<bool, P::Error> {
        match self {
            ActiveLevel::Low => pin.is_low(),
            ActiveLevel::High => pin.is_high(),
        }
    }
}

/// Internal resistor requested for the button input.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
}

/// Pins that can be switched to input mode after they were handed over.
///
/// Most HALs configure pins through their type, before they are passed to [`Pushbutton::new`].
/// This trait is for the ones that do not.
pub trait ConfigureInput {
    fn configure_input(&mut self, pull: Pull);
}

/// A gesture detector bound to a pin and a clock.
///
/// ```rust
/// # use core::convert::Infallible;
/// # struct Pin;
/// # impl embedded_hal::digital::ErrorType for Pin { type Error = Infallible; }
/// # impl embedded_hal::digital::InputPin for Pin {
/// #     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(true) }
/// #     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(false) }
/// # }
/// # struct Millis;
/// # impl pushbutton::Clock for Millis { fn now_ms(&self) -> u32 { 0 } }
/// use pushbutton::{ActiveLevel, Events, Gesture, Pushbutton};
///
/// let mut button = Pushbutton::new(Pin, ActiveLevel::Low, Millis);
/// button.enable_events(Events::DOUBLE_TAP | Events::LONG_PRESS);
/// button.set_delays(50, 0, 0);
///
/// // In the control loop, more often than every 50ms:
/// button.update().unwrap();
/// match button.take_event() {
///     Some(Gesture::SingleTap) => {}
///     Some(Gesture::DoubleTap) => {}
///     Some(Gesture::LongPress) => {}
///     None => {}
/// }
/// ```
#[derive(Debug)]
pub struct Pushbutton<P, C> {
    pin: P,
    clock: C,
    active_level: ActiveLevel,
    detector: GestureDetector,
}

impl<P: InputPin, C: Clock> Pushbutton<P, C> {
    /// Takes a pin that is already configured as an input.
    pub fn new(pin: P, active_level: ActiveLevel, clock: C) -> Self {
        Pushbutton {
            pin,
            clock,
            active_level,
            detector: GestureDetector::new(),
        }
    }

    /// Configures `pin` as an input with the given pull resistor, then binds it.
    pub fn configure(mut pin: P, active_level: ActiveLevel, pull: Pull, clock: C) -> Self
    where
        P: ConfigureInput,
    {
        pin.configure_input(pull);
        Self::new(pin, active_level, clock)
    }

    /// Samples the pin, unless in a debounce lockout, and advances the detector.
    ///
    /// Should be called more often than once per debounce period. A pin error leaves the
    /// detector untouched.
    pub fn update(&mut self) -> Result<(), P::Error> {
        let now_ms = self.clock.now_ms();
        let pin = &mut self.pin;
        let active_level = self.active_level;
        self.detector
            .try_update(now_ms, || active_level.is_active(pin))
    }

    pub fn enable_events(&mut self, events: Events) {
        self.detector.enable_events(events);
    }

    /// See [`GestureDetector::set_delays`], `0` keeps the current value.
    pub fn set_delays(&mut self, debounce_ms: u32, double_tap_window_ms: u32, long_press_ms: u32) {
        self.detector
            .set_delays(debounce_ms, double_tap_window_ms, long_press_ms);
    }

    pub fn delays(&self) -> Delays {
        self.detector.delays()
    }

    pub fn events(&self) -> Events {
        self.detector.events()
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active_level
    }

    pub fn state(&self) -> State {
        self.detector.state()
    }

    pub fn single_tap(&mut self) -> bool {
        self.detector.single_tap()
    }

    pub fn double_tap(&mut self) -> bool {
        self.detector.double_tap()
    }

    pub fn long_press(&mut self) -> bool {
        self.detector.long_press()
    }

    pub fn event_detected(&self) -> bool {
        self.detector.event_detected()
    }

    pub fn take_event(&mut self) -> Option<Gesture> {
        self.detector.take_event()
    }

    pub fn detector(&self) -> &GestureDetector {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut GestureDetector {
        &mut self.detector
    }

    /// Releases the pin and the clock.
    pub fn free(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    struct FakeClock(Cell<u32>);

    impl FakeClock {
        fn new() -> FakeClock {
            FakeClock(Cell::new(0))
        }

        fn advance(&self, ms: u32) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    struct FakePin<'a> {
        high: &'a Cell<bool>,
        pull: Option<Pull>,
        configured: u32,
    }

    impl ErrorType for FakePin<'_> {
        type Error = Infallible;
    }

    impl InputPin for FakePin<'_> {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high.get())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high.get())
        }
    }

    impl ConfigureInput for FakePin<'_> {
        fn configure_input(&mut self, pull: Pull) {
            self.pull = Some(pull);
            self.configured += 1;
        }
    }

    #[derive(Debug, PartialEq)]
    struct PinFault;

    impl Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct FaultyPin;

    impl ErrorType for FaultyPin {
        type Error = PinFault;
    }

    impl InputPin for FaultyPin {
        fn is_high(&mut self) -> Result<bool, PinFault> {
            Err(PinFault)
        }

        fn is_low(&mut self) -> Result<bool, PinFault> {
            Err(PinFault)
        }
    }

    fn poll<P: InputPin>(button: &mut Pushbutton<P, &FakeClock>, clock: &FakeClock, polls: u32)
    where
        P::Error: core::fmt::Debug,
    {
        for _ in 0..polls {
            button.update().unwrap();
            clock.advance(5);
        }
    }

    #[test]
    fn active_high_pin_is_read_only_outside_lockout() {
        let clock = FakeClock::new();
        let expectations = [
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::Low),
        ];
        let mut button = Pushbutton::new(PinMock::new(&expectations), ActiveLevel::High, &clock);
        button.set_delays(10, 0, 0);

        // Reads at 0ms (press), 20ms (confirmed) and 25ms (release), locked out in between.
        poll(&mut button, &clock, 6);
        assert!(button.single_tap());
        assert_eq!(button.state(), State::Ready);

        let (mut pin, _) = button.free();
        pin.done();
    }

    #[test]
    fn active_low_pin_is_pressed_when_low() {
        let clock = FakeClock::new();
        let expectations = [
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::High),
        ];
        let mut button = Pushbutton::new(PinMock::new(&expectations), ActiveLevel::Low, &clock);
        button.set_delays(10, 0, 0);

        poll(&mut button, &clock, 6);
        assert_eq!(button.take_event(), Some(Gesture::SingleTap));

        let (mut pin, _) = button.free();
        pin.done();
    }

    #[test]
    fn configure_requests_pull_once() {
        let clock = FakeClock::new();
        let high = Cell::new(true);
        let pin = FakePin {
            high: &high,
            pull: None,
            configured: 0,
        };
        let mut button = Pushbutton::configure(pin, ActiveLevel::Low, Pull::Up, &clock);
        button.enable_events(Events::LONG_PRESS);

        poll(&mut button, &clock, 20);
        assert!(!button.event_detected());

        high.set(false);
        poll(&mut button, &clock, 220);
        assert!(button.long_press());

        let (pin, _) = button.free();
        assert_eq!(pin.pull, Some(Pull::Up));
        assert_eq!(pin.configured, 1);
    }

    #[test]
    fn pin_error_is_returned() {
        let clock = FakeClock::new();
        let mut button = Pushbutton::new(FaultyPin, ActiveLevel::High, &clock);
        assert_eq!(button.update(), Err(PinFault));
        assert_eq!(button.state(), State::Ready);
        assert!(!button.detector().is_locked_out());
    }

    #[test]
    fn configuration_reaches_the_detector() {
        let clock = FakeClock::new();
        let high = Cell::new(false);
        let pin = FakePin {
            high: &high,
            pull: None,
            configured: 0,
        };
        let mut button = Pushbutton::new(pin, ActiveLevel::High, &clock);
        button.enable_events(Events::DOUBLE_TAP);
        button.set_delays(0, 200, 0);
        assert_eq!(button.events(), Events::DOUBLE_TAP);
        assert_eq!(button.delays().double_tap_window_ms, 200);
        assert_eq!(button.delays().debounce_ms, 80);
        assert_eq!(button.active_level(), ActiveLevel::High);
        assert_eq!(button.detector_mut().take_event(), None);
    }
}
