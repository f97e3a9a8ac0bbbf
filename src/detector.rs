use core::convert::Infallible;

use crate::config::{Delays, Settings};
use crate::gesture::{Events, Gesture};
use crate::log;
use crate::timer::Stopwatch;

/// Where the detector is within a gesture.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for a press.
    Ready,
    /// A press edge was seen, waiting for the debounce lockout to confirm it.
    Settling,
    /// Press confirmed, waiting for the long-press threshold or for the release before a
    /// possible second tap.
    WaitLongOrDouble,
    /// Released once, watching for a second press within the double-tap window.
    WaitDouble,
    /// A second press edge was seen, waiting for the debounce lockout to confirm it.
    SettlingDouble,
    /// A gesture was classified, waiting for the release before returning to `Ready`.
    WaitInactive,
}

/// Debounces one button and classifies its gestures.
///
/// The detector knows nothing about pins or clocks: every call to [`update`] hands it the
/// current time and whether the button is currently active. [`Pushbutton`] wires it to an
/// `embedded-hal` pin and a [`Clock`].
///
/// After a level change the input is ignored for the debounce period (the lockout). `update`
/// must therefore be called more often than once per debounce period, otherwise debouncing and
/// gesture timing become inaccurate.
///
/// Settings changed while a gesture is in progress take effect on the next press.
///
/// [`update`]: GestureDetector::update
/// [`Pushbutton`]: crate::Pushbutton
/// [`Clock`]: crate::Clock
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureDetector {
    state: State,
    event: Option<Gesture>,
    lockout: bool,
    lockout_timer: Stopwatch,
    delay_timer: Stopwatch,
    configured: Settings,
    armed: Settings,
}

impl GestureDetector {
    /// Returns a detector with the default delays and only single taps enabled.
    pub const fn new() -> GestureDetector {
        GestureDetector {
            state: State::Ready,
            event: None,
            lockout: false,
            lockout_timer: Stopwatch::new(0),
            delay_timer: Stopwatch::new(0),
            configured: Settings::new(),
            armed: Settings::new(),
        }
    }

    /// Enables double-tap and/or long-press detection. Single taps are always detected, so an
    /// empty mask leaves only single taps enabled.
    pub fn enable_events(&mut self, events: Events) {
        self.configured.events = events.optional();
        log::debug!("events enabled: {}", self.configured.events);
    }

    /// Overrides the debounce period, the double-tap window and the long-press threshold.
    ///
    /// # Arguments
    ///
    /// Durations are in milliseconds. `0` keeps the current value of that field, so partial
    /// overrides are possible, e.g. `set_delays(10, 0, 0)` only shortens the debounce period.
    pub fn set_delays(&mut self, debounce_ms: u32, double_tap_window_ms: u32, long_press_ms: u32) {
        self.configured
            .delays
            .merge(debounce_ms, double_tap_window_ms, long_press_ms);
        log::debug!("delays set: {}", self.configured.delays);
    }

    pub fn delays(&self) -> Delays {
        self.configured.delays
    }

    pub fn events(&self) -> Events {
        self.configured.events
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Returns true while the input is being ignored to ride out contact bounce.
    pub fn is_locked_out(&self) -> bool {
        self.lockout
    }

    /// Advances the state machine by at most one transition.
    ///
    /// # Arguments
    ///
    /// * `now_ms` - Current value of a monotonic millisecond counter
    /// * `active` - Whether the button is currently at its active level. Ignored during a lockout
    pub fn update(&mut self, now_ms: u32, active: bool) {
        match self.try_update(now_ms, || Ok::<_, Infallible>(active)) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Same as [`update`](GestureDetector::update), but the input is sampled lazily and the
    /// sampling may fail.
    ///
    /// `sample` is only called when the detector is not in a lockout. If it returns an error, the
    /// error is passed on and the detector is left untouched.
    pub fn try_update<E, F>(&mut self, now_ms: u32, sample: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<bool, E>,
    {
        if self.lockout {
            // Sampling resumes on the next call, so a decision is never taken on a level that
            // did not have a full debounce period to settle.
            if self.lockout_timer.elapsed(now_ms) > self.armed.delays.debounce_ms {
                self.lockout = false;
            }
            return Ok(());
        }

        let active = sample()?;
        match self.state {
            State::Ready => {
                self.armed = self.configured;
                if active {
                    self.start_lockout(now_ms);
                    self.delay_timer.reset(now_ms);
                    self.transition(State::Settling);
                }
            }
            State::Settling => {
                if !active {
                    // Released before the bounce settled, not a press.
                    self.start_lockout(now_ms);
                    self.transition(State::Ready);
                } else if self.armed.events.any_optional() {
                    self.transition(State::WaitLongOrDouble);
                } else {
                    self.classify(Gesture::SingleTap);
                    self.transition(State::WaitInactive);
                }
            }
            State::WaitLongOrDouble => {
                if active {
                    if self.armed.events.long_press()
                        && self.delay_timer.elapsed(now_ms) > self.armed.delays.long_press_ms
                    {
                        self.classify(Gesture::LongPress);
                        self.transition(State::WaitInactive);
                    }
                } else {
                    self.start_lockout(now_ms);
                    if self.armed.events.double_tap() {
                        self.delay_timer.reset(now_ms);
                        self.transition(State::WaitDouble);
                    } else {
                        // The release lockout is already running, it covers the bounce before
                        // the next press is sampled.
                        self.classify(Gesture::SingleTap);
                        self.transition(State::Ready);
                    }
                }
            }
            State::WaitDouble => {
                if self.delay_timer.elapsed(now_ms) > self.armed.delays.double_tap_window_ms {
                    self.classify(Gesture::SingleTap);
                    self.transition(State::Ready);
                } else if active {
                    self.start_lockout(now_ms);
                    self.transition(State::SettlingDouble);
                }
            }
            State::SettlingDouble => {
                if active {
                    self.classify(Gesture::DoubleTap);
                    self.transition(State::WaitInactive);
                } else {
                    // Too short for a second tap, keep waiting for one.
                    self.start_lockout(now_ms);
                    if self.delay_timer.elapsed(now_ms) > self.armed.delays.double_tap_window_ms {
                        self.classify(Gesture::SingleTap);
                        self.transition(State::Ready);
                    } else {
                        self.transition(State::WaitDouble);
                    }
                }
            }
            State::WaitInactive => {
                if !active {
                    self.start_lockout(now_ms);
                    self.transition(State::Ready);
                }
            }
        }
        Ok(())
    }

    /// Returns true once per detected single tap.
    pub fn single_tap(&mut self) -> bool {
        self.take_if(Gesture::SingleTap)
    }

    /// Returns true once per detected double tap.
    pub fn double_tap(&mut self) -> bool {
        self.take_if(Gesture::DoubleTap)
    }

    /// Returns true once per detected long press.
    pub fn long_press(&mut self) -> bool {
        self.take_if(Gesture::LongPress)
    }

    /// Returns true if a gesture was detected and not consumed yet. Does not consume it.
    pub fn event_detected(&self) -> bool {
        self.event.is_some()
    }

    pub fn peek_event(&self) -> Option<Gesture> {
        self.event
    }

    /// Returns the pending gesture, if any, and clears it.
    pub fn take_event(&mut self) -> Option<Gesture> {
        self.event.take()
    }

    fn take_if(&mut self, gesture: Gesture) -> bool {
        if self.event == Some(gesture) {
            self.event = None;
            true
        } else {
            false
        }
    }

    fn start_lockout(&mut self, now_ms: u32) {
        self.lockout = true;
        self.lockout_timer.reset(now_ms);
    }

    fn classify(&mut self, gesture: Gesture) {
        if self.event.is_some() {
            log::info!("unconsumed {} replaced by {}", self.event, gesture);
        }
        log::debug!("detected {}", gesture);
        self.event = Some(gesture);
    }

    fn transition(&mut self, next: State) {
        log::trace!("{} -> {}", self.state, next);
        self.state = next;
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}
