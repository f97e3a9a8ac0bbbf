//! Pushbutton is a library to debounce a momentary pushbutton and classify what the user did with
//! it: a single tap, a double tap or a long press. A [`GestureDetector`] handles one button given
//! the raw level and the time, [`Pushbutton`] binds it to an `embedded-hal` input pin and a
//! [`Clock`], and [`PortGestureDetector`] runs one detector per bit of a port.
//!
//! # Debouncing
//!
//! Every level change starts a lockout during which the input is not sampled, riding out contact
//! bounce. A press is only accepted if the button is still active once the lockout is over, so
//! glitches shorter than the debounce period never produce a gesture. The `update` method must
//! be called more often than once per debounce period (80ms by default).
//!
//! # Gestures
//!
//! Single taps are always detected. Double taps and long presses are off by default and must be
//! enabled with `enable_events`, because they delay the classification of a single tap:
//!
//! * with long presses enabled, a single tap is reported on release, and a long press once the
//! button has been held for the long-press threshold (1000ms by default)
//! * with double taps enabled, a single tap is reported once the double-tap window (300ms by
//! default) has passed since the release without a second press
//!
//! Detected gestures stay pending until consumed by `single_tap`, `double_tap`, `long_press` or
//! `take_event`. Each gesture is reported exactly once.
//!
//! ## Example
//! ```rust
//! use pushbutton::{Events, Gesture, GestureDetector};
//!
//! let mut detector = GestureDetector::new();
//! detector.enable_events(Events::DOUBLE_TAP);
//!
//! let mut now = 0;
//! let mut poll = |detector: &mut GestureDetector, active: bool, ms: u32| {
//!     for _ in 0..ms / 10 {
//!         detector.update(now, active);
//!         now += 10;
//!     }
//! };
//!
//! // A 10ms glitch is ignored.
//! poll(&mut detector, true, 10);
//! poll(&mut detector, false, 500);
//! assert!(!detector.event_detected());
//!
//! // Tap, release and tap again within the double-tap window.
//! poll(&mut detector, true, 150);
//! poll(&mut detector, false, 150);
//! poll(&mut detector, true, 150);
//! assert!(detector.double_tap());
//! assert!(!detector.double_tap());
//!
//! // A lone tap is reported after the window.
//! poll(&mut detector, false, 200);
//! poll(&mut detector, true, 150);
//! poll(&mut detector, false, 500);
//! assert_eq!(Some(Gesture::SingleTap), detector.take_event());
//! assert_eq!(None, detector.take_event());
//! ```

#![no_std]

mod config;
mod detector;
mod gesture;
mod log;
mod port;
mod pushbutton;
mod timer;

pub use generic_array::typenum;

pub use crate::config::{
    Delays, DEFAULT_DEBOUNCE_MS, DEFAULT_DOUBLE_TAP_WINDOW_MS, DEFAULT_LONG_PRESS_MS,
};
pub use crate::detector::{GestureDetector, State};
pub use crate::gesture::{Events, Gesture};
pub use crate::port::{Error, PortGestureDetector};
pub use crate::pushbutton::{ActiveLevel, ConfigureInput, Pull, Pushbutton};
pub use crate::timer::{Clock, Stopwatch};
