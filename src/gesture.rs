use core::ops::{BitOr, BitOrAssign};

/// A classified button interaction.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Pressed once and released.
    SingleTap,
    /// Pressed twice, the second press arriving within the double-tap window.
    DoubleTap,
    /// Pressed once and held past the long-press threshold.
    LongPress,
}

impl Gesture {
    /// The bit representing this gesture in an [`Events`] mask.
    pub const fn bit(self) -> u8 {
        match self {
            Gesture::SingleTap => Events::SINGLE_TAP.0,
            Gesture::DoubleTap => Events::DOUBLE_TAP.0,
            Gesture::LongPress => Events::LONG_PRESS.0,
        }
    }
}

/// Selection of gestures to detect.
///
/// Single taps are always detected, so `SINGLE_TAP` in a mask passed to `enable_events` has no
/// effect. Masks combine with `|`:
///
/// ```rust
/// use pushbutton::Events;
///
/// let events = Events::DOUBLE_TAP | Events::LONG_PRESS;
/// assert!(events.double_tap());
/// assert!(events.long_press());
/// ```
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Events(u8);

impl Events {
    pub const SINGLE_TAP: Events = Events(0b001);
    pub const DOUBLE_TAP: Events = Events(0b010);
    pub const LONG_PRESS: Events = Events(0b100);

    const OPTIONAL: u8 = Self::DOUBLE_TAP.0 | Self::LONG_PRESS.0;

    /// No optional gesture enabled.
    pub const fn empty() -> Events {
        Events(0)
    }

    /// Builds a mask from raw bits, unknown bits are dropped.
    pub const fn from_bits(bits: u8) -> Events {
        Events(bits & (Self::SINGLE_TAP.0 | Self::OPTIONAL))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, gesture: Gesture) -> bool {
        self.0 & gesture.bit() != 0
    }

    pub const fn double_tap(self) -> bool {
        self.contains(Gesture::DoubleTap)
    }

    pub const fn long_press(self) -> bool {
        self.contains(Gesture::LongPress)
    }

    /// Returns true when a press can not be classified at the moment it is confirmed.
    pub const fn any_optional(self) -> bool {
        self.0 & Self::OPTIONAL != 0
    }

    pub(crate) const fn optional(self) -> Events {
        Events(self.0 & Self::OPTIONAL)
    }
}

impl BitOr for Events {
    type Output = Events;

    fn bitor(self, rhs: Events) -> Events {
        Events(self.0 | rhs.0)
    }
}

impl BitOrAssign for Events {
    fn bitor_assign(&mut self, rhs: Events) {
        self.0 |= rhs.0;
    }
}

impl From<Gesture> for Events {
    fn from(gesture: Gesture) -> Events {
        Events(gesture.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_combine() {
        let events = Events::DOUBLE_TAP | Events::LONG_PRESS;
        assert_eq!(events.bits(), 0b110);
        assert!(events.any_optional());
        assert!(!events.contains(Gesture::SingleTap));
    }

    #[test]
    fn single_tap_alone_is_not_optional() {
        assert!(!Events::SINGLE_TAP.any_optional());
        assert!(!Events::empty().any_optional());
        assert_eq!(Events::SINGLE_TAP.optional(), Events::empty());
    }

    #[test]
    fn unknown_bits_are_dropped() {
        assert_eq!(Events::from_bits(0xff).bits(), 0b111);
        assert_eq!(Events::from_bits(0b1000), Events::empty());
    }

    #[test]
    fn gesture_converts_into_its_bit() {
        let mut events = Events::empty();
        events |= Gesture::LongPress.into();
        assert!(events.long_press());
        assert!(!events.double_tap());
    }
}
