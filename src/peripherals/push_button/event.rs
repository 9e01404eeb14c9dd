//! Button event encoding: one bit per button plus a long-press flag.

/// Highest number of buttons a driver instance can serve.
/// Bit 31 of the encoding is reserved for the long-press flag.
pub const MAX_BUTTONS: usize = 31;

/// A classified press of exactly one button.
///
/// Encoded as a `u32`: bit `i` identifies button `i`, bit 31 marks a long
/// press. The raw value `0` never names an event and is used as "no event"
/// by [`Dispatcher::dispatch_raw`](super::Dispatcher::dispatch_raw).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ButtonEvent(u32);

impl ButtonEvent {
    /// Long-press flag.
    pub const LONG_MASK: u32 = 0x8000_0000;

    /// Short press of button `index`.
    ///
    /// Panics if `index >= MAX_BUTTONS`.
    pub const fn short(index: usize) -> Self {
        assert!(index < MAX_BUTTONS, "button index out of range");
        Self(1 << index)
    }

    /// Long press of button `index`.
    ///
    /// Panics if `index >= MAX_BUTTONS`.
    pub const fn long(index: usize) -> Self {
        assert!(index < MAX_BUTTONS, "button index out of range");
        Self((1 << index) | Self::LONG_MASK)
    }

    /// Decode a raw value. Returns `None` for `0` and for anything that
    /// does not name exactly one button.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        if (raw & !Self::LONG_MASK).count_ones() == 1 {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_long(self) -> bool {
        self.0 & Self::LONG_MASK != 0
    }

    /// Button bitmask with the long-press flag stripped.
    pub const fn mask(self) -> u32 {
        self.0 & !Self::LONG_MASK
    }

    /// Index of the button this event belongs to.
    pub const fn index(self) -> usize {
        self.mask().trailing_zeros() as usize
    }
}

impl From<ButtonEvent> for u32 {
    fn from(event: ButtonEvent) -> u32 {
        event.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_share_the_button_bit() {
        let short = ButtonEvent::short(2);
        let long = ButtonEvent::long(2);

        assert_eq!(short.raw(), 0b100);
        assert_eq!(long.raw(), 0x8000_0004);
        assert_eq!(short.mask(), long.mask());
        assert!(!short.is_long());
        assert!(long.is_long());
        assert_eq!(long.index(), 2);
    }

    #[test]
    fn highest_button_does_not_collide_with_long_flag() {
        let event = ButtonEvent::short(MAX_BUTTONS - 1);
        assert_eq!(event.raw(), 0x4000_0000);
        assert!(!event.is_long());
        assert_eq!(event.index(), 30);
    }

    #[test]
    fn from_raw_rejects_non_events() {
        assert_eq!(ButtonEvent::from_raw(0), None);
        assert_eq!(ButtonEvent::from_raw(ButtonEvent::LONG_MASK), None);
        assert_eq!(ButtonEvent::from_raw(0b011), None);
        assert_eq!(ButtonEvent::from_raw(0b010), Some(ButtonEvent::short(1)));
        assert_eq!(
            ButtonEvent::from_raw(0x8000_0001),
            Some(ButtonEvent::long(0))
        );
    }

    #[test]
    #[should_panic]
    fn index_past_flag_bit_panics() {
        let _ = ButtonEvent::short(MAX_BUTTONS);
    }
}
