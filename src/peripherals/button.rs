//! button.rs — GPIO level source for the push-button driver

use embedded_hal::digital::InputPin;

/// Logical level of a button line, polarity already applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Pressed,
    Released,
}

/// Electrical polarity of a button line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pull-up input, button connects to GND.
    #[default]
    ActiveLow,
    /// Pull-down input, button connects to VCC.
    ActiveHigh,
}

/// Anything the sampler can pull a logical level from.
///
/// The sampler calls this exactly once per button per tick, possibly from
/// interrupt context, so implementations must not block.
pub trait ReadLevel {
    fn read_level(&mut self) -> Level;
}

/// GPIO button wrapper.
/// Caller must configure the pin's pull resistor before calling [`Button::new`].
pub struct Button<P> {
    pin: P,
    polarity: Polarity,
}

impl<P> Button<P>
where
    P: InputPin,
{
    /// Active-low button (pull-up input, button to GND).
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, Polarity::ActiveLow)
    }

    pub fn with_polarity(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Returns true if the button is currently pressed.
    /// A failed pin read counts as released.
    pub fn is_pressed(&mut self) -> bool {
        let active = match self.polarity {
            Polarity::ActiveLow => self.pin.is_low(),
            Polarity::ActiveHigh => self.pin.is_high(),
        };
        active.unwrap_or(false)
    }

    /// Returns true if the button is NOT pressed.
    pub fn is_released(&mut self) -> bool {
        !self.is_pressed()
    }

    /// Give the pin back.
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P> ReadLevel for Button<P>
where
    P: InputPin,
{
    fn read_level(&mut self) -> Level {
        if self.is_pressed() {
            Level::Pressed
        } else {
            Level::Released
        }
    }
}

impl<T: ReadLevel + ?Sized> ReadLevel for &mut T {
    fn read_level(&mut self) -> Level {
        (**self).read_level()
    }
}
