//! GPIO-driven irrigation relay adapter.
//!
//! Generic over any `embedded-hal` [`OutputPin`], so the same adapter
//! serves the ESP-IDF pin driver in production and a fake pin in tests.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::RelayOutput;

/// Active-high relay on a single GPIO.
pub struct GpioRelay<P: OutputPin> {
    pin: P,
    active: bool,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Wrap a pin. The relay is driven low (off) immediately so the valve
    /// is guaranteed closed at boot, whatever state the pin was left in.
    pub fn new(mut pin: P) -> Self {
        if pin.set_low().is_err() {
            warn!("relay: initial set_low failed");
        }
        Self { pin, active: false }
    }

    /// Current commanded state.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<P: OutputPin> RelayOutput for GpioRelay<P> {
    fn set(&mut self, active: bool) {
        // The service re-asserts the command every poll; skip the GPIO
        // write when nothing changed.
        if active == self.active {
            return;
        }
        let result = if active {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => self.active = active,
            // Keep the previous state so the next poll retries the write.
            Err(_) => warn!("relay: GPIO write failed, will retry next poll"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct FakePin {
        level: bool,
        writes: usize,
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level = false;
            self.writes += 1;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn boot_forces_relay_off() {
        let relay = GpioRelay::new(FakePin {
            level: true,
            writes: 0,
        });
        assert!(!relay.is_active());
        assert!(!relay.pin.level);
    }

    #[test]
    fn set_is_idempotent_on_the_gpio() {
        let mut relay = GpioRelay::new(FakePin::default());
        let boot_writes = relay.pin.writes;

        relay.set(true);
        relay.set(true);
        relay.set(true);
        assert!(relay.pin.level);
        assert_eq!(relay.pin.writes, boot_writes + 1, "one write for one change");

        relay.set(false);
        assert!(!relay.pin.level);
        assert_eq!(relay.pin.writes, boot_writes + 2);
    }
}
