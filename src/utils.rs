//! Common tools

/// The state of a bit,
/// It's either [`BitState::Clear`] to represent a 0
/// or [`BitState::Set`] to represent a 1
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

impl From<bool> for BitState {
    fn from(value: bool) -> Self {
        match value {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }
}

/// Simple bit ops on a PCF8574 output byte
///
/// Positions are masked to `0..=7`, so a bad offset can never shift out of the byte.
pub trait BitOps: Sized {
    /// Return a copy with bit `pos` forced to `state`
    fn with_bit(self, pos: u8, state: BitState) -> Self;
}

impl BitOps for u8 {
    fn with_bit(self, pos: u8, state: BitState) -> Self {
        let mask = 1u8 << (pos & 0b111);
        match state {
            BitState::Set => self | mask,
            BitState::Clear => self & !mask,
        }
    }
}

/// Turn a blocking [`embedded_hal::delay::DelayNs`] into an async one
///
/// Useful on HALs without a timer driver for async code (the stm32f4xx-hal SysTick delay, for example).
/// Every delay still busy-waits inside the wrapped delayer.
pub struct BlockingDelay<D>(pub D);

impl<D: embedded_hal::delay::DelayNs> embedded_hal_async::delay::DelayNs for BlockingDelay<D> {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.delay_ns(ns);
    }

    async fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_bit() {
        assert_eq!(0u8.with_bit(3, BitState::Set), 0b0000_1000);
        assert_eq!(0xFFu8.with_bit(0, BitState::Clear), 0b1111_1110);
        // offsets wrap inside the byte
        assert_eq!(0u8.with_bit(10, BitState::Set), 0b0000_0100);
    }

    #[test]
    fn test_blocking_delay_forwards() {
        use embedded_hal_async::delay::DelayNs as _;

        struct Counter(u32);
        impl embedded_hal::delay::DelayNs for Counter {
            fn delay_ns(&mut self, ns: u32) {
                self.0 += ns;
            }
        }

        let mut delay = BlockingDelay(Counter(0));
        embassy_futures::block_on(delay.delay_ms(5));
        assert_eq!(delay.0 .0, 5_000_000);
    }
}
