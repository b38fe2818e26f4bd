//! Byte-level transport to the PCF8574, and the timed 4 bit write built on top of it
//!
//! If you want to drive the LCD through something other than [`I2cSender`],
//! implement [`ByteBus`] for it.

use embedded_hal_async::delay::DelayNs;

use crate::{
    command::{Command, RegisterSelection, State, ENABLE_PULSE_MS},
    utils::{BitOps, BitState},
};

pub mod i2c_sender;

pub use i2c_sender::I2cSender;

// PCF8574 to parallel:
// P7 -> P0
// DB7/DB6/DB5/DB4/BL/EN/RW/RS

/// Register select output
pub const PIN_RS: u8 = 0;
/// Enable (latch) output
pub const PIN_EN: u8 = 2;
/// Backlight transistor output
pub const PIN_BL: u8 = 3;

/// [`ByteBus`] is what the driver needs from the hardware:
/// one byte presented on the expander outputs per call
///
/// The byte must be accepted before the call returns.
pub trait ByteBus {
    /// Error reported by the underlying transport
    type Error;

    /// Latch `value` onto the 8 expander outputs
    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error>;
}

impl<B: ByteBus + ?Sized> ByteBus for &mut B {
    type Error = B::Error;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        (**self).write_byte(value)
    }
}

/// The backlight bit alone, as written by a bare backlight change
pub(crate) fn backlight_mask(backlight: State) -> u8 {
    0u8.with_bit(PIN_BL, BitState::from(backlight == State::On))
}

/// The six expander writes of one byte transfer, each with the wait that follows it
///
/// Each nibble is presented, latched with a rising then falling EN edge, and then
/// held for the settle time of its register selection.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct NibbleSeq([(u8, u32); 6]);

impl NibbleSeq {
    pub(crate) fn new(command: Command, backlight: State) -> Self {
        let data = command.get_data();
        let rs = command.get_register_selection();

        let high_bits = data & 0xF0;
        let low_bits = (data & 0x0F) << 4;

        let control =
            backlight_mask(backlight).with_bit(PIN_RS, BitState::from(rs == RegisterSelection::Data));
        let settle_ms = rs.settle_ms();

        let mut steps = [(0u8, 0u32); 6];
        for (half, nibble) in [high_bits, low_bits].into_iter().enumerate() {
            let disabled = nibble | control;
            let enabled = disabled.with_bit(PIN_EN, BitState::Set);

            steps[half * 3] = (disabled, ENABLE_PULSE_MS);
            steps[half * 3 + 1] = (enabled, ENABLE_PULSE_MS);
            steps[half * 3 + 2] = (disabled, settle_ms);
        }

        NibbleSeq(steps)
    }

    pub(crate) fn steps(&self) -> &[(u8, u32); 6] {
        &self.0
    }
}

/// Owns the bus and the delayer, and knows the current backlight bit
///
/// Every method here runs to completion before it returns: a byte transfer is never
/// interleaved with another one on the same [`Sender`].
pub struct Sender<B: ByteBus, D: DelayNs> {
    bus: B,
    delayer: D,
    backlight: State,
}

impl<B: ByteBus, D: DelayNs> Sender<B, D> {
    /// Note:
    /// `backlight` only takes effect with the next write, nothing is sent here
    pub fn new(bus: B, delayer: D, backlight: State) -> Self {
        Self {
            bus,
            delayer,
            backlight,
        }
    }

    /// Transfer one controller byte as two nibbles, with all enable and settle waits
    pub async fn send(&mut self, command: impl Into<Command>) -> Result<(), B::Error> {
        let seq = NibbleSeq::new(command.into(), self.backlight);

        for &(byte, wait_ms) in seq.steps() {
            self.bus.write_byte(byte)?;
            self.delayer.delay_ms(wait_ms).await;
        }

        Ok(())
    }

    /// Present a single 8 bit mode nibble (upper 4 data lines) with a rising enable edge,
    /// then wait `settle_ms`
    ///
    /// Only used while the controller is still in 8 bit mode, so no RS and no backlight bit.
    pub async fn send_bootstrap_nibble(&mut self, nibble: u8, settle_ms: u32) -> Result<(), B::Error> {
        let disabled = (nibble & 0x0F) << 4;

        self.bus.write_byte(disabled)?;
        self.bus
            .write_byte(disabled.with_bit(PIN_EN, BitState::Set))?;
        self.delayer.delay_ms(settle_ms).await;

        Ok(())
    }

    /// Set the backlight, it's a single expander write without any enable pulse
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), B::Error> {
        self.backlight = backlight;
        self.bus.write_byte(backlight_mask(backlight))
    }

    /// Get the backlight bit used by every write
    pub fn get_backlight(&self) -> State {
        self.backlight
    }

    /// Give back the bus and the delayer
    pub fn release(self) -> (B, D) {
        (self.bus, self.delayer)
    }
}


#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use embassy_futures::block_on;

    use super::mock::{pair, writes, Event::*, Nack};
    use super::*;
    use crate::command::CommandSet;

    #[test]
    fn test_data_write_sequence() {
        let (bus, delay, log) = pair();
        let mut sender = Sender::new(bus, delay, State::On);

        block_on(sender.send(CommandSet::WriteDataToRAM(b'A'))).unwrap();

        // 'A' = 0x41, RS and BL set
        assert_eq!(
            *log.borrow(),
            vec![
                Write(0x49),
                DelayMs(1),
                Write(0x4D),
                DelayMs(1),
                Write(0x49),
                DelayMs(1),
                Write(0x19),
                DelayMs(1),
                Write(0x1D),
                DelayMs(1),
                Write(0x19),
                DelayMs(1),
            ]
        );
    }

    #[test]
    fn test_command_write_settles_longer() {
        let (bus, delay, log) = pair();
        let mut sender = Sender::new(bus, delay, State::On);

        block_on(sender.send(CommandSet::ClearDisplay)).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                Write(0x08),
                DelayMs(1),
                Write(0x0C),
                DelayMs(1),
                Write(0x08),
                DelayMs(5),
                Write(0x18),
                DelayMs(1),
                Write(0x1C),
                DelayMs(1),
                Write(0x18),
                DelayMs(5),
            ]
        );
    }

    #[test]
    fn test_backlight_off_clears_bit_in_every_write() {
        let (bus, delay, log) = pair();
        let mut sender = Sender::new(bus, delay, State::Off);

        block_on(sender.send(CommandSet::FunctionSet)).unwrap();

        assert_eq!(writes(&log), vec![0x20, 0x24, 0x20, 0x80, 0x84, 0x80]);
    }

    #[test]
    fn test_set_backlight_is_one_bare_write() {
        let (bus, delay, log) = pair();
        let mut sender = Sender::new(bus, delay, State::On);

        sender.set_backlight(State::Off).unwrap();
        sender.set_backlight(State::On).unwrap();

        assert_eq!(*log.borrow(), vec![Write(0x00), Write(0x08)]);
        assert_eq!(sender.get_backlight(), State::On);
    }

    #[test]
    fn test_bootstrap_nibble() {
        let (bus, delay, log) = pair();
        let mut sender = Sender::new(bus, delay, State::On);

        block_on(sender.send_bootstrap_nibble(0x3, 5)).unwrap();

        assert_eq!(*log.borrow(), vec![Write(0x30), Write(0x34), DelayMs(5)]);
    }

    #[test]
    fn test_failed_write_stops_sequence() {
        let (mut bus, delay, log) = pair();
        bus.fail_at = Some(2);
        let mut sender = Sender::new(bus, delay, State::On);

        let result = block_on(sender.send(CommandSet::ClearDisplay));

        assert_eq!(result, Err(Nack));
        assert_eq!(
            *log.borrow(),
            vec![Write(0x08), DelayMs(1), Write(0x0C), DelayMs(1)]
        );
    }
}
