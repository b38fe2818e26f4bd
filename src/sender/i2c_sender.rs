use embedded_hal::i2c::{I2c, SevenBitAddress};

use super::ByteBus;

/// The address most PCF8574T backpacks ship with (A0..A2 pulled high)
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x27;

/// [`ByteBus`] over an I2C bus, talking to one PCF8574 at a fixed address
///
/// Every byte is its own single-byte write transaction, so the expander
/// updates its outputs once per [`ByteBus::write_byte`].
pub struct I2cSender<I2cLcd: I2c> {
    i2c: I2cLcd,
    addr: SevenBitAddress,
}

impl<I2cLcd: I2c> I2cSender<I2cLcd> {
    /// `i2c` can be an owned bus or `&mut` to one
    pub fn new(i2c: I2cLcd, addr: SevenBitAddress) -> Self {
        Self { i2c, addr }
    }

    #[allow(missing_docs)]
    pub fn get_address(&self) -> SevenBitAddress {
        self.addr
    }

    /// Give back the I2C bus
    pub fn release(self) -> I2cLcd {
        self.i2c
    }
}

impl<I2cLcd: I2c> ByteBus for I2cSender<I2cLcd> {
    type Error = I2cLcd::Error;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.addr, &[value])
    }
}
