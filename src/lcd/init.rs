use embedded_hal_async::delay::DelayNs;

use crate::{
    command::{CommandSet, CursorMode, State},
    error::Error,
    lcd::Lcd,
    sender::{ByteBus, Sender},
    state::LcdState,
};

/// 8 bit mode function set, repeated to resync the controller, with the wait after each
const RESET_NIBBLES: [(u8, u32); 3] = [(0x3, 5), (0x3, 1), (0x3, 1)];
/// 4 bit mode function set, only the upper nibble is seen by the controller
const FOUR_BIT_NIBBLE: (u8, u32) = (0x2, 5);

/// [`Config`] is the init config of a [`Lcd`]
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    columns: u8,
    rows: u8,
    backlight: State,
}

#[allow(missing_docs)]
impl Config {
    /// Backlight on
    pub fn new(columns: u8, rows: u8) -> Self {
        Self {
            columns,
            rows,
            backlight: State::On,
        }
    }

    pub fn get_columns(&self) -> u8 {
        self.columns
    }

    pub fn get_rows(&self) -> u8 {
        self.rows
    }

    pub fn get_backlight(&self) -> State {
        self.backlight
    }

    pub fn set_backlight(mut self, backlight: State) -> Self {
        self.backlight = backlight;
        self
    }
}

impl<B: ByteBus, D: DelayNs> Lcd<B, D> {
    /// Create a [`Lcd`] driver, nothing is sent to the hardware
    ///
    /// `bus` must already be addressed to the PCF8574 (see [`I2cSender`](crate::sender::I2cSender)).
    /// Call [`Lcd::begin`] before anything else.
    pub fn new(bus: B, delayer: D, config: Config) -> Result<Self, Error<B::Error>> {
        let state = LcdState::new(config.columns, config.rows).ok_or(
            Error::InvalidGeometry {
                columns: config.columns,
                rows: config.rows,
            },
        )?;

        Ok(Lcd {
            sender: Sender::new(bus, delayer, config.backlight),
            state,
        })
    }

    /// [`Lcd::new`] and [`Lcd::begin`] in one go
    pub async fn init(bus: B, delayer: D, config: Config) -> Result<Self, Error<B::Error>> {
        let mut lcd = Self::new(bus, delayer, config)?;
        lcd.begin().await?;
        Ok(lcd)
    }

    /// Bring the controller from any power-on state to 4 bit, 2 line,
    /// display on, cursor hidden, cleared
    ///
    /// A failure in here leaves the controller in an unknown bus mode,
    /// only a power cycle brings it back.
    pub async fn begin(&mut self) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "init {}x{} LCD",
            self.state.get_columns(),
            self.state.get_rows()
        );

        // three 8 bit function sets resync the controller, then one switches it to 4 bit
        for (nibble, settle_ms) in RESET_NIBBLES {
            self.sender.send_bootstrap_nibble(nibble, settle_ms).await?;
        }
        let (nibble, settle_ms) = FOUR_BIT_NIBBLE;
        self.sender.send_bootstrap_nibble(nibble, settle_ms).await?;

        // from here on every byte is two nibbles
        self.sender.send(CommandSet::FunctionSet).await?;
        self.sender.send(CommandSet::ClearDisplay).await?;
        self.sender
            .send(CommandSet::DisplayOnOff {
                display: State::On,
                cursor: CursorMode::Hidden,
            })
            .await?;

        self.state.set_display_state(State::On);
        self.state.set_cursor_mode(CursorMode::Hidden);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use embassy_futures::block_on;

    use super::*;
    use crate::sender::mock::{pair, writes, Event::*, Nack};

    #[test]
    fn test_invalid_geometry() {
        let (bus, delay, log) = pair();
        let result = Lcd::new(bus, delay, Config::new(20, 5));

        assert!(matches!(
            result,
            Err(Error::InvalidGeometry {
                columns: 20,
                rows: 5
            })
        ));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_begin_sequence() {
        let (bus, delay, log) = pair();
        let mut lcd = Lcd::new(bus, delay, Config::new(16, 2)).unwrap();

        block_on(lcd.begin()).unwrap();

        let bootstrap = vec![
            Write(0x30),
            Write(0x34),
            DelayMs(5),
            Write(0x30),
            Write(0x34),
            DelayMs(1),
            Write(0x30),
            Write(0x34),
            DelayMs(1),
            Write(0x20),
            Write(0x24),
            DelayMs(5),
        ];
        assert_eq!(log.borrow()[..12], bootstrap[..]);

        assert_eq!(
            writes(&log)[8..],
            [
                // function set 0x28
                0x28, 0x2C, 0x28, 0x88, 0x8C, 0x88, //
                // clear 0x01
                0x08, 0x0C, 0x08, 0x18, 0x1C, 0x18, //
                // display on, cursor hidden 0x0C
                0x08, 0x0C, 0x08, 0xC8, 0xCC, 0xC8,
            ]
        );

        // the last thing begin does is settle the last command
        assert_eq!(log.borrow().last(), Some(&DelayMs(5)));
    }

    #[test]
    fn test_cursor_hidden_after_init() {
        let (bus, delay, log) = pair();
        let config = Config::new(16, 2).set_backlight(State::Off);
        let mut lcd = block_on(Lcd::init(bus, delay, config)).unwrap();

        assert!(lcd.is_display_on());
        assert_eq!(lcd.get_cursor_mode(), CursorMode::Hidden);
        assert_eq!(lcd.get_backlight(), State::Off);
        log.borrow_mut().clear();

        block_on(lcd.blink()).unwrap();

        // 0x0F without backlight
        assert_eq!(writes(&log), [0x00, 0x04, 0x00, 0xF0, 0xF4, 0xF0]);
        assert_eq!(lcd.get_cursor_mode(), CursorMode::Blinking);
    }

    #[test]
    fn test_begin_resets_cursor_mode() {
        let (bus, delay, log) = pair();
        let mut lcd = Lcd::new(bus, delay, Config::new(16, 2)).unwrap();
        block_on(lcd.blink()).unwrap();
        log.borrow_mut().clear();

        block_on(lcd.begin()).unwrap();

        assert_eq!(lcd.get_cursor_mode(), CursorMode::Hidden);
        // last command of begin is display on with the cursor hidden
        let bytes = writes(&log);
        assert_eq!(bytes[bytes.len() - 6..], [0x08, 0x0C, 0x08, 0xC8, 0xCC, 0xC8]);
    }

    #[test]
    fn test_begin_aborts_on_bus_error() {
        let (mut bus, delay, log) = pair();
        bus.fail_at = Some(1);
        let mut lcd = Lcd::new(bus, delay, Config::new(16, 2)).unwrap();

        assert_eq!(block_on(lcd.begin()), Err(Error::Bus(Nack)));
        assert_eq!(*log.borrow(), vec![Write(0x30)]);
    }
}
