//! The [`Lcd`] driver and its command surface
//!
//! Every method that touches the panel is `async`: it returns once the last bus write
//! of the operation has been issued and its settle time has elapsed. Since each method
//! takes `&mut self`, one [`Lcd`] never has two write sequences in flight.

use embedded_hal_async::delay::DelayNs;

use crate::{
    command::{Command, CommandSet, CursorMode, MoveDirection, RegisterSelection, State},
    error::Error,
    sender::{ByteBus, Sender},
    state::LcdState,
};

mod init;

pub use init::Config;

/// Byte written for characters the controller ROM can't show: a full block
pub const UNSUPPORTED_CHAR: u8 = 0xFF;

/// HD44780 driver behind a PCF8574 expander, see [`Config`] and [`Lcd::new`] to build one
pub struct Lcd<B: ByteBus, D: DelayNs> {
    sender: Sender<B, D>,
    state: LcdState,
}

impl<B: ByteBus, D: DelayNs> Lcd<B, D> {
    /// Transfer one raw byte to the controller, as a command or as data
    pub async fn write_byte(
        &mut self,
        data: u8,
        rs: RegisterSelection,
    ) -> Result<(), Error<B::Error>> {
        self.sender.send(Command::new(rs, data)).await?;
        Ok(())
    }

    /// Clear the display, the controller also moves its cursor to (0, 0)
    pub async fn clear(&mut self) -> Result<(), Error<B::Error>> {
        self.sender.send(CommandSet::ClearDisplay).await?;
        Ok(())
    }

    /// Same as `set_cursor(0, 0)`
    pub async fn home(&mut self) -> Result<(), Error<B::Error>> {
        self.set_cursor(0, 0).await
    }

    /// Move the cursor, `col` and `row` wrap around the panel size
    pub async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Error<B::Error>> {
        let addr = self.state.ddram_addr(col, row);

        #[cfg(feature = "defmt")]
        defmt::trace!("set cursor ({}, {}) -> DDRAM {=u8:#x}", col, row, addr);

        self.sender.send(CommandSet::SetDDRAM(addr)).await?;
        Ok(())
    }

    /// Write `text` from the current cursor position, one character at a time
    ///
    /// There is no line wrapping: characters past the end of a line go on into
    /// DDRAM that may not be visible. Characters above U+00FF are written as
    /// [`UNSUPPORTED_CHAR`].
    pub async fn print(&mut self, text: &str) -> Result<(), Error<B::Error>> {
        for char in text.chars() {
            let byte = u8::try_from(char).unwrap_or(UNSUPPORTED_CHAR);
            self.write_u8_to_cur(byte).await?;
        }
        Ok(())
    }

    /// Write raw bytes from the current cursor position, for ROM glyphs without a `char`
    pub async fn print_bytes(&mut self, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        for &byte in bytes {
            self.write_u8_to_cur(byte).await?;
        }
        Ok(())
    }

    async fn write_u8_to_cur(&mut self, byte: u8) -> Result<(), Error<B::Error>> {
        self.sender.send(CommandSet::WriteDataToRAM(byte)).await?;
        Ok(())
    }

    /// Turn the display back on, with the cursor style chosen while it was off
    pub async fn display(&mut self) -> Result<(), Error<B::Error>> {
        self.state.set_display_state(State::On);
        self.send_display_control().await
    }

    /// Blank the display, DDRAM content is kept
    pub async fn no_display(&mut self) -> Result<(), Error<B::Error>> {
        self.state.set_display_state(State::Off);
        self.send_display_control().await
    }

    /// Show an underline cursor
    pub async fn cursor(&mut self) -> Result<(), Error<B::Error>> {
        self.set_cursor_mode(CursorMode::Solid).await
    }

    /// Hide the cursor
    pub async fn no_cursor(&mut self) -> Result<(), Error<B::Error>> {
        self.set_cursor_mode(CursorMode::Hidden).await
    }

    /// Show a blinking cursor
    pub async fn blink(&mut self) -> Result<(), Error<B::Error>> {
        self.set_cursor_mode(CursorMode::Blinking).await
    }

    /// Note:
    /// While the display is off nothing is sent, the mode is applied by the next [`Lcd::display`]
    pub async fn set_cursor_mode(&mut self, cursor: CursorMode) -> Result<(), Error<B::Error>> {
        self.state.set_cursor_mode(cursor);

        match self.state.get_display_state() {
            State::On => self.send_display_control().await,
            State::Off => Ok(()),
        }
    }

    async fn send_display_control(&mut self) -> Result<(), Error<B::Error>> {
        self.sender
            .send(CommandSet::DisplayOnOff {
                display: self.state.get_display_state(),
                cursor: self.state.get_cursor_mode(),
            })
            .await?;
        Ok(())
    }

    /// Turn the backlight on, a single expander write
    pub fn backlight(&mut self) -> Result<(), Error<B::Error>> {
        self.set_backlight(State::On)
    }

    /// Turn the backlight off, a single expander write
    pub fn no_backlight(&mut self) -> Result<(), Error<B::Error>> {
        self.set_backlight(State::Off)
    }

    /// The new backlight bit is also carried by every later write
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), Error<B::Error>> {
        self.sender.set_backlight(backlight)?;
        Ok(())
    }

    /// Move the whole visible window content one column left
    pub async fn shift_left(&mut self) -> Result<(), Error<B::Error>> {
        self.shift_display(MoveDirection::RightToLeft).await
    }

    /// Move the whole visible window content one column right
    pub async fn shift_right(&mut self) -> Result<(), Error<B::Error>> {
        self.shift_display(MoveDirection::LeftToRight).await
    }

    #[allow(missing_docs)]
    pub async fn shift_display(&mut self, dir: MoveDirection) -> Result<(), Error<B::Error>> {
        self.sender.send(CommandSet::DisplayShift(dir)).await?;
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn get_backlight(&self) -> State {
        self.sender.get_backlight()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_mode(&self) -> CursorMode {
        self.state.get_cursor_mode()
    }

    #[allow(missing_docs)]
    pub fn is_display_on(&self) -> bool {
        self.state.get_display_state() == State::On
    }

    #[allow(missing_docs)]
    pub fn columns(&self) -> u8 {
        self.state.get_columns()
    }

    #[allow(missing_docs)]
    pub fn rows(&self) -> u8 {
        self.state.get_rows()
    }

    /// Give back the bus and the delayer
    pub fn release(self) -> (B, D) {
        self.sender.release()
    }
}
