//! HD44780 command table and the encoding of each command into a controller byte

use crate::utils::{BitOps, BitState};

/// The commands this driver issues to the controller
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandSet {
    /// Blank DDRAM and move the address counter to 0
    ClearDisplay,
    /// Display on/off together with the cursor style.
    /// When `display` is [`State::Off`] the cursor bits are always cleared.
    DisplayOnOff {
        #[allow(missing_docs)]
        display: State,
        #[allow(missing_docs)]
        cursor: CursorMode,
    },
    /// Shift the whole visible window by one column
    DisplayShift(MoveDirection),
    /// 4 bit bus, 2 line, 5x8 font
    FunctionSet,
    /// Move the address counter to a DDRAM address (lower 7 bits)
    SetDDRAM(u8),
    /// A data byte written at the current address
    WriteDataToRAM(u8),
}

/// On/off switch shared by the display and backlight
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[allow(missing_docs)]
    Off,
    #[allow(missing_docs)]
    #[default]
    On,
}

/// How the cursor is drawn while the display is on
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorMode {
    /// No cursor
    #[default]
    Hidden,
    /// Underline cursor
    Solid,
    /// Underline cursor plus blinking block
    Blinking,
}

/// Direction of a display shift
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    /// Content moves one column to the left
    RightToLeft,
    /// Content moves one column to the right
    LeftToRight,
}

/// RS line: whether the byte is a command or a data write
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelection {
    #[allow(missing_docs)]
    Command,
    #[allow(missing_docs)]
    Data,
}

/// Time (in milliseconds) each enable edge is held
pub const ENABLE_PULSE_MS: u32 = 1;
/// Time (in milliseconds) after each nibble of a data write
pub const DATA_SETTLE_MS: u32 = 1;
/// Time (in milliseconds) after each nibble of a command write,
/// clear display is the slowest command at roughly 1.5ms
pub const COMMAND_SETTLE_MS: u32 = 5;

/// DDRAM address of the first column of each line
///
/// A 20x4 panel wraps line 0 into line 2 and line 1 into line 3,
/// which is why lines 2 and 3 start 20 columns after lines 0 and 1.
pub const LINE_ADDRESSES: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

impl RegisterSelection {
    /// Settle time after each nibble of a write with this selection
    pub const fn settle_ms(self) -> u32 {
        match self {
            RegisterSelection::Command => COMMAND_SETTLE_MS,
            RegisterSelection::Data => DATA_SETTLE_MS,
        }
    }
}

/// A fully encoded controller byte, with its RS selection
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    rs: RegisterSelection,
    data: u8,
}

impl Command {
    /// Wrap a raw byte, for commands outside of [`CommandSet`]
    pub const fn new(rs: RegisterSelection, data: u8) -> Self {
        Self { rs, data }
    }

    #[allow(missing_docs)]
    pub const fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    #[allow(missing_docs)]
    pub const fn get_data(&self) -> u8 {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::new(RegisterSelection::Command, 0b0000_0001),

            CommandSet::DisplayOnOff { display, cursor } => {
                let raw_bits: u8 = 0b0000_1000;

                let raw_bits = match display {
                    State::Off => raw_bits,
                    State::On => {
                        let (underline, blink) = match cursor {
                            CursorMode::Hidden => (BitState::Clear, BitState::Clear),
                            CursorMode::Solid => (BitState::Set, BitState::Clear),
                            CursorMode::Blinking => (BitState::Set, BitState::Set),
                        };
                        raw_bits
                            .with_bit(2, BitState::Set)
                            .with_bit(1, underline)
                            .with_bit(0, blink)
                    }
                };

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::DisplayShift(dir) => {
                // bit 3 selects display shift instead of cursor move
                let raw_bits = 0b0001_1000u8;

                let raw_bits = match dir {
                    MoveDirection::RightToLeft => raw_bits.with_bit(2, BitState::Clear),
                    MoveDirection::LeftToRight => raw_bits.with_bit(2, BitState::Set),
                };

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::FunctionSet => Self::new(RegisterSelection::Command, 0b0010_1000),

            CommandSet::SetDDRAM(addr) => Self::new(
                RegisterSelection::Command,
                0b1000_0000 | (addr & 0b0111_1111),
            ),

            CommandSet::WriteDataToRAM(data) => Self::new(RegisterSelection::Data, data),
        }
    }
}
