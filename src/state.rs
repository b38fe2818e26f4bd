use crate::command::{CursorMode, State, LINE_ADDRESSES};

/// Max characters a single DDRAM line holds in 2 line mode
pub(crate) const MAX_COLUMNS: u8 = 40;

/// Everything the driver remembers about the panel besides the backlight,
/// which lives in the [`Sender`](crate::sender::Sender)
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct LcdState {
    columns: u8,
    rows: u8,
    display_on: State,
    cursor_mode: CursorMode,
}

impl LcdState {
    /// `None` when the geometry can't be addressed by [`LINE_ADDRESSES`]
    pub(crate) fn new(columns: u8, rows: u8) -> Option<Self> {
        let rows_ok = (1..=LINE_ADDRESSES.len()).contains(&(rows as usize));
        let columns_ok = (1..=MAX_COLUMNS).contains(&columns);

        (rows_ok && columns_ok).then_some(Self {
            columns,
            rows,
            display_on: State::On,
            cursor_mode: CursorMode::Hidden,
        })
    }

    pub(crate) fn get_columns(&self) -> u8 {
        self.columns
    }

    pub(crate) fn get_rows(&self) -> u8 {
        self.rows
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub(crate) fn set_cursor_mode(&mut self, cursor: CursorMode) {
        self.cursor_mode = cursor;
    }

    /// DDRAM address of a position, both axes wrap around the panel size
    pub(crate) fn ddram_addr(&self, col: u8, row: u8) -> u8 {
        let row = row % self.rows;
        let col = col % self.columns;

        LINE_ADDRESSES[row as usize] + col
    }
}
