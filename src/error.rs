//! Driver errors

use core::fmt;

/// Errors returned by [`Lcd`](crate::lcd::Lcd) operations
///
/// `E` is the error type of the [`ByteBus`](crate::sender::ByteBus) in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus rejected a byte; the rest of the sequence was not sent
    Bus(E),
    /// Panel geometry outside of what the line address table can drive
    InvalidGeometry {
        #[allow(missing_docs)]
        columns: u8,
        #[allow(missing_docs)]
        rows: u8,
    },
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Bus(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(err) => write!(f, "bus write failed: {:?}", err),
            Error::InvalidGeometry { columns, rows } => write!(
                f,
                "unsupported geometry {}x{}, expected 1-40 columns and 1-4 rows",
                columns, rows
            ),
        }
    }
}
