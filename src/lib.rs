/*!
# PCF8574 LCD Driver

Async driver for HD44780 character LCDs behind a PCF8574 I2C backpack, in 4 bit mode.

Basic Usage:

1. Initialize a "sender" <br/>
    Wrap the I2C bus and the backpack address in a [`sender::I2cSender`],
    or use anything implementing [`sender::ByteBus`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] with a [`lcd::Config`] and an async delayer
   (`embassy_time::Delay`, or [`utils::BlockingDelay`] around a blocking one)
   to create a [`lcd::Lcd`], then `.await` [`lcd::Lcd::begin()`]
<br/>
<br/>
3. use any methods provided by [`lcd::Lcd`] to control the LCD, or hand requests
   to a [`queue::CommandQueue`] when several tasks share the panel

Every write is timed with fixed settle delays instead of reading the busy flag,
since the backpack's RW line is never driven.
*/

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod lcd;
pub mod queue;
pub mod sender;
mod state;
pub mod utils;

pub use error::Error;
