//! FIFO of [`Lcd`] requests, for when several tasks want to draw on one panel
//!
//! Producers [`submit`](CommandQueue::submit) requests from anywhere, a single consumer
//! owns the [`Lcd`] and runs them one complete write sequence at a time.

use core::convert::Infallible;

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Channel, TrySendError},
};
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::{error::Error, lcd::Lcd, sender::ByteBus};

/// Longest text a single [`LcdRequest::Print`] carries, a full 20x4 panel
pub const TEXT_CAPACITY: usize = 80;

/// One operation of the [`Lcd`] command surface
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum LcdRequest {
    Clear,
    Home,
    SetCursor { col: u8, row: u8 },
    Print(String<TEXT_CAPACITY>),
    Display,
    NoDisplay,
    Cursor,
    NoCursor,
    Blink,
    Backlight,
    NoBacklight,
    ShiftLeft,
    ShiftRight,
}

impl LcdRequest {
    /// `None` if `text` is longer than [`TEXT_CAPACITY`] bytes
    pub fn print(text: &str) -> Option<Self> {
        String::try_from(text).ok().map(LcdRequest::Print)
    }
}

impl<B: ByteBus, D: DelayNs> Lcd<B, D> {
    /// Run one queued request to completion
    pub async fn execute(&mut self, request: &LcdRequest) -> Result<(), Error<B::Error>> {
        match request {
            LcdRequest::Clear => self.clear().await,
            LcdRequest::Home => self.home().await,
            LcdRequest::SetCursor { col, row } => self.set_cursor(*col, *row).await,
            LcdRequest::Print(text) => self.print(text).await,
            LcdRequest::Display => self.display().await,
            LcdRequest::NoDisplay => self.no_display().await,
            LcdRequest::Cursor => self.cursor().await,
            LcdRequest::NoCursor => self.no_cursor().await,
            LcdRequest::Blink => self.blink().await,
            LcdRequest::Backlight => self.backlight(),
            LcdRequest::NoBacklight => self.no_backlight(),
            LcdRequest::ShiftLeft => self.shift_left().await,
            LcdRequest::ShiftRight => self.shift_right().await,
        }
    }
}

/// Bounded queue of [`LcdRequest`], `N` requests deep
///
/// Use `CriticalSectionRawMutex` to share it between interrupt priorities
/// or cores, `NoopRawMutex` when everything runs on one executor.
pub struct CommandQueue<M: RawMutex, const N: usize> {
    channel: Channel<M, LcdRequest, N>,
}

impl<M: RawMutex, const N: usize> CommandQueue<M, N> {
    /// Can be used in a `static`
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue `request` without waiting, a full queue hands the request back
    pub fn try_submit(&self, request: LcdRequest) -> Result<(), LcdRequest> {
        self.channel
            .try_send(request)
            .map_err(|TrySendError::Full(request)| request)
    }

    /// Queue `request`, waiting for a free slot if needed
    pub async fn submit(&self, request: LcdRequest) {
        self.channel.send(request).await
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Run every request that is queued right now, oldest first
    ///
    /// Returns how many ran. Stops at the first bus error; the failed request is dropped
    /// and the ones after it stay queued.
    pub async fn drain<B: ByteBus, D: DelayNs>(
        &self,
        lcd: &mut Lcd<B, D>,
    ) -> Result<usize, Error<B::Error>> {
        let mut done = 0;

        while let Ok(request) = self.channel.try_receive() {
            #[cfg(feature = "defmt")]
            defmt::trace!("lcd request {}", request);

            lcd.execute(&request).await?;
            done += 1;
        }

        Ok(done)
    }

    /// Wait for requests and run them, forever
    ///
    /// Only returns when the bus fails.
    pub async fn run<B: ByteBus, D: DelayNs>(
        &self,
        lcd: &mut Lcd<B, D>,
    ) -> Result<Infallible, Error<B::Error>> {
        loop {
            let request = self.channel.receive().await;

            #[cfg(feature = "defmt")]
            defmt::trace!("lcd request {}", request);

            lcd.execute(&request).await?;
        }
    }
}

impl<M: RawMutex, const N: usize> Default for CommandQueue<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
