//! Recording bus and delayer sharing one timeline

use std::{cell::RefCell, rc::Rc};

use pcf8574_lcd::sender::ByteBus;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Event {
    Write(u8),
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct RecordingBus(pub Log);

impl ByteBus for RecordingBus {
    type Error = core::convert::Infallible;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::Write(value));
        Ok(())
    }
}

pub struct RecordingDelay(pub Log);

impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub fn recorder() -> (RecordingBus, RecordingDelay, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    (RecordingBus(log.clone()), RecordingDelay(log.clone()), log)
}
