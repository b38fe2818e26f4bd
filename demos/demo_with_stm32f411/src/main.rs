//! Drive a 16x2 LCD through a PCF8574T I2C backpack with a STM32F411RET6
//!
//! Wiring diagram
//!
//! PCF8574T backpack <-> STM32F411RET6
//!               GND <-> GND
//!               VCC <-> 5V
//!               SDA <-> PB7 (with a 4.7 kOhm pullup to 3.3V, if the backpack has none)
//!               SCL <-> PB6 (with a 4.7 kOhm pullup to 3.3V, if the backpack has none)

#![no_std]
#![no_main]

use embassy_futures::block_on;
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{
    i2c::{self, I2c},
    pac,
    prelude::*,
};

use pcf8574_lcd::{
    lcd::{Config, Lcd},
    sender::{i2c_sender::DEFAULT_ADDRESS, I2cSender},
    utils::BlockingDelay,
};

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    // SysTick only offers a blocking delay, the adapter lets the driver await it
    let delayer = BlockingDelay(cp.SYST.delay(&clocks));

    let gpiob = dp.GPIOB.split();

    let i2c = I2c::new(
        dp.I2C1,
        (gpiob.pb6, gpiob.pb7),
        i2c::Mode::standard(100.kHz()), // The PCF8574T max I2C speed
        &clocks,
    );

    let sender = I2cSender::new(i2c, DEFAULT_ADDRESS);

    let config = Config::new(16, 2);

    block_on(async move {
        let mut lcd = Lcd::init(sender, delayer, config)
            .await
            .expect("LCD init failed");
        rprintln!("LCD {}x{} ready", lcd.columns(), lcd.rows());

        lcd.print("hello,").await.expect("print failed");
        lcd.set_cursor(0, 1).await.expect("set cursor failed");
        lcd.print("world!").await.expect("print failed");

        lcd.blink().await.expect("cursor failed");
        lcd.no_display().await.expect("display off failed");
        lcd.display().await.expect("display on failed");

        // scroll the whole window out and back
        for _ in 0..4 {
            lcd.shift_left().await.expect("shift failed");
        }
        for _ in 0..4 {
            lcd.shift_right().await.expect("shift failed");
        }

        lcd.no_backlight().expect("backlight failed");
        lcd.backlight().expect("backlight failed");

        lcd.no_cursor().await.expect("cursor failed");
        rprintln!("demo done");
    });

    #[allow(clippy::empty_loop)]
    loop {}
}
