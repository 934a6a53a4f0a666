use fixture_core::PinDriver;
use fixture_core::common::{Level, Pin, PinMode};
use mockall::mock;

mock! {
    pub Pins {}
    impl PinDriver for Pins {
        fn set_mode(&mut self, pin: Pin, mode: PinMode);
        fn write(&mut self, pin: Pin, level: Level);
        fn read(&mut self, pin: Pin) -> Level;
        fn delay_ms(&mut self, ms: u32);
    }
}
