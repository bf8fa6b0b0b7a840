/// # Timers
/// Two 8-bit countdown timers.
///
/// The host decrements both at 60Hz regardless of how many instructions run in
/// between; the machine itself never keeps time. Both stop at zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers::default()
    }

    /// One 60Hz tick.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// A tone should be playing while the sound timer is running.
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }
}
