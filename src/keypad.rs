use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// The machine never stores key state; it asks the host on demand.
pub trait Keypad {
    /// Whether `key` (0x0..=0xF) is currently held. Anything above 0xF is up.
    fn is_key_down(&self, key: u8) -> bool;
}

/// A snapshot of which keys are held, updated by the host as events arrive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: [bool; KEY_COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        KeyState::default()
    }

    /// Set the pressed status of `key`. Unknown keys are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(usize::from(key)) {
            *pressed = true;
        }
    }

    /// Unset the pressed status of `key`.
    pub fn release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(usize::from(key)) {
            *pressed = false;
        }
    }

    pub fn clear(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}

impl Keypad for KeyState {
    fn is_key_down(&self, key: u8) -> bool {
        self.pressed
            .get(usize::from(key))
            .copied()
            .unwrap_or(false)
    }
}

/// A keypad nobody is touching.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoKeys;

impl Keypad for NoKeys {
    fn is_key_down(&self, _key: u8) -> bool {
        false
    }
}
