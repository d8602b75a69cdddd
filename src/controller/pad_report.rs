//! USB HID boot keyboard reports for an NES pad acting as a keyboard.
//!
//! Controller word layout, LSB first: A, B, Select, Start, Up, Down, Left, Right.

use super::highlighter::KeyEvent;
use super::key_binding_parser::KeyBinding;
use super::Button;
use crate::common::{bit_eq, Byte};

pub const REPORT_SIZE: usize = 8;
const FIRST_KEY_SLOT: usize = 2;
// The adapter stops once this slot is filled, so at most five keys go out.
const LAST_KEY_SLOT: usize = 6;

pub const MOD_RIGHT_SHIFT: Byte = 0x20;

// HID keyboard usage ids
pub const KEY_ENTER: Byte = 0x28;
pub const KEY_X: Byte = 0x1b;
pub const KEY_Z: Byte = 0x1d;
pub const KEY_RIGHT: Byte = 0x4f;
pub const KEY_LEFT: Byte = 0x50;
pub const KEY_DOWN: Byte = 0x51;
pub const KEY_UP: Byte = 0x52;
pub const KEY_RIGHTSHIFT: Byte = 0xe5;

pub fn hid_usage(button: Button) -> Byte {
  match button {
    Button::A => KEY_X,
    Button::B => KEY_Z,
    Button::Select => KEY_RIGHTSHIFT,
    Button::Start => KEY_ENTER,
    Button::Up => KEY_UP,
    Button::Down => KEY_DOWN,
    Button::Left => KEY_LEFT,
    Button::Right => KEY_RIGHT,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PadReport([Byte; REPORT_SIZE]);

impl PadReport {
  pub fn from_reading(reading: Byte) -> Self {
    let mut buf = [0; REPORT_SIZE];
    let mut index = FIRST_KEY_SLOT;
    for button in Button::ALL.iter() {
      if !bit_eq(reading, button.mask()) {
        continue;
      }
      let key = hid_usage(*button);
      if key == KEY_RIGHTSHIFT {
        buf[0] |= MOD_RIGHT_SHIFT;
      } else {
        buf[index] = key;
        index += 1;
        if index > LAST_KEY_SLOT {
          break;
        }
      }
    }
    PadReport(buf)
  }

  pub fn modifiers(&self) -> Byte {
    self.0[0]
  }

  /// Non-zero usage ids in slot order.
  pub fn keys(&self) -> impl Iterator<Item = Byte> + '_ {
    self.0[FIRST_KEY_SLOT..].iter().copied().filter(|k| *k != 0)
  }

  pub fn as_bytes(&self) -> &[Byte; REPORT_SIZE] {
    &self.0
  }
}

/// Emits a report only when the pad reading changes.
#[derive(Debug, Default)]
pub struct PadReporter {
  last_reading: Byte,
}

impl PadReporter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn last_reading(&self) -> Byte {
    self.last_reading
  }

  pub fn poll(&mut self, reading: Byte) -> Option<PadReport> {
    if reading == self.last_reading {
      return None;
    }
    self.last_reading = reading;
    Some(PadReport::from_reading(reading))
  }
}

/// Key events a host sees when the pad goes from `previous` to `current`.
/// Releases come before presses.
pub fn pad_transitions(previous: Byte, current: Byte, binding: &KeyBinding) -> Vec<KeyEvent> {
  let released = previous & !current;
  let pressed = current & !previous;
  let ups = Button::ALL
    .iter()
    .filter(|b| bit_eq(released, b.mask()))
    .map(|b| KeyEvent::KeyUp(binding.key_code(*b)));
  let downs = Button::ALL
    .iter()
    .filter(|b| bit_eq(pressed, b.mask()))
    .map(|b| KeyEvent::KeyDown(binding.key_code(*b)));
  ups.chain(downs).collect()
}
