use std::collections::BTreeSet;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::common::Byte;

pub mod highlighter;
pub mod key_binding_parser;
pub mod pad_report;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web_key;

pub const TOTAL_BUTTONS: usize = 8;

/// Buttons of the NES pad, numbered by their bit in the controller word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Button {
  A = 0,
  B,
  Select,
  Start,
  Up,
  Down,
  Left,
  Right,
}

impl Button {
  pub const ALL: [Button; TOTAL_BUTTONS] = [
    Button::A,
    Button::B,
    Button::Select,
    Button::Start,
    Button::Up,
    Button::Down,
    Button::Left,
    Button::Right,
  ];

  pub fn mask(self) -> Byte {
    1 << u8::from(self)
  }

  /// Id of the page element that shows this button.
  pub fn element_id(self) -> &'static str {
    match self {
      Button::A => "divButtonA",
      Button::B => "divButtonB",
      Button::Select => "divSelect",
      Button::Start => "divStart",
      Button::Up => "divUpArrow",
      Button::Down => "divDownArrow",
      Button::Left => "divLeftArrow",
      Button::Right => "divRightArrow",
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Button::A => "a",
      Button::B => "b",
      Button::Select => "select",
      Button::Start => "start",
      Button::Up => "up",
      Button::Down => "down",
      Button::Left => "left",
      Button::Right => "right",
    }
  }

  pub fn from_name(name: &str) -> Option<Button> {
    let name = name.trim().to_ascii_lowercase();
    Button::ALL.iter().copied().find(|b| b.name() == name)
  }
}

/// Output side of the highlighter: a set of elements addressed by id.
pub trait ButtonPanel {
  fn set_highlight(&mut self, element_id: &str, highlighted: bool);
}

/// In-memory panel, used natively and in tests.
#[derive(Default, Debug)]
pub struct VirtualPanel {
  highlighted: BTreeSet<String>,
}

impl VirtualPanel {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_highlighted(&self, element_id: &str) -> bool {
    self.highlighted.contains(element_id)
  }

  pub fn highlighted(&self) -> impl Iterator<Item = &str> {
    self.highlighted.iter().map(String::as_str)
  }

  /// Highlighted buttons packed into a controller word.
  pub fn key_states(&self) -> Byte {
    Button::ALL
      .iter()
      .filter(|b| self.is_highlighted(b.element_id()))
      .fold(0, |acc, b| acc | b.mask())
  }
}

impl ButtonPanel for VirtualPanel {
  fn set_highlight(&mut self, element_id: &str, highlighted: bool) {
    if highlighted {
      if !self.highlighted.contains(element_id) {
        self.highlighted.insert(element_id.to_string());
      }
    } else {
      self.highlighted.remove(element_id);
    }
  }
}

#[cfg(test)]
mod test {
  use std::convert::TryFrom;

  use super::*;

  #[test]
  fn bits_follow_controller_word() {
    for (bit, button) in Button::ALL.iter().enumerate() {
      assert_eq!(Button::try_from(bit as u8).ok(), Some(*button));
      assert_eq!(button.mask(), 1 << bit);
    }
    assert!(Button::try_from(8u8).is_err());
  }

  #[test]
  fn names_are_case_insensitive() {
    assert_eq!(Button::from_name("Select"), Some(Button::Select));
    assert_eq!(Button::from_name(" RIGHT "), Some(Button::Right));
    assert_eq!(Button::from_name("turbo"), None);
  }

  #[test]
  fn virtual_panel_key_states() {
    let mut panel = VirtualPanel::new();
    panel.set_highlight("divButtonA", true);
    panel.set_highlight("divStart", true);
    panel.set_highlight("divStart", true);
    assert_eq!(panel.highlighted().count(), 2);
    assert_eq!(panel.key_states(), Button::A.mask() | Button::Start.mask());

    panel.set_highlight("divButtonA", false);
    assert!(!panel.is_highlighted("divButtonA"));
    assert_eq!(panel.key_states(), Button::Start.mask());
  }
}
