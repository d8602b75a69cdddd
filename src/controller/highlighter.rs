use log::debug;

use super::key_binding_parser::{KeyBinding, KeyType};
use super::ButtonPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
  KeyDown(KeyType),
  KeyUp(KeyType),
}

/// Mirrors physical key state onto the bound panel elements.
pub struct Highlighter<P: ButtonPanel> {
  binding: KeyBinding,
  panel: P,
}

impl<P: ButtonPanel> Highlighter<P> {
  pub fn new(binding: KeyBinding, panel: P) -> Self {
    Self { binding, panel }
  }

  pub fn on_key_down(&mut self, code: KeyType) {
    debug!("keydown keycode: {}", code);
    self.apply(code, true);
  }

  pub fn on_key_up(&mut self, code: KeyType) {
    debug!("keyup keycode: {}", code);
    self.apply(code, false);
  }

  pub fn handle(&mut self, event: KeyEvent) {
    match event {
      KeyEvent::KeyDown(code) => self.on_key_down(code),
      KeyEvent::KeyUp(code) => self.on_key_up(code),
    }
  }

  // Unbound codes are not an error.
  fn apply(&mut self, code: KeyType, pressed: bool) {
    if let Some(button) = self.binding.lookup(code) {
      let id = button.element_id();
      debug!("{} {}", if pressed { "keydown" } else { "keyup" }, id);
      self.panel.set_highlight(id, pressed);
    }
  }

  pub fn binding(&self) -> &KeyBinding {
    &self.binding
  }

  pub fn panel(&self) -> &P {
    &self.panel
  }
}
