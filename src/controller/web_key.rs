use std::cell::RefCell;

use log::{info, warn};
use wasm_bindgen::{prelude::*, JsCast};

use super::highlighter::Highlighter;
use super::key_binding_parser::{KeyBinding, KeyType};
use super::ButtonPanel;

pub const PRESSED_CLASS: &str = "buttonPressed";

thread_local! {
  static HIGHLIGHTER: RefCell<Option<Highlighter<DomPanel>>> = RefCell::new(None);
}

fn window() -> Result<web_sys::Window, JsValue> {
  web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

/// Page elements, toggled through their `buttonPressed` class.
pub struct DomPanel {
  document: web_sys::Document,
}

impl ButtonPanel for DomPanel {
  fn set_highlight(&mut self, element_id: &str, highlighted: bool) {
    let element = match self.document.get_element_by_id(element_id) {
      Some(element) => element,
      None => {
        warn!("element #{} not found", element_id);
        return;
      }
    };
    let classes = element.class_list();
    let res = if highlighted {
      classes.add_1(PRESSED_CLASS)
    } else {
      classes.remove_1(PRESSED_CLASS)
    };
    if let Err(e) = res {
      warn!("failed to update #{}: {:?}", element_id, e);
    }
  }
}

// `which` is 0 on browsers that only fill `keyCode`.
fn key_code(event: &web_sys::KeyboardEvent) -> KeyType {
  match event.which() {
    0 => event.key_code(),
    code => code,
  }
}

pub fn with_highlighter<F: FnOnce(&mut Highlighter<DomPanel>)>(f: F) {
  HIGHLIGHTER.with(|cell| {
    if let Some(highlighter) = cell.borrow_mut().as_mut() {
      f(highlighter);
    }
  });
}

pub fn keyboard_listen(binding: KeyBinding) -> Result<(), JsValue> {
  info!("keyboard_listen");
  let document = window()?
    .document()
    .ok_or_else(|| JsValue::from_str("no document on window"))?;
  let body = document
    .body()
    .ok_or_else(|| JsValue::from_str("document has no body"))?;
  HIGHLIGHTER.with(|cell| {
    cell.replace(Some(Highlighter::new(binding, DomPanel { document })));
  });
  {
    let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
      let code = key_code(&event);
      with_highlighter(|h| h.on_key_down(code));
    }) as Box<dyn FnMut(_)>);
    body.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
  }
  {
    let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
      let code = key_code(&event);
      with_highlighter(|h| h.on_key_up(code));
    }) as Box<dyn FnMut(_)>);
    body.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
    closure.forget();
  }
  Ok(())
}
