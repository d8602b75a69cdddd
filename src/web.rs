use wasm_bindgen::prelude::*;

use crate::controller::key_binding_parser::{default_key_binding, parse_key_binding_str};
use crate::controller::web_key;

#[wasm_bindgen]
pub fn wasm_main() -> Result<(), JsValue> {
  wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
  web_key::keyboard_listen(default_key_binding())
}

/// Same as `wasm_main`, with codes taken from an INI `[highlighter]` section.
#[wasm_bindgen]
pub fn wasm_main_with_key_binding(ini: String) -> Result<(), JsValue> {
  wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
  let binding = parse_key_binding_str(&ini).map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
  web_key::keyboard_listen(binding)
}

#[wasm_bindgen]
pub fn set_key_down(key_code: u32) {
  web_key::with_highlighter(|h| h.on_key_down(key_code));
}

#[wasm_bindgen]
pub fn set_key_up(key_code: u32) {
  web_key::with_highlighter(|h| h.on_key_up(key_code));
}
