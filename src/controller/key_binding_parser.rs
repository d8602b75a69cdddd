use std::collections::HashMap;

use anyhow::{anyhow, bail, Context};
use log::warn;

use super::{Button, TOTAL_BUTTONS};
use crate::PadResult;

/// Key code as reported by the browser (`KeyboardEvent.which` / `keyCode`).
pub type KeyType = u32;

const SECTION: &str = "highlighter";

/// Default codes, indexed by controller bit.
const DEFAULT_KEY_CODES: [KeyType; TOTAL_BUTTONS] = [
  88, // X -> A
  90, // Z -> B
  16, // Shift -> Select
  13, // Enter -> Start
  38, 40, 37, 39,
];

lazy_static! {
  pub static ref DEFAULT_KEY_BINDING: KeyBinding = KeyBinding {
    keys: Button::ALL
      .iter()
      .zip(DEFAULT_KEY_CODES.iter())
      .map(|(button, code)| (*code, *button))
      .collect(),
    codes: DEFAULT_KEY_CODES,
  };
}

/// Immutable key code -> button table. Codes are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
  keys: HashMap<KeyType, Button>,
  codes: [KeyType; TOTAL_BUTTONS],
}

impl KeyBinding {
  pub fn from_codes(codes: [KeyType; TOTAL_BUTTONS]) -> PadResult<Self> {
    let mut keys = HashMap::with_capacity(TOTAL_BUTTONS);
    for (button, code) in Button::ALL.iter().zip(codes.iter()) {
      if let Some(other) = keys.insert(*code, *button) {
        bail!(
          "key code {} bound to both {} and {}",
          code,
          other.name(),
          button.name()
        );
      }
    }
    Ok(Self { keys, codes })
  }

  pub fn lookup(&self, code: KeyType) -> Option<Button> {
    self.keys.get(&code).copied()
  }

  pub fn key_code(&self, button: Button) -> KeyType {
    self.codes[u8::from(button) as usize]
  }

  pub fn len(&self) -> usize {
    self.keys.len()
  }

  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  /// Bindings in controller bit order.
  pub fn iter(&self) -> impl Iterator<Item = (Button, KeyType)> + '_ {
    Button::ALL.iter().map(move |b| (*b, self.key_code(*b)))
  }
}

impl Default for KeyBinding {
  fn default() -> Self {
    DEFAULT_KEY_BINDING.clone()
  }
}

fn parse_section(keys: &HashMap<String, Option<String>>) -> PadResult<KeyBinding> {
  let mut codes = DEFAULT_KEY_CODES;
  for (k, v) in keys {
    let v = match v {
      Some(v) => v,
      None => continue,
    };
    let button = match Button::from_name(k) {
      Some(button) => button,
      None => {
        warn!("ignoring binding for unknown button `{}`", k);
        continue;
      }
    };
    let code = v
      .trim()
      .parse::<KeyType>()
      .with_context(|| format!("invalid key code `{}` for button {}", v, button.name()))?;
    codes[u8::from(button) as usize] = code;
  }
  KeyBinding::from_codes(codes)
}

fn parse_map(map: HashMap<String, HashMap<String, Option<String>>>) -> PadResult<KeyBinding> {
  let section = map
    .get(SECTION)
    .ok_or_else(|| anyhow!("missing [{}] section", SECTION))?;
  parse_section(section)
}

pub fn parse_key_binding(file: &str) -> PadResult<KeyBinding> {
  ini!(safe file)
    .map_err(|e| anyhow!(e))
    .and_then(parse_map)
    .with_context(|| format!("failed to load key binding from {}", file))
}

pub fn parse_key_binding_str(content: &str) -> PadResult<KeyBinding> {
  let map = inistr!(safe content).map_err(|e| anyhow!(e))?;
  parse_map(map)
}

pub fn default_key_binding() -> KeyBinding {
  DEFAULT_KEY_BINDING.clone()
}
