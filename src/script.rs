//! Line-based event scripts for driving a highlighter without a browser.
//!
//! ```text
//! # comment
//! down 37
//! up 37
//! pad 0x41
//! ```

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context};
use log::debug;
use serde::Serialize;

use crate::common::Byte;
use crate::controller::highlighter::{Highlighter, KeyEvent};
use crate::controller::key_binding_parser::KeyBinding;
use crate::controller::pad_report::{pad_transitions, PadReporter};
use crate::controller::VirtualPanel;
use crate::PadResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEvent {
  Key(KeyEvent),
  Pad(Byte),
}

fn parse_number(s: &str) -> PadResult<u32> {
  let res = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
    Some(hex) => u32::from_str_radix(hex, 16),
    None => s.parse::<u32>(),
  };
  res.with_context(|| format!("invalid number `{}`", s))
}

/// `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> PadResult<Option<ScriptEvent>> {
  let line = line.trim();
  if line.is_empty() || line.starts_with('#') {
    return Ok(None);
  }
  let mut parts = line.split_whitespace();
  let cmd = parts.next().unwrap_or_default();
  let arg = parts
    .next()
    .ok_or_else(|| anyhow!("`{}` needs an argument", cmd))?;
  if let Some(extra) = parts.next() {
    bail!("unexpected `{}` after `{} {}`", extra, cmd, arg);
  }
  let value = parse_number(arg)?;
  let event = match cmd.to_ascii_lowercase().as_str() {
    "down" => ScriptEvent::Key(KeyEvent::KeyDown(value)),
    "up" => ScriptEvent::Key(KeyEvent::KeyUp(value)),
    "pad" => {
      if value > Byte::MAX as u32 {
        bail!("pad reading {:#x} does not fit in a byte", value);
      }
      ScriptEvent::Pad(value as Byte)
    }
    other => bail!("unknown command `{}`", other),
  };
  Ok(Some(event))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Snapshot {
  pub line: usize,
  pub highlighted: Vec<String>,
  pub key_states: Byte,
}

pub struct Replay {
  highlighter: Highlighter<VirtualPanel>,
  reporter: PadReporter,
}

impl Replay {
  pub fn new(binding: KeyBinding) -> Self {
    Self {
      highlighter: Highlighter::new(binding, VirtualPanel::new()),
      reporter: PadReporter::new(),
    }
  }

  pub fn apply(&mut self, event: ScriptEvent) {
    match event {
      ScriptEvent::Key(key) => self.highlighter.handle(key),
      ScriptEvent::Pad(reading) => {
        let previous = self.reporter.last_reading();
        if let Some(report) = self.reporter.poll(reading) {
          debug!("pad report {:02x?}", report.as_bytes());
          for key in pad_transitions(previous, reading, self.highlighter.binding()) {
            self.highlighter.handle(key);
          }
        }
      }
    }
  }

  pub fn snapshot(&self, line: usize) -> Snapshot {
    let panel = self.highlighter.panel();
    Snapshot {
      line,
      highlighted: panel.highlighted().map(String::from).collect(),
      key_states: panel.key_states(),
    }
  }

  pub fn panel(&self) -> &VirtualPanel {
    self.highlighter.panel()
  }

  /// Replays every line of `reader`, writing one snapshot per event to `out`.
  /// Stops at the first malformed line.
  pub fn run<R: BufRead, W: Write>(&mut self, reader: R, out: &mut W, json: bool) -> PadResult<()> {
    for (i, line) in reader.lines().enumerate() {
      let line_no = i + 1;
      let line = line.with_context(|| format!("read failed at line {}", line_no))?;
      let event = match parse_line(&line).with_context(|| format!("line {}", line_no))? {
        Some(event) => event,
        None => continue,
      };
      self.apply(event);
      let snapshot = self.snapshot(line_no);
      if json {
        serde_json::to_writer(&mut *out, &snapshot)?;
        writeln!(out)?;
      } else {
        writeln!(out, "{}: {}", line_no, snapshot.highlighted.join(" "))?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::controller::key_binding_parser::default_key_binding;
  use crate::controller::Button;

  #[test]
  fn parses_commands() {
    assert_eq!(parse_line("  # note").unwrap(), None);
    assert_eq!(parse_line("").unwrap(), None);
    assert_eq!(
      parse_line("down 37").unwrap(),
      Some(ScriptEvent::Key(KeyEvent::KeyDown(37)))
    );
    assert_eq!(
      parse_line("UP 13").unwrap(),
      Some(ScriptEvent::Key(KeyEvent::KeyUp(13)))
    );
    assert_eq!(parse_line("pad 0x41").unwrap(), Some(ScriptEvent::Pad(0x41)));
  }

  #[test]
  fn rejects_malformed_lines() {
    assert!(parse_line("down").is_err());
    assert!(parse_line("down x").is_err());
    assert!(parse_line("press 37").is_err());
    assert!(parse_line("pad 256").is_err());
    assert!(parse_line("up 1 2").is_err());
  }

  #[test]
  fn replay_keys_and_pad() {
    let mut replay = Replay::new(default_key_binding());
    replay.apply(ScriptEvent::Key(KeyEvent::KeyDown(37)));
    replay.apply(ScriptEvent::Key(KeyEvent::KeyDown(999)));
    assert_eq!(replay.panel().key_states(), Button::Left.mask());

    replay.apply(ScriptEvent::Key(KeyEvent::KeyUp(37)));
    replay.apply(ScriptEvent::Pad(Button::A.mask() | Button::Start.mask()));
    let snap = replay.snapshot(4);
    assert_eq!(snap.highlighted, vec!["divButtonA", "divStart"]);
    assert_eq!(snap.key_states, Button::A.mask() | Button::Start.mask());

    replay.apply(ScriptEvent::Pad(Button::Start.mask()));
    assert_eq!(replay.panel().key_states(), Button::Start.mask());
  }

  #[test]
  fn run_prints_one_line_per_event() {
    let script = "# pad test\ndown 37\n\ndown 38\nup 37\n";
    let mut out = Vec::new();
    Replay::new(default_key_binding())
      .run(script.as_bytes(), &mut out, false)
      .unwrap();
    assert_eq!(
      String::from_utf8(out).unwrap(),
      "2: divLeftArrow\n4: divLeftArrow divUpArrow\n5: divUpArrow\n"
    );
  }

  #[test]
  fn run_stops_at_malformed_line() {
    let script = "down 88\npad 0x08\nbogus 1\ndown 90\n";
    let mut out = Vec::new();
    let mut replay = Replay::new(default_key_binding());
    let err = replay.run(script.as_bytes(), &mut out, true).unwrap_err();
    assert!(format!("{:#}", err).starts_with("line 3: unknown command `bogus`"));

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
      lines,
      vec![
        r#"{"line":1,"highlighted":["divButtonA"],"key_states":1}"#,
        r#"{"line":2,"highlighted":["divButtonA","divStart"],"key_states":9}"#,
      ]
    );
    assert!(!replay.panel().is_highlighted("divButtonB"));
  }

  #[test]
  fn snapshot_serializes() {
    let replay = Replay::new(default_key_binding());
    let json = serde_json::to_string(&replay.snapshot(1)).unwrap();
    assert_eq!(json, r#"{"line":1,"highlighted":[],"key_states":0}"#);
  }
}
