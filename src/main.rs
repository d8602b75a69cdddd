use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::Context;
use clap::Parser;
use log::{debug, info, LevelFilter};

use nes_keyboard::controller::key_binding_parser::{default_key_binding, parse_key_binding};
use nes_keyboard::script::Replay;
use nes_keyboard::{logger, PadResult};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
  /// INI file with a [highlighter] section; built-in codes when omitted.
  #[clap(short, long)]
  key_binding_path: Option<String>,

  /// Event script to replay; reads stdin when omitted.
  #[clap(short, long)]
  script: Option<String>,

  /// Print JSON snapshots instead of element ids.
  #[clap(long)]
  json: bool,

  #[clap(short, long)]
  verbose: bool,
}

fn run(args: &Args) -> PadResult<()> {
  let binding = match &args.key_binding_path {
    Some(path) => parse_key_binding(path)?,
    None => default_key_binding(),
  };
  info!("{} key bindings loaded", binding.len());
  for (button, code) in binding.iter() {
    debug!("{} -> {}", code, button.element_id());
  }

  let reader: Box<dyn BufRead> = match &args.script {
    Some(path) => Box::new(BufReader::new(
      File::open(path).with_context(|| format!("cannot open script {}", path))?,
    )),
    None => Box::new(BufReader::new(io::stdin())),
  };

  let stdout = io::stdout();
  let mut out = stdout.lock();
  Replay::new(binding).run(reader, &mut out, args.json)
}

fn main() {
  let args = Args::parse();
  let level = if args.verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  if let Err(e) = logger::init_with_level(level) {
    eprintln!("failed to init logger: {}", e);
    std::process::exit(1);
  }
  if let Err(e) = run(&args) {
    log::error!("{:#}", e);
    std::process::exit(1);
  }
}
