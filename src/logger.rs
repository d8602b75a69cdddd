use log::{LevelFilter, Metadata, SetLoggerError};

struct SimpleLogger;

impl log::Log for SimpleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }
  fn log(&self, rec: &log::Record) {
    if !self.enabled(rec.metadata()) {
      return;
    }
    let log_str = format!(
      "[{}] {}:{} {}",
      rec.level(),
      rec.file().unwrap_or("unknown file"),
      rec.line().unwrap_or(0),
      rec.args()
    );
    eprintln!("{}", log_str)
  }
  fn flush(&self) {}
}

pub fn init_with_level(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_boxed_logger(Box::new(SimpleLogger))?;
  log::set_max_level(level);
  Ok(())
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn second_init_reports_error() {
    let _ = init_with_level(LevelFilter::Info);
    assert!(init_with_level(LevelFilter::Debug).is_err());
  }
}
