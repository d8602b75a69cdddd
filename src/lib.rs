mod common;
pub mod controller;
pub mod logger;
pub mod script;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web;

#[macro_use]
extern crate ini;
#[macro_use]
extern crate lazy_static;
extern crate serde;

pub type PadError = anyhow::Error;
pub type PadResult<T> = anyhow::Result<T, PadError>;
