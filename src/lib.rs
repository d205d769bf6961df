#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod error;
pub mod config;
pub mod drivers;
pub mod console;
pub mod logging;
pub mod board;
pub mod app;

pub use paste;

pub use error::{MadiError, Result};
