pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod remote;
pub mod resolver;
pub mod ui;

pub use error::{NextTagError, Result};
