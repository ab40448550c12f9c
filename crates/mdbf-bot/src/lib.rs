//! # MDBF Bot
//!
//! Discord bot binary built on the MDBF cog framework.
//!
//! This crate wires the configuration, cogs and commands together and owns
//! the application lifecycle: locating the config file, starting the cogs,
//! connecting to Discord and optionally polling the config file for changes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod polling;

pub use bot::*;
pub use error::*;
pub use polling::*;
