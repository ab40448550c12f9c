//! # MDBF Commands
//!
//! Discord command and event handlers using Poise framework for MDBF.
//!
//! This crate adapts the cog machinery to the chat platform: the `/reload`
//! slash command that re-runs a configuration pass for admins, and the
//! message listener that feeds the filter cog.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod events;
pub mod framework;
pub mod reload;

pub use framework::*;
pub use reload::*;
