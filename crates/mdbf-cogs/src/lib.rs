//! # MDBF Cogs
//!
//! Pluggable bot modules ("cogs") and the machinery that keeps their
//! configuration current.
//!
//! Every cog owns one section of the configuration document. The
//! [`CogManager`] re-reads the document on demand, skips all work when the
//! document fingerprint is unchanged, and otherwise hands each cog its
//! section. A cog only rebuilds its data when its own section fingerprint
//! changed, and a cog that fails to apply its section never stops the
//! others from being updated.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cog;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod manager;
pub mod registry;

pub use cog::*;
pub use error::*;
pub use filter::FilterCog;
pub use lifecycle::*;
pub use manager::*;
pub use registry::*;
