//! # MDBF Config
//!
//! Configuration discovery, parsing and change detection for MDBF.
//!
//! This crate locates the single configuration file in the config
//! directory, parses it into a generic [`ConfigDocument`], and produces
//! key-order independent [`Fingerprint`]s used to decide what changed
//! between reloads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod document;
pub mod error;
pub mod fingerprint;
pub mod locator;
pub mod reader;
pub mod schema;
pub mod settings;

pub use cache::*;
pub use document::*;
pub use error::*;
pub use fingerprint::*;
pub use locator::*;
pub use reader::*;
pub use schema::*;
pub use settings::*;
