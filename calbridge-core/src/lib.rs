//! Core types for calbridge calendar tools.
//!
//! This crate holds the provider-neutral shaping logic shared by tool
//! providers:
//! - `time` for civil-time parsing and the query window
//! - `attendees` and `args` for normalizing loosely typed tool arguments
//! - `event` for projecting service events and building create payloads
//! - `protocol` for the tool invocation envelope and tool metadata

pub mod args;
pub mod attendees;
pub mod constants;
pub mod error;
pub mod event;
pub mod fields;
pub mod protocol;
pub mod time;

pub use error::{CalBridgeError, CalBridgeResult};
