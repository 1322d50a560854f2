//! # roomchat-core
//!
//! Shared library for the roomchat terminal client.
//! Contains the room model, the word wrapper used by the message log, and
//! configuration.
//!
//! Nothing here depends on a terminal; the `roomchat` binary owns rendering.

pub mod config;
pub mod types;
pub mod wrap;
