//! glyphview library crate.
//!
//! The rendering engine lives in [`render`]; everything else is the
//! plumbing around it: raster data, thumbnail providers, source list
//! expansion, configuration, and CLI parsing.

pub mod cli;
pub mod config;
pub mod provider;
pub mod raster;
pub mod render;
pub mod sources;
