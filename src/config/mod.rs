// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for renoset.
//!
//! This module handles loading, parsing, and merging configuration from
//! inline text, files, and built-in defaults.

pub mod default;
mod loader;
mod schema;

pub use default::{default_config, example_config};
pub use loader::{
    find_config_file_in, load_config, merge_overlays, parse_overlay, ConfigOverlay,
    UpdateTypeOverlay,
};
pub use schema::*;
