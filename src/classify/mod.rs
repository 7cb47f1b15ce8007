// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Changed-file classification.
//!
//! Maps a pull request's changed files onto configured update types using
//! ordered glob matching.

mod classifier;
pub mod matcher;

pub use classifier::{classify, Classification, DEFAULT_GROUP};
