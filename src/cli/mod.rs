// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command-line interface for renoset.

mod args;
mod dispatch;

pub use args::{Cli, Commands, GenerateArgs, InitArgs, OutputFormat};
pub use dispatch::{generate, run, ActionResult};
