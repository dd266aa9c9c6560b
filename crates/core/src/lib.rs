//! Core errors and constants for the `memo` workspace.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias used by the layers that
//!   can actually fail (settings files, environment overrides).
//! - **`constants`**: environment variable names and defaults.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{Error, RecoveryHint, Result, ResultExt},
};
