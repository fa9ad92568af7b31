//! Core error definitions for the Parley responder.
//!
//! Every Parley crate reports failures through [`ParleyError`] so the
//! gateway and the CLI only have one error shape to map.
//!
//! # Main types
//!
//! - [`ParleyError`]: Unified error enum for all Parley subsystems.
//! - [`ParleyResult`]: Convenience alias for `Result<T, ParleyError>`.

/// Error types.
pub mod error;

pub use error::{ParleyError, ParleyResult};
