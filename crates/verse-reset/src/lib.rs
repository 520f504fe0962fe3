//! `verse-reset` — applies the reset assignments of every guard that fired
//! on a transition, producing the Cartesian-expanded set of successor mode
//! tuples together with the successor continuous region (§4.3).
//!
//! | Module      | Contents                                    |
//! |-------------|----------------------------------------------|
//! | [`apply`]   | `apply_reset`                                |
//! | [`outcome`] | `ResetOutcome`                               |
//! | [`error`]   | `ResetError`, `ResetResult`                  |

pub mod apply;
pub mod error;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use apply::apply_reset;
pub use error::{ResetError, ResetResult};
pub use outcome::ResetOutcome;
