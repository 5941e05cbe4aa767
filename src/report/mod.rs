//! Report merger and cell formatter
//!
//! Turns the registration report and the per-user details into flat
//! presentation rows. Pure, no I/O.

mod format;
mod merge;

pub use merge::merge;
