//! Prelude module for the sambat crate.
//!
//! Re-exports the derive macros from derive_more and the log macros used
//! throughout the crate.

#[allow(unused_imports)]
pub use derive_more::{Display, From};
#[allow(unused_imports)]
pub use log::{debug, trace, warn};
