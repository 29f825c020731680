//! Prelude module for jalali_date crate.
//!
//! Re-exports the derive_more macros the date and formatting types use.

#[allow(unused_imports)]
pub use derive_more::{Display, From};
