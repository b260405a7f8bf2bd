//! Alignment record input.
//!
//! - `sam_flags` - SAM flag bit constants
//! - `sam_reader` - SAM text reader producing `SamRead` records

pub mod sam_flags;
mod sam_reader;

pub use sam_reader::{SamRead, SamReader};
