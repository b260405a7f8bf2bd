//! SAM flag bit masks (SAM specification v1.6).
//!
//! Used when deciding which alignment records contribute fragment evidence.

pub const UNMAPPED: u16 = 0x4;       // Segment unmapped
pub const SECOND_IN_PAIR: u16 = 0x80; // The last segment in the template
pub const SECONDARY: u16 = 0x100;    // Secondary alignment
pub const SUPPLEMENTARY: u16 = 0x800; // Supplementary alignment
