// src/defaults.rs

// Somatic filter constants
pub const MAX_DEPTH_FILTER_LABEL: &str = "MaxDepth";
pub const MAX_DEPTH_FACTOR: f64 = 3.0;

// Output constants
pub const VCF_SOURCE: &str = env!("CARGO_PKG_NAME");
pub const VERBOSITY: i32 = 3;
