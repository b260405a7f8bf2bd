use clap::Args;

use crate::defaults;

// src/somatic_opt.rs
//
// Somatic calling options consumed by the VCF writer

/// Somatic output options
#[derive(Debug, Clone, PartialEq)]
pub struct SomaticOpt {
    pub is_max_depth_filter: bool,     // Emit and apply the normal-depth filter
    pub max_depth_filter_label: String, // FILTER ID for the depth filter
    pub max_depth_factor: f64,         // Multiple of mean chromosome depth
}

impl Default for SomaticOpt {
    fn default() -> Self {
        SomaticOpt {
            is_max_depth_filter: false,
            max_depth_filter_label: defaults::MAX_DEPTH_FILTER_LABEL.to_string(),
            max_depth_factor: defaults::MAX_DEPTH_FACTOR,
        }
    }
}

impl SomaticOpt {
    /// Returns Ok(()) if valid, or Err with a description of each issue
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.max_depth_filter_label.is_empty() {
            errors.push("max_depth_filter_label must not be empty".to_string());
        }
        if self
            .max_depth_filter_label
            .chars()
            .any(|c| c.is_whitespace() || c == ';' || c == ',' || c == '>')
        {
            errors.push(format!(
                "max_depth_filter_label contains characters not allowed in a FILTER ID: '{}'",
                self.max_depth_filter_label
            ));
        }
        if !(self.max_depth_factor.is_finite() && self.max_depth_factor > 0.0) {
            errors.push(format!(
                "max_depth_factor must be > 0, got {}",
                self.max_depth_factor
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Command line flags for the somatic depth filter
#[derive(Args, Debug, Clone)]
pub struct SomaticArgs {
    /// Declare the normal-sample max depth filter in the header
    #[arg(long)]
    pub max_depth_filter: bool,

    /// FILTER ID used for the max depth filter
    #[arg(long, value_name = "STR", default_value = defaults::MAX_DEPTH_FILTER_LABEL)]
    pub max_depth_label: String,

    /// Filter when normal depth exceeds FLOAT times the mean chromosome depth
    #[arg(long, value_name = "FLOAT", default_value_t = defaults::MAX_DEPTH_FACTOR)]
    pub max_depth_factor: f64,
}

impl From<&SomaticArgs> for SomaticOpt {
    fn from(args: &SomaticArgs) -> Self {
        SomaticOpt {
            is_max_depth_filter: args.max_depth_filter,
            max_depth_filter_label: args.max_depth_label.clone(),
            max_depth_factor: args.max_depth_factor,
        }
    }
}
