//! Structural variant VCF output.
//!
//! ## Module Organization
//!
//! - `sv_record` - Shared header/record skeleton and its hook trait
//! - `somatic` - Tumor/normal specialization of the skeleton

mod somatic;
pub mod sv_record;

pub use somatic::{SomaticSvWriter, max_depth_filter_line, somatic_header_lines};
pub use sv_record::{RecordContext, SampleTags, SvVcfHooks, render_filters};
