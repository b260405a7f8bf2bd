//! Scored SV candidate inputs.
//!
//! These types are produced upstream by candidate detection and the
//! scoring model; the writers only read them.

mod candidate;
mod score;

pub use candidate::{Breakend, BreakendState, EdgeInfo, SvCandidate, SvCandidateAssemblyData, SvType};
pub use score::{AlleleScoreInfo, SampleScoreInfo, SomaticScoreInfo, SvModelScoreInfo, SvScoreInfo};
