//! Fragment evidence aggregation.
//!
//! Reads are grouped by fragment (query name) into evidence records with
//! one slot per pair end.
//!
//! ## Module Organization
//!
//! - `key` - Fragment identity used as the lookup key
//! - `record` - Two-slot evidence record and the `FragmentRead` trait
//! - `index` - Keyed, append-only record container
//! - `candidate_set` - Per-cohort evidence groups for one candidate set

mod candidate_set;
mod index;
mod key;
mod record;

pub use candidate_set::{Cohort, SvCandidateSetData};
pub use index::{EvidenceHandle, EvidenceIndex};
pub use key::EvidenceKey;
pub use record::{EvidenceRecord, FragmentRead};
