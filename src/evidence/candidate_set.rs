// Raw evidence for one SV candidate set, split by cohort

use std::fmt;

use super::index::{EvidenceHandle, EvidenceIndex};
use crate::error::IntegrityError;
use crate::io::SamRead;

/// Sample grouping used for evidence and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cohort {
    Normal,
    Tumor,
}

impl Cohort {
    /// Column order of the somatic VCF sample columns
    pub const ALL: [Cohort; 2] = [Cohort::Normal, Cohort::Tumor];

    pub fn label(self) -> &'static str {
        match self {
            Cohort::Normal => "NORMAL",
            Cohort::Tumor => "TUMOR",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SvCandidateSetData {
    normal: EvidenceIndex<SamRead>,
    tumor: EvidenceIndex<SamRead>,
}

impl SvCandidateSetData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, cohort: Cohort) -> &EvidenceIndex<SamRead> {
        match cohort {
            Cohort::Normal => &self.normal,
            Cohort::Tumor => &self.tumor,
        }
    }

    pub fn group_mut(&mut self, cohort: Cohort) -> &mut EvidenceIndex<SamRead> {
        match cohort {
            Cohort::Normal => &mut self.normal,
            Cohort::Tumor => &mut self.tumor,
        }
    }

    pub fn add(&mut self, cohort: Cohort, read: &SamRead) -> Result<EvidenceHandle, IntegrityError> {
        self.group_mut(cohort).add(read)
    }

    /// Fragments across both cohorts
    pub fn fragment_count(&self) -> usize {
        self.normal.len() + self.tumor.len()
    }
}
