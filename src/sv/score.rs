// Model scores for one SV candidate
//
// Mirrors what the scoring model reports: per cohort and per allele
// supporting read counts, breakend depths, the somatic score and the
// filters that fired.

use std::collections::BTreeSet;

use crate::evidence::Cohort;

/// Support for one allele in one cohort
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlleleScoreInfo {
    pub span_pair_count: u32,
    pub split_read_count: u32,
    pub split_read_evidence: f32,
}

/// Reference and alternate allele support for one cohort
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleScoreInfo {
    pub ref_allele: AlleleScoreInfo,
    pub alt_allele: AlleleScoreInfo,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvScoreInfo {
    pub normal: SampleScoreInfo,
    pub tumor: SampleScoreInfo,
    pub bp1_max_depth: u32, // Max local depth around breakend 1
    pub bp2_max_depth: u32, // Max local depth around breakend 2
    pub filters: BTreeSet<String>,
}

impl SvScoreInfo {
    pub fn sample(&self, cohort: Cohort) -> &SampleScoreInfo {
        match cohort {
            Cohort::Normal => &self.normal,
            Cohort::Tumor => &self.tumor,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SomaticScoreInfo {
    pub somatic_score: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvModelScoreInfo {
    pub base: SvScoreInfo,
    pub somatic: SomaticScoreInfo,
}
