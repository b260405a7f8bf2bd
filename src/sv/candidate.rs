// SV candidate description
//
// Breakend positions are 1-based. Classification only looks at the
// chromosomes and open sides of the two breakends, taken in position
// order when both lie on the same chromosome.

use std::fmt;

/// Side of a breakend on which the novel junction lies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakendState {
    /// Sequence to the left is kept, the junction follows `pos`
    RightOpen,
    /// Sequence to the right is kept, the junction precedes `pos`
    LeftOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakend {
    pub chrom: String,
    pub pos: u64,
    pub state: BreakendState,
}

impl Breakend {
    pub fn new(chrom: &str, pos: u64, state: BreakendState) -> Self {
        Self {
            chrom: chrom.to_string(),
            pos,
            state,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvType {
    Translocation,
    Deletion,
    Duplication,
    Inversion,
}

impl SvType {
    /// VCF `SVTYPE` value
    pub fn label(self) -> &'static str {
        match self {
            SvType::Translocation => "BND",
            SvType::Deletion => "DEL",
            SvType::Duplication => "DUP",
            SvType::Inversion => "INV",
        }
    }

    /// Symbolic ALT allele; translocations use bracket notation instead
    pub fn symbolic_alt(self) -> Option<&'static str> {
        match self {
            SvType::Translocation => None,
            SvType::Deletion => Some("<DEL>"),
            SvType::Duplication => Some("<DUP:TANDEM>"),
            SvType::Inversion => Some("<INV>"),
        }
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvCandidate {
    pub candidate_index: u32,
    pub bp1: Breakend,
    pub bp2: Breakend,
    /// No base-pair exact breakpoint (evidence only, nothing assembled)
    pub is_imprecise: bool,
}

impl SvCandidate {
    pub fn new(candidate_index: u32, bp1: Breakend, bp2: Breakend, is_imprecise: bool) -> Self {
        Self {
            candidate_index,
            bp1,
            bp2,
            is_imprecise,
        }
    }

    pub fn is_imprecise(&self) -> bool {
        self.is_imprecise
    }

    /// Breakends with the lower position first on a shared chromosome;
    /// translocations keep their given order
    pub fn ordered_breakends(&self) -> (&Breakend, &Breakend) {
        if self.bp1.chrom == self.bp2.chrom && self.bp1.pos > self.bp2.pos {
            (&self.bp2, &self.bp1)
        } else {
            (&self.bp1, &self.bp2)
        }
    }

    pub fn sv_type(&self) -> SvType {
        use BreakendState::*;
        if self.bp1.chrom != self.bp2.chrom {
            return SvType::Translocation;
        }
        let (lower, upper) = self.ordered_breakends();
        match (lower.state, upper.state) {
            (RightOpen, LeftOpen) => SvType::Deletion,
            (LeftOpen, RightOpen) => SvType::Duplication,
            _ => SvType::Inversion,
        }
    }
}

/// Graph edge the candidate was discovered on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeInfo {
    pub locus_index: u32,
    pub node_index1: u32,
    pub node_index2: u32,
}

/// Local assembly result for a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvCandidateAssemblyData {
    /// Non-reference sequence inserted at the junction (empty if none)
    pub inserted_sequence: String,
}
