// Somatic SV VCF writer
//
// Specializes the shared SV record skeleton for tumor/normal output:
// SOMATIC/SOMATICSCORE INFO tags, breakend depths on translocations and
// PAIR/SR/SREV sample columns for the NORMAL and TUMOR cohorts.
//
// The model score for a candidate travels in the RecordContext; the
// writer itself only holds configuration.

use std::io::{self, Write};

use super::sv_record::{self, RecordContext, SampleTags, SvVcfHooks};
use crate::defaults;
use crate::error::{IntegrityError, VcfWriteError};
use crate::evidence::{Cohort, SvCandidateSetData};
use crate::somatic_opt::SomaticOpt;
use crate::sv::{AlleleScoreInfo, EdgeInfo, SvCandidate, SvCandidateAssemblyData, SvModelScoreInfo, SvScoreInfo};

const INFO_DEFINITIONS: [&str; 2] = [
    r#"##INFO=<ID=SOMATIC,Number=0,Type=Flag,Description="Somatic mutation">"#,
    r#"##INFO=<ID=SOMATICSCORE,Number=1,Type=Integer,Description="Somatic variant Quality score">"#,
];

const FORMAT_DEFINITIONS: [&str; 3] = [
    r#"##FORMAT=<ID=PAIR,Number=.,Type=Integer,Description="Spanning paired-read support for the ref and alt alleles in the order listed">"#,
    r#"##FORMAT=<ID=SR,Number=.,Type=Integer,Description="Split read counts for the ref and alt alleles in the order listed">"#,
    r#"##FORMAT=<ID=SREV,Number=.,Type=Float,Description="Split read evidence for the ref and alt alleles in the order listed">"#,
];

/// FILTER definition for the normal depth filter, if enabled
pub fn max_depth_filter_line(opt: &SomaticOpt) -> Option<String> {
    opt.is_max_depth_filter.then(|| {
        format!(
            "##FILTER=<ID={},Description=\"Normal sample site depth is greater than {}x the mean chromosome depth near one or both variant breakends\">",
            opt.max_depth_filter_label,
            format_general(opt.max_depth_factor)
        )
    })
}

/// `value` with 6 significant digits and trailing zeros dropped, switching
/// to scientific notation for very large or small magnitudes (printf `%g`)
fn format_general(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    // Exponent after rounding to the target precision
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let fixed = format!("{:.*}", (PRECISION - 1 - exponent) as usize, value);
        trim_fraction(&fixed).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Somatic-specific header definitions (INFO, FORMAT, FILTER) in order
pub fn somatic_header_lines(opt: &SomaticOpt) -> Vec<String> {
    INFO_DEFINITIONS
        .iter()
        .chain(FORMAT_DEFINITIONS.iter())
        .map(|line| line.to_string())
        .chain(max_depth_filter_line(opt))
        .collect()
}

/// `"<ref>,<alt>"` per cohort, in sample column order
fn per_cohort(base: &SvScoreInfo, f: impl Fn(&AlleleScoreInfo) -> String) -> Vec<String> {
    Cohort::ALL
        .iter()
        .map(|&cohort| {
            let sample = base.sample(cohort);
            format!("{},{}", f(&sample.ref_allele), f(&sample.alt_allele))
        })
        .collect()
}

fn format_sample_key() -> String {
    // TODO: take sample names from the BAM read groups instead of fixed labels
    format!("FORMAT\t{}\t{}", Cohort::Normal.label(), Cohort::Tumor.label())
}

#[derive(Debug, Clone)]
pub struct SomaticSvWriter {
    opt: SomaticOpt,
    source: String,
}

impl SomaticSvWriter {
    pub fn new(opt: SomaticOpt) -> Self {
        Self {
            opt,
            source: defaults::VCF_SOURCE.to_string(),
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn header_lines(&self) -> Vec<String> {
        sv_record::header_lines(self, &self.source)
    }

    /// Full VCF header including the column line
    pub fn write_header(&self, out: &mut dyn Write) -> io::Result<()> {
        sv_record::write_header(self, &self.source, out)
    }

    /// Sample part of the column header line (no newline)
    pub fn write_header_format_sample_key(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{}", format_sample_key())
    }

    pub fn write_header_info_definitions(&self, out: &mut dyn Write) -> io::Result<()> {
        write_lines(out, &self.header_info_lines())
    }

    pub fn write_header_format_definitions(&self, out: &mut dyn Write) -> io::Result<()> {
        write_lines(out, &self.header_format_lines())
    }

    /// Writes nothing unless the max depth filter is enabled
    pub fn write_header_filter_definitions(&self, out: &mut dyn Write) -> io::Result<()> {
        write_lines(out, &self.header_filter_lines())
    }

    /// `SOMATIC` and `SOMATICSCORE=<n>`
    pub fn build_info_tags(&self, ctx: &RecordContext<'_>) -> Result<Vec<String>, IntegrityError> {
        let model_score = ctx.model_score("build_info_tags")?;
        Ok(vec![
            "SOMATIC".to_string(),
            format!("SOMATICSCORE={}", model_score.somatic.somatic_score),
        ])
    }

    /// `BND_DEPTH` and `MATE_BND_DEPTH`, local breakend first
    pub fn build_translocation_info_tags(
        &self,
        ctx: &RecordContext<'_>,
        is_first_breakend: bool,
    ) -> Result<Vec<String>, IntegrityError> {
        let base = &ctx.model_score("build_translocation_info_tags")?.base;
        let (local, mate) = if is_first_breakend {
            (base.bp1_max_depth, base.bp2_max_depth)
        } else {
            (base.bp2_max_depth, base.bp1_max_depth)
        };

        // Per-breakend alt pair counts (NORMAL_ALT_BND_PAIR_COUNT,
        // TUMOR_ALT_BND_PAIR_COUNT) are not reported.
        Ok(vec![
            format!("BND_DEPTH={}", local),
            format!("MATE_BND_DEPTH={}", mate),
        ])
    }

    /// PAIR for every candidate; SR and SREV only with an exact breakpoint
    pub fn build_sample_tags(&self, ctx: &RecordContext<'_>, sv: &SvCandidate) -> Result<SampleTags, IntegrityError> {
        let base = &ctx.model_score("build_sample_tags")?.base;

        let mut sample_tags = SampleTags::new();
        sample_tags.push((
            "PAIR".to_string(),
            per_cohort(base, |a| a.span_pair_count.to_string()),
        ));

        if sv.is_imprecise() {
            return Ok(sample_tags);
        }

        sample_tags.push((
            "SR".to_string(),
            per_cohort(base, |a| a.split_read_count.to_string()),
        ));
        sample_tags.push((
            "SREV".to_string(),
            per_cohort(base, |a| format!("{:.1}", a.split_read_evidence)),
        ));
        Ok(sample_tags)
    }

    /// FILTER column from the candidate's filter set
    pub fn write_filter_field(&self, ctx: &RecordContext<'_>) -> Result<String, IntegrityError> {
        let base = &ctx.model_score("write_filter_field")?.base;
        Ok(sv_record::render_filters(&base.filters))
    }

    /// Write the VCF record(s) for one scored candidate.
    ///
    /// On error nothing is written for this candidate, so a driver can log
    /// and continue with the next one.
    pub fn write_candidate(
        &self,
        edge: &EdgeInfo,
        sv_data: &SvCandidateSetData,
        assembly_data: &SvCandidateAssemblyData,
        sv: &SvCandidate,
        model_score: &SvModelScoreInfo,
        out: &mut dyn Write,
    ) -> Result<(), VcfWriteError> {
        let ctx = RecordContext::with_model_score(model_score);
        sv_record::write_sv_core(self, edge, sv_data, assembly_data, sv, &ctx, out)
    }
}

impl SvVcfHooks for SomaticSvWriter {
    fn header_info_lines(&self) -> Vec<String> {
        INFO_DEFINITIONS.iter().map(|line| line.to_string()).collect()
    }

    fn header_format_lines(&self) -> Vec<String> {
        FORMAT_DEFINITIONS.iter().map(|line| line.to_string()).collect()
    }

    fn header_filter_lines(&self) -> Vec<String> {
        max_depth_filter_line(&self.opt).into_iter().collect()
    }

    fn header_format_sample_key(&self) -> Option<String> {
        Some(format_sample_key())
    }

    fn modify_info(&self, ctx: &RecordContext<'_>, info_tags: &mut Vec<String>) -> Result<(), IntegrityError> {
        info_tags.extend(self.build_info_tags(ctx)?);
        Ok(())
    }

    fn modify_translocation_info(
        &self,
        ctx: &RecordContext<'_>,
        is_first_breakend: bool,
        info_tags: &mut Vec<String>,
    ) -> Result<(), IntegrityError> {
        info_tags.extend(self.build_translocation_info_tags(ctx, is_first_breakend)?);
        Ok(())
    }

    fn modify_sample(
        &self,
        ctx: &RecordContext<'_>,
        sv: &SvCandidate,
        sample_tags: &mut SampleTags,
    ) -> Result<(), IntegrityError> {
        sample_tags.extend(self.build_sample_tags(ctx, sv)?);
        Ok(())
    }

    fn write_filter(&self, ctx: &RecordContext<'_>) -> Result<String, IntegrityError> {
        self.write_filter_field(ctx)
    }
}

fn write_lines(out: &mut dyn Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
