// Shared SV VCF writing skeleton
//
// Lays out the header and the fixed record columns
// (CHROM POS ID REF ALT QUAL FILTER INFO [FORMAT samples...]) and calls
// the writer-specific hooks at fixed points:
//
//   header:  base INFO, hook INFO, hook FORMAT, hook FILTER, ALT, column line
//   record:  modify_info, modify_translocation_info (BND only),
//            modify_sample, write_filter
//
// Each candidate is rendered to text in full before anything is written,
// so a hook failure leaves no partial record in the output.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::error::{IntegrityError, VcfWriteError};
use crate::evidence::{Cohort, SvCandidateSetData};
use crate::sv::{Breakend, BreakendState, EdgeInfo, SvCandidate, SvCandidateAssemblyData, SvModelScoreInfo, SvType};

const VCF_VERSION: &str = "VCFv4.1";
const ID_PREFIX: &str = "SomaticSV";
const MISSING: &str = ".";

/// FORMAT tags in emission order, each with one value per sample column
pub type SampleTags = Vec<(String, Vec<String>)>;

/// Per-record data passed explicitly to every record hook
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordContext<'a> {
    model_score: Option<&'a SvModelScoreInfo>,
}

impl<'a> RecordContext<'a> {
    pub fn with_model_score(model_score: &'a SvModelScoreInfo) -> Self {
        Self {
            model_score: Some(model_score),
        }
    }

    /// Context for writers that do not score candidates
    pub fn unscored() -> Self {
        Self { model_score: None }
    }

    /// Model score for this record; `operation` names the caller in the error
    pub fn model_score(&self, operation: &'static str) -> Result<&'a SvModelScoreInfo, IntegrityError> {
        self.model_score
            .ok_or(IntegrityError::MissingScoreContext { operation })
    }
}

/// Customization points of the SV record writer.
///
/// Header hooks are pure: they return lines (without trailing newline)
/// and the skeleton writes them.
pub trait SvVcfHooks {
    fn header_info_lines(&self) -> Vec<String> {
        Vec::new()
    }

    fn header_format_lines(&self) -> Vec<String> {
        Vec::new()
    }

    fn header_filter_lines(&self) -> Vec<String> {
        Vec::new()
    }

    /// Column header suffix after `INFO`; `None` writes a sites-only file
    fn header_format_sample_key(&self) -> Option<String> {
        None
    }

    fn modify_info(&self, _ctx: &RecordContext<'_>, _info_tags: &mut Vec<String>) -> Result<(), IntegrityError> {
        Ok(())
    }

    fn modify_translocation_info(
        &self,
        _ctx: &RecordContext<'_>,
        _is_first_breakend: bool,
        _info_tags: &mut Vec<String>,
    ) -> Result<(), IntegrityError> {
        Ok(())
    }

    fn modify_sample(
        &self,
        _ctx: &RecordContext<'_>,
        _sv: &SvCandidate,
        _sample_tags: &mut SampleTags,
    ) -> Result<(), IntegrityError> {
        Ok(())
    }

    /// FILTER column text
    fn write_filter(&self, _ctx: &RecordContext<'_>) -> Result<String, IntegrityError> {
        Ok(MISSING.to_string())
    }
}

/// Render a filter set: `PASS` when empty, otherwise names joined by `;`
pub fn render_filters(filters: &BTreeSet<String>) -> String {
    if filters.is_empty() {
        "PASS".to_string()
    } else {
        filters.iter().map(String::as_str).collect::<Vec<_>>().join(";")
    }
}

/// Complete header, one entry per line
pub fn header_lines<H: SvVcfHooks + ?Sized>(hooks: &H, source: &str) -> Vec<String> {
    let mut lines = vec![
        format!("##fileformat={VCF_VERSION}"),
        format!("##source={source}"),
        r#"##INFO=<ID=IMPRECISE,Number=0,Type=Flag,Description="Imprecise structural variation">"#.to_string(),
        r#"##INFO=<ID=SVTYPE,Number=1,Type=String,Description="Type of structural variant">"#.to_string(),
        r#"##INFO=<ID=SVLEN,Number=.,Type=Integer,Description="Difference in length between REF and ALT alleles">"#.to_string(),
        r#"##INFO=<ID=END,Number=1,Type=Integer,Description="End position of the variant described in this record">"#.to_string(),
        r#"##INFO=<ID=MATEID,Number=.,Type=String,Description="ID of mate breakend">"#.to_string(),
        r#"##INFO=<ID=BND_DEPTH,Number=1,Type=Integer,Description="Read depth at local translocation breakend">"#.to_string(),
        r#"##INFO=<ID=MATE_BND_DEPTH,Number=1,Type=Integer,Description="Read depth at remote translocation mate breakend">"#.to_string(),
    ];
    lines.extend(hooks.header_info_lines());
    lines.extend(hooks.header_format_lines());
    lines.extend(hooks.header_filter_lines());
    lines.push(r#"##ALT=<ID=DEL,Description="Deletion">"#.to_string());
    lines.push(r#"##ALT=<ID=INV,Description="Inversion">"#.to_string());
    lines.push(r#"##ALT=<ID=DUP:TANDEM,Description="Tandem Duplication">"#.to_string());

    let mut column_line = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO".to_string();
    if let Some(key) = hooks.header_format_sample_key() {
        column_line.push('\t');
        column_line.push_str(&key);
    }
    lines.push(column_line);
    lines
}

pub fn write_header<H: SvVcfHooks + ?Sized>(hooks: &H, source: &str, out: &mut dyn Write) -> io::Result<()> {
    for line in header_lines(hooks, source) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Render all VCF records for one candidate (two for a translocation)
pub fn format_sv_records<H: SvVcfHooks + ?Sized>(
    hooks: &H,
    edge: &EdgeInfo,
    sv_data: &SvCandidateSetData,
    assembly_data: &SvCandidateAssemblyData,
    sv: &SvCandidate,
    ctx: &RecordContext<'_>,
) -> Result<Vec<String>, IntegrityError> {
    let sv_type = sv.sv_type();
    log::trace!(
        "Formatting {} candidate {} with {} normal / {} tumor fragments",
        sv_type,
        sv.candidate_index,
        sv_data.group(Cohort::Normal).len(),
        sv_data.group(Cohort::Tumor).len()
    );

    let id_base = format!(
        "{}{}:{}:{}:{}:{}",
        ID_PREFIX,
        sv_type.label(),
        edge.locus_index,
        edge.node_index1,
        edge.node_index2,
        sv.candidate_index
    );

    // Inserted sequence is only meaningful with an exact breakpoint
    let insert_seq = if sv.is_imprecise() {
        ""
    } else {
        assembly_data.inserted_sequence.as_str()
    };

    let mut records = Vec::with_capacity(2);
    if sv_type == SvType::Translocation {
        for is_first in [true, false] {
            let (local, remote) = if is_first { (&sv.bp1, &sv.bp2) } else { (&sv.bp2, &sv.bp1) };
            let local_insert = if is_first || local.state != remote.state {
                insert_seq.to_string()
            } else {
                reverse_complement(insert_seq)
            };

            let mut info_tags = vec![
                format!("SVTYPE={}", sv_type.label()),
                format!("MATEID={}:{}", id_base, if is_first { 1 } else { 0 }),
            ];
            if sv.is_imprecise() {
                info_tags.push("IMPRECISE".to_string());
            }
            hooks.modify_info(ctx, &mut info_tags)?;
            hooks.modify_translocation_info(ctx, is_first, &mut info_tags)?;

            records.push(format_record(
                hooks,
                ctx,
                sv,
                local,
                &format!("{}:{}", id_base, if is_first { 0 } else { 1 }),
                &breakend_alt(local, remote, &local_insert),
                &info_tags,
            )?);
        }
    } else {
        let (start, end) = sv.ordered_breakends();
        let span = (end.pos - start.pos) as i64;
        let sv_len = if sv_type == SvType::Deletion { -span } else { span };

        let mut info_tags = vec![
            format!("SVTYPE={}", sv_type.label()),
            format!("END={}", end.pos),
            format!("SVLEN={}", sv_len),
        ];
        if sv.is_imprecise() {
            info_tags.push("IMPRECISE".to_string());
        }
        hooks.modify_info(ctx, &mut info_tags)?;

        let alt = sv_type.symbolic_alt().unwrap_or(MISSING);
        records.push(format_record(hooks, ctx, sv, start, &id_base, alt, &info_tags)?);
    }
    Ok(records)
}

/// Render and write all records for one candidate
pub fn write_sv_core<H: SvVcfHooks + ?Sized>(
    hooks: &H,
    edge: &EdgeInfo,
    sv_data: &SvCandidateSetData,
    assembly_data: &SvCandidateAssemblyData,
    sv: &SvCandidate,
    ctx: &RecordContext<'_>,
    out: &mut dyn Write,
) -> Result<(), VcfWriteError> {
    let records = format_sv_records(hooks, edge, sv_data, assembly_data, sv, ctx)?;
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

fn format_record<H: SvVcfHooks + ?Sized>(
    hooks: &H,
    ctx: &RecordContext<'_>,
    sv: &SvCandidate,
    breakend: &Breakend,
    id: &str,
    alt: &str,
    info_tags: &[String],
) -> Result<String, IntegrityError> {
    let mut sample_tags = SampleTags::new();
    hooks.modify_sample(ctx, sv, &mut sample_tags)?;
    let filter = hooks.write_filter(ctx)?;

    let pos = breakend.pos.to_string();
    let info = if info_tags.is_empty() {
        MISSING.to_string()
    } else {
        info_tags.join(";")
    };

    let mut fields: Vec<String> = vec![
        breakend.chrom.clone(),
        pos,
        id.to_string(),
        "N".to_string(),
        alt.to_string(),
        MISSING.to_string(),
        filter,
        info,
    ];

    if !sample_tags.is_empty() {
        let format_keys: Vec<&str> = sample_tags.iter().map(|(tag, _)| tag.as_str()).collect();
        fields.push(format_keys.join(":"));

        let sample_count = sample_tags.iter().map(|(_, values)| values.len()).max().unwrap_or(0);
        for sample in 0..sample_count {
            let values: Vec<&str> = sample_tags
                .iter()
                .map(|(_, values)| values.get(sample).map_or(MISSING, String::as_str))
                .collect();
            fields.push(values.join(":"));
        }
    }

    Ok(fields.join("\t"))
}

/// BND ALT in bracket notation for the `local` breakend joined to `remote`
fn breakend_alt(local: &Breakend, remote: &Breakend, insert_seq: &str) -> String {
    // Bracket points the way the remote sequence extends from its position
    let bracket = match remote.state {
        BreakendState::RightOpen => ']',
        BreakendState::LeftOpen => '[',
    };
    let mate = format!("{b}{}:{}{b}", remote.chrom, remote.pos, b = bracket);
    match local.state {
        BreakendState::RightOpen => format!("N{}{}", insert_seq, mate),
        BreakendState::LeftOpen => format!("{}{}N", mate, insert_seq),
    }
}

fn reverse_complement(seq: &str) -> String {
    seq.bytes()
        .rev()
        .map(|b| match b {
            b'A' | b'a' => 'T',
            b'C' | b'c' => 'G',
            b'G' | b'g' => 'C',
            b'T' | b't' => 'A',
            _ => 'N',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use BreakendState::*;

    struct SitesOnly;

    impl SvVcfHooks for SitesOnly {}

    fn deletion(is_imprecise: bool) -> SvCandidate {
        SvCandidate::new(
            3,
            Breakend::new("chr1", 1000, RightOpen),
            Breakend::new("chr1", 1500, LeftOpen),
            is_imprecise,
        )
    }

    fn translocation() -> SvCandidate {
        SvCandidate::new(
            0,
            Breakend::new("chr1", 1000, RightOpen),
            Breakend::new("chr5", 2000, LeftOpen),
            false,
        )
    }

    fn edge() -> EdgeInfo {
        EdgeInfo {
            locus_index: 7,
            node_index1: 1,
            node_index2: 2,
        }
    }

    #[test]
    fn test_render_filters() {
        let mut filters = BTreeSet::new();
        assert_eq!(render_filters(&filters), "PASS");
        filters.insert("MaxDepth".to_string());
        filters.insert("Low".to_string());
        assert_eq!(render_filters(&filters), "Low;MaxDepth");
    }

    #[test]
    fn test_sites_only_header() {
        let lines = header_lines(&SitesOnly, "test");
        assert_eq!(lines[0], "##fileformat=VCFv4.1");
        assert_eq!(lines[1], "##source=test");
        assert_eq!(
            lines.last().unwrap(),
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO"
        );
        assert!(lines.iter().all(|l| !l.contains("FORMAT")));
    }

    #[test]
    fn test_deletion_record_layout() {
        let records = format_sv_records(
            &SitesOnly,
            &edge(),
            &SvCandidateSetData::new(),
            &SvCandidateAssemblyData::default(),
            &deletion(true),
            &RecordContext::unscored(),
        )
        .unwrap();
        assert_eq!(
            records,
            vec!["chr1\t1000\tSomaticSVDEL:7:1:2:3\tN\t<DEL>\t.\t.\tSVTYPE=DEL;END=1500;SVLEN=-500;IMPRECISE"]
        );
    }

    #[test]
    fn test_reversed_breakends_keep_end_after_pos() {
        let sv = SvCandidate::new(
            5,
            Breakend::new("chr3", 9000, LeftOpen),
            Breakend::new("chr3", 4000, RightOpen),
            false,
        );
        let records = format_sv_records(
            &SitesOnly,
            &edge(),
            &SvCandidateSetData::new(),
            &SvCandidateAssemblyData::default(),
            &sv,
            &RecordContext::unscored(),
        )
        .unwrap();
        assert_eq!(
            records,
            vec!["chr3\t4000\tSomaticSVDEL:7:1:2:5\tN\t<DEL>\t.\t.\tSVTYPE=DEL;END=9000;SVLEN=-5000"]
        );
    }

    #[test]
    fn test_translocation_writes_mated_pair() {
        let assembly = SvCandidateAssemblyData {
            inserted_sequence: "AC".to_string(),
        };
        let records = format_sv_records(
            &SitesOnly,
            &edge(),
            &SvCandidateSetData::new(),
            &assembly,
            &translocation(),
            &RecordContext::unscored(),
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            "chr1\t1000\tSomaticSVBND:7:1:2:0:0\tN\tNAC[chr5:2000[\t.\t.\tSVTYPE=BND;MATEID=SomaticSVBND:7:1:2:0:1"
        );
        assert_eq!(
            records[1],
            "chr5\t2000\tSomaticSVBND:7:1:2:0:1\tN\t]chr1:1000]ACN\t.\t.\tSVTYPE=BND;MATEID=SomaticSVBND:7:1:2:0:0"
        );
    }

    #[test]
    fn test_same_state_breakends_reverse_insert() {
        let sv = SvCandidate::new(
            0,
            Breakend::new("chr1", 100, RightOpen),
            Breakend::new("chr2", 200, RightOpen),
            false,
        );
        let assembly = SvCandidateAssemblyData {
            inserted_sequence: "AAC".to_string(),
        };
        let records = format_sv_records(
            &SitesOnly,
            &edge(),
            &SvCandidateSetData::new(),
            &assembly,
            &sv,
            &RecordContext::unscored(),
        )
        .unwrap();
        assert!(records[0].contains("\tNAAC]chr2:200]\t"));
        assert!(records[1].contains("\tNGTT]chr1:100]\t"));
    }

    #[test]
    fn test_missing_score_context_is_integrity_error() {
        let err = RecordContext::unscored().model_score("test").unwrap_err();
        assert!(matches!(err, IntegrityError::MissingScoreContext { operation: "test" }));
    }
}
