//! Integration tests for somatic SV VCF output
//!
//! Records are compared byte for byte: field order, tag order and number
//! formatting are all part of the output contract.

use std::collections::BTreeSet;

use ferrous_sv::evidence::{Cohort, SvCandidateSetData};
use ferrous_sv::io::SamRead;
use ferrous_sv::somatic_opt::SomaticOpt;
use ferrous_sv::sv::{
    AlleleScoreInfo, Breakend, BreakendState, EdgeInfo, SampleScoreInfo, SomaticScoreInfo,
    SvCandidate, SvCandidateAssemblyData, SvModelScoreInfo, SvScoreInfo,
};
use ferrous_sv::vcf::{RecordContext, SomaticSvWriter, sv_record};
use ferrous_sv::{IntegrityError, VcfWriteError};

fn allele(span_pair_count: u32, split_read_count: u32, split_read_evidence: f32) -> AlleleScoreInfo {
    AlleleScoreInfo {
        span_pair_count,
        split_read_count,
        split_read_evidence,
    }
}

fn model_score(filters: &[&str]) -> SvModelScoreInfo {
    SvModelScoreInfo {
        base: SvScoreInfo {
            normal: SampleScoreInfo {
                ref_allele: allele(2, 4, 3.0),
                alt_allele: allele(5, 1, 0.3),
            },
            tumor: SampleScoreInfo {
                ref_allele: allele(0, 0, 0.0),
                alt_allele: allele(9, 12, 41.96),
            },
            bp1_max_depth: 12,
            bp2_max_depth: 7,
            filters: filters.iter().map(|f| f.to_string()).collect::<BTreeSet<_>>(),
        },
        somatic: SomaticScoreInfo { somatic_score: 58 },
    }
}

fn translocation() -> SvCandidate {
    SvCandidate::new(
        0,
        Breakend::new("chr1", 1000, BreakendState::RightOpen),
        Breakend::new("chr5", 2000, BreakendState::LeftOpen),
        false,
    )
}

fn imprecise_deletion() -> SvCandidate {
    SvCandidate::new(
        4,
        Breakend::new("chr2", 500, BreakendState::RightOpen),
        Breakend::new("chr2", 800, BreakendState::LeftOpen),
        true,
    )
}

fn edge() -> EdgeInfo {
    EdgeInfo {
        locus_index: 7,
        node_index1: 1,
        node_index2: 2,
    }
}

fn sv_data() -> SvCandidateSetData {
    let mut data = SvCandidateSetData::new();
    let r1 = SamRead::parse_line("frag1\t99\tchr1\t990\t60\t4M\t=\t1\t0\tACGT\tIIII").unwrap();
    let r2 = SamRead::parse_line("frag1\t147\tchr5\t2010\t60\t4M\t=\t1\t0\tACGT\tIIII").unwrap();
    data.add(Cohort::Tumor, &r1).unwrap();
    data.add(Cohort::Tumor, &r2).unwrap();
    data
}

fn write_candidate(writer: &SomaticSvWriter, sv: &SvCandidate, score: &SvModelScoreInfo) -> String {
    let mut out = Vec::new();
    writer
        .write_candidate(&edge(), &sv_data(), &SvCandidateAssemblyData::default(), sv, score, &mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_full_header() {
    let opt = SomaticOpt {
        is_max_depth_filter: true,
        ..SomaticOpt::default()
    };
    let writer = SomaticSvWriter::new(opt).with_source("unit-test");
    let mut out = Vec::new();
    writer.write_header(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "##fileformat=VCFv4.1");
    assert_eq!(lines[1], "##source=unit-test");
    assert_eq!(
        *lines.last().unwrap(),
        "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNORMAL\tTUMOR"
    );

    let position = |prefix: &str| lines.iter().position(|l| l.starts_with(prefix)).unwrap();
    assert!(position("##INFO=<ID=SOMATIC,") < position("##INFO=<ID=SOMATICSCORE,"));
    assert!(position("##INFO=<ID=SOMATICSCORE,") < position("##FORMAT=<ID=PAIR,"));
    assert!(position("##FORMAT=<ID=PAIR,") < position("##FORMAT=<ID=SR,"));
    assert!(position("##FORMAT=<ID=SR,") < position("##FORMAT=<ID=SREV,"));
    assert!(position("##FORMAT=<ID=SREV,") < position("##FILTER=<ID=MaxDepth,"));
    assert_eq!(lines.iter().filter(|l| l.starts_with("##FILTER")).count(), 1);
}

#[test]
fn test_header_without_depth_filter_has_no_filter_lines() {
    let lines = SomaticSvWriter::new(SomaticOpt::default()).header_lines();
    assert!(lines.iter().all(|l| !l.starts_with("##FILTER")));
}

#[test]
fn test_precise_translocation_records() {
    let writer = SomaticSvWriter::new(SomaticOpt::default());
    let text = write_candidate(&writer, &translocation(), &model_score(&[]));

    let expected = "\
chr1\t1000\tSomaticSVBND:7:1:2:0:0\tN\tN[chr5:2000[\t.\tPASS\t\
SVTYPE=BND;MATEID=SomaticSVBND:7:1:2:0:1;SOMATIC;SOMATICSCORE=58;BND_DEPTH=12;MATE_BND_DEPTH=7\t\
PAIR:SR:SREV\t2,5:4,1:3.0,0.3\t0,9:0,12:0.0,42.0\n\
chr5\t2000\tSomaticSVBND:7:1:2:0:1\tN\t]chr1:1000]N\t.\tPASS\t\
SVTYPE=BND;MATEID=SomaticSVBND:7:1:2:0:0;SOMATIC;SOMATICSCORE=58;BND_DEPTH=7;MATE_BND_DEPTH=12\t\
PAIR:SR:SREV\t2,5:4,1:3.0,0.3\t0,9:0,12:0.0,42.0\n";
    assert_eq!(text, expected);
}

#[test]
fn test_imprecise_deletion_record() {
    let writer = SomaticSvWriter::new(SomaticOpt::default());
    let text = write_candidate(&writer, &imprecise_deletion(), &model_score(&["MaxDepth"]));
    assert_eq!(
        text,
        "chr2\t500\tSomaticSVDEL:7:1:2:4\tN\t<DEL>\t.\tMaxDepth\t\
SVTYPE=DEL;END=800;SVLEN=-300;IMPRECISE;SOMATIC;SOMATICSCORE=58\tPAIR\t2,5\t0,9\n"
    );
}

#[test]
fn test_filters_render_sorted() {
    let writer = SomaticSvWriter::new(SomaticOpt::default());
    let text = write_candidate(&writer, &imprecise_deletion(), &model_score(&["MaxDepth", "LowQ"]));
    assert_eq!(text.split('\t').nth(6), Some("LowQ;MaxDepth"));
}

#[test]
fn test_calls_do_not_share_score_state() {
    let writer = SomaticSvWriter::new(SomaticOpt::default());
    let mut high = model_score(&[]);
    high.somatic.somatic_score = 99;

    let first = write_candidate(&writer, &imprecise_deletion(), &high);
    let second = write_candidate(&writer, &imprecise_deletion(), &model_score(&[]));
    assert!(first.contains("SOMATICSCORE=99"));
    assert!(second.contains("SOMATICSCORE=58"));
}

#[test]
fn test_missing_score_writes_nothing() {
    let writer = SomaticSvWriter::new(SomaticOpt::default());
    let mut out = Vec::new();
    let result = sv_record::write_sv_core(
        &writer,
        &edge(),
        &sv_data(),
        &SvCandidateAssemblyData::default(),
        &translocation(),
        &RecordContext::unscored(),
        &mut out,
    );

    assert!(matches!(
        result,
        Err(VcfWriteError::Integrity(IntegrityError::MissingScoreContext { .. }))
    ));
    assert!(out.is_empty());
}

#[test]
fn test_large_evidence_keeps_one_decimal() {
    let writer = SomaticSvWriter::new(SomaticOpt::default());
    let mut score = model_score(&[]);
    score.base.tumor.alt_allele.split_read_evidence = 12345.0;
    let ctx = RecordContext::with_model_score(&score);
    let tags = writer.build_sample_tags(&ctx, &translocation()).unwrap();
    assert_eq!(tags[2].1[1], "0.0,12345.0");
}
