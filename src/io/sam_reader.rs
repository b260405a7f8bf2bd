// SAM reader module
//
// Minimal SAM text reader for fragment evidence:
// - Automatic gzip/bgzip detection by file extension and magic bytes
// - Header lines (@HD, @SQ, ...) are skipped
// - Only the fields needed for evidence grouping are kept
//
// Anything beyond the 11 mandatory columns (optional tags) is ignored.

use flate2::read::MultiGzDecoder;
use noodles_bgzf as bgzf;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};

use super::sam_flags;
use crate::evidence::FragmentRead;

const MANDATORY_FIELDS: usize = 11;

/// One alignment record, owned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamRead {
    pub qname: String,
    pub flag: u16,
    pub ref_name: String,
    pub pos: u64, // 1-based, 0 when unplaced
    pub mapq: u8,
    pub cigar: String,
    pub seq: String,
}

impl SamRead {
    /// Parse a single tab-delimited SAM alignment line
    pub fn parse_line(line: &str) -> io::Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MANDATORY_FIELDS {
            return Err(invalid_data(format!(
                "SAM record has {} fields, expected at least {}: {}",
                fields.len(),
                MANDATORY_FIELDS,
                line
            )));
        }

        let flag = fields[1]
            .parse::<u16>()
            .map_err(|_| invalid_data(format!("Invalid FLAG '{}' for {}", fields[1], fields[0])))?;
        let pos = fields[3]
            .parse::<u64>()
            .map_err(|_| invalid_data(format!("Invalid POS '{}' for {}", fields[3], fields[0])))?;
        let mapq = fields[4]
            .parse::<u8>()
            .map_err(|_| invalid_data(format!("Invalid MAPQ '{}' for {}", fields[4], fields[0])))?;

        Ok(Self {
            qname: fields[0].to_string(),
            flag,
            ref_name: fields[2].to_string(),
            pos,
            mapq,
            cigar: fields[5].to_string(),
            seq: fields[9].to_string(),
        })
    }

    pub fn is_unmapped(&self) -> bool {
        self.flag & sam_flags::UNMAPPED != 0
    }

    /// Secondary and supplementary records never fill an evidence slot
    pub fn is_primary(&self) -> bool {
        self.flag & (sam_flags::SECONDARY | sam_flags::SUPPLEMENTARY) == 0
    }

    /// `ref:pos` for placed reads, `*` otherwise
    pub fn location(&self) -> String {
        if self.is_unmapped() || self.ref_name == "*" {
            "*".to_string()
        } else {
            format!("{}:{}", self.ref_name, self.pos)
        }
    }
}

impl FragmentRead for SamRead {
    fn fragment_name(&self) -> &[u8] {
        self.qname.as_bytes()
    }

    fn read_number(&self) -> u8 {
        if self.flag & sam_flags::SECOND_IN_PAIR != 0 {
            2
        } else {
            // FIRST_IN_PAIR and unpaired reads both land in the first slot
            1
        }
    }
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Detect if a gzipped file is BGZIP format by checking for the 'BC' extra subfield
fn is_bgzip_format(path: &str) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 18];

    if file.read(&mut header).unwrap_or(0) < 18 {
        return Ok(false);
    }
    if header[0] != 0x1f || header[1] != 0x8b {
        return Ok(false);
    }
    if header[3] & 0x04 == 0 {
        return Ok(false);
    }
    Ok(header[12] == b'B' && header[13] == b'C')
}

/// SAM reader with automatic gzip/bgzip detection
pub struct SamReader {
    lines: io::Lines<Box<dyn BufRead>>,
    line_no: usize,
}

impl SamReader {
    /// Open a SAM file (.sam, .sam.gz)
    pub fn new(path: &str) -> io::Result<Self> {
        const BUFFER_SIZE: usize = 1024 * 1024;

        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if path.ends_with(".gz") {
            if is_bgzip_format(path)? {
                log::debug!("Detected BGZIP format for {}", path);
                let bgzf_reader = bgzf::MultithreadedReader::new(file);
                Box::new(BufReader::with_capacity(BUFFER_SIZE, bgzf_reader))
            } else {
                log::debug!("Detected standard gzip format for {}", path);
                Box::new(BufReader::with_capacity(BUFFER_SIZE, MultiGzDecoder::new(file)))
            }
        } else {
            Box::new(BufReader::with_capacity(BUFFER_SIZE, file))
        };

        Ok(Self::from_reader(reader))
    }

    pub fn from_reader(reader: Box<dyn BufRead>) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Read the next alignment record, skipping header and blank lines
    ///
    /// Returns `Ok(None)` at EOF.
    pub fn read_record(&mut self) -> io::Result<Option<SamRead>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            if line.is_empty() || line.starts_with('@') {
                continue;
            }
            return SamRead::parse_line(&line)
                .map(Some)
                .map_err(|e| invalid_data(format!("line {}: {}", self.line_no, e)));
        }
        Ok(None)
    }
}

impl Iterator for SamReader {
    type Item = io::Result<SamRead>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
