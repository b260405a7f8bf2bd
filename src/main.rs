use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ferrous_sv::defaults;
use ferrous_sv::evidence::EvidenceIndex;
use ferrous_sv::io::{SamRead, SamReader};
use ferrous_sv::somatic_opt::{SomaticArgs, SomaticOpt};
use ferrous_sv::vcf::SomaticSvWriter;

#[derive(Parser)]
#[command(name = "ferrous-sv")]
#[command(about = "FerrousSV - read-pair evidence grouping and somatic SV VCF output", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the somatic SV VCF header
    Header {
        #[command(flatten)]
        somatic: SomaticArgs,

        /// Output VCF file (default: stdout)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Verbose level: 1=error, 2=warning, 3=message, 4+=debugging
        #[arg(short = 'v', long, value_name = "INT", default_value_t = defaults::VERBOSITY)]
        verbosity: i32,
    },

    /// Group SAM records by fragment and list each fragment's reads
    Evidence {
        /// Input SAM file (.sam or .sam.gz)
        #[arg(value_name = "READS.SAM")]
        sam: PathBuf,

        /// Output file (default: stdout)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Verbose level: 1=error, 2=warning, 3=message, 4+=debugging
        #[arg(short = 'v', long, value_name = "INT", default_value_t = defaults::VERBOSITY)]
        verbosity: i32,
    },
}

/// Map verbosity (1=error, 2=warning, 3=message, 4=debug, 5+=trace) to a log level
fn init_logger(verbosity: i32) {
    let log_level = match verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn open_output(output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            anyhow!("Error creating output file {}: {}", path.display(), e)
        })?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn run_header(somatic: &SomaticArgs, output: Option<&PathBuf>) -> Result<()> {
    let opt = SomaticOpt::from(somatic);
    if let Err(errors) = opt.validate() {
        for e in &errors {
            log::error!("{}", e);
        }
        return Err(anyhow!("Invalid somatic options ({} errors)", errors.len()));
    }

    if opt.is_max_depth_filter {
        log::info!(
            "Max depth filter '{}' at {}x mean chromosome depth",
            opt.max_depth_filter_label,
            opt.max_depth_factor
        );
    }

    let writer = SomaticSvWriter::new(opt);
    let mut out = open_output(output)?;
    writer
        .write_header(&mut out)
        .map_err(|e| anyhow!("Error writing VCF header: {}", e))?;
    out.flush()
        .map_err(|e| anyhow!("Error writing VCF header: {}", e))?;
    Ok(())
}

fn format_read(read: Option<&SamRead>) -> String {
    read.map_or_else(|| "*".to_string(), SamRead::location)
}

fn run_evidence(sam: &Path, output: Option<&PathBuf>) -> Result<()> {
    let sam_path = sam.to_string_lossy().to_string();
    log::info!("Reading fragment evidence from {}", sam_path);

    let reader = SamReader::new(&sam_path)
        .map_err(|e| anyhow!("Error opening SAM file {}: {}", sam_path, e))?;

    let mut index: EvidenceIndex<SamRead> = EvidenceIndex::new();
    let mut n_records = 0usize;
    let mut n_skipped = 0usize;

    for read in reader {
        let read = read.map_err(|e| anyhow!("Error reading {}: {}", sam_path, e))?;
        n_records += 1;

        if !read.is_primary() {
            n_skipped += 1;
            continue;
        }

        index
            .add(&read)
            .map_err(|e| anyhow!("Evidence integrity error in {}: {}", sam_path, e))?;
    }

    log::info!(
        "Processed {} records: {} fragments, {} complete pairs, {} secondary/supplementary skipped",
        n_records,
        index.len(),
        index.complete_pair_count(),
        n_skipped
    );

    let mut out = open_output(output)?;
    for (key, record) in index.iter_with_keys() {
        writeln!(
            out,
            "{}\t{}\t{}",
            key,
            format_read(record.first_read()),
            format_read(record.second_read())
        )
        .map_err(|e| anyhow!("Error writing evidence: {}", e))?;
    }
    out.flush()
        .map_err(|e| anyhow!("Error writing evidence: {}", e))?;

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Header {
            somatic,
            output,
            verbosity,
        } => {
            init_logger(verbosity);
            run_header(&somatic, output.as_ref())
        }
        Commands::Evidence {
            sam,
            output,
            verbosity,
        } => {
            init_logger(verbosity);
            run_evidence(&sam, output.as_ref())
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
