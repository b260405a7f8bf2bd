pub mod defaults;
pub mod error; // Integrity and write error types
pub mod evidence; // Fragment evidence grouping (EvidenceIndex)
pub mod io; // SAM input
pub mod somatic_opt;
pub mod sv; // Scored SV candidate inputs
pub mod vcf; // Somatic SV VCF output

pub use error::{IntegrityError, ReadSlot, VcfWriteError};
