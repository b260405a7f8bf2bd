// Error types
//
// Integrity errors mark a broken invariant for one unit of work (one
// evidence add, one candidate write). The caller decides whether to skip
// the unit or abort the run; nothing here panics.

use std::fmt;
use std::io;

/// Which read slot of an evidence record an operation targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSlot {
    First,
    Second,
}

impl fmt::Display for ReadSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadSlot::First => write!(f, "first"),
            ReadSlot::Second => write!(f, "second"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    /// Two reads claimed the same fragment and pair-end position
    #[error("fragment {key} already has a {slot} read")]
    SlotAlreadyFilled { key: String, slot: ReadSlot },

    /// A somatic hook ran without per-candidate model scores
    #[error("{operation} requires a model score context but none was supplied")]
    MissingScoreContext { operation: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum VcfWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),
}
