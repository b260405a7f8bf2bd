// Evidence record: the two reads of one fragment
//
// A slot is filled at most once. Upstream data is expected to contribute
// one first read and one second read per fragment; a second fill of the
// same slot is reported as an integrity error by the index.

use super::key::EvidenceKey;
use crate::error::ReadSlot;

/// A read record that can be grouped by fragment
pub trait FragmentRead: Clone {
    /// Query name shared by both reads of the fragment
    fn fragment_name(&self) -> &[u8];

    /// Pair-end discriminator: 1 for the first read, 2 for the second
    fn read_number(&self) -> u8;

    fn evidence_key(&self) -> EvidenceKey {
        EvidenceKey::new(self.fragment_name())
    }

    /// Slot this read belongs in. Anything other than 2 is a first read.
    fn read_slot(&self) -> ReadSlot {
        if self.read_number() == 2 {
            ReadSlot::Second
        } else {
            ReadSlot::First
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceRecord<R> {
    first_read: Option<R>,
    second_read: Option<R>,
}

impl<R> Default for EvidenceRecord<R> {
    fn default() -> Self {
        Self {
            first_read: None,
            second_read: None,
        }
    }
}

impl<R> EvidenceRecord<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_read(&self) -> Option<&R> {
        self.first_read.as_ref()
    }

    pub fn second_read(&self) -> Option<&R> {
        self.second_read.as_ref()
    }

    pub fn slot(&self, slot: ReadSlot) -> Option<&R> {
        match slot {
            ReadSlot::First => self.first_read.as_ref(),
            ReadSlot::Second => self.second_read.as_ref(),
        }
    }

    pub fn is_set(&self, slot: ReadSlot) -> bool {
        self.slot(slot).is_some()
    }

    /// Both reads of the fragment are present
    pub fn is_complete(&self) -> bool {
        self.first_read.is_some() && self.second_read.is_some()
    }

    /// Fill an empty slot. Returns the read back if the slot was taken.
    pub(crate) fn try_fill(&mut self, slot: ReadSlot, read: R) -> Result<(), R> {
        let target = match slot {
            ReadSlot::First => &mut self.first_read,
            ReadSlot::Second => &mut self.second_read,
        };
        if target.is_some() {
            return Err(read);
        }
        *target = Some(read);
        Ok(())
    }
}
