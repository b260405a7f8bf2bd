// Evidence index
//
// Groups reads into per-fragment evidence records. Records live in an
// append-only arena next to the key they were created for; the key map
// stores handles into it. Nothing is ever
// removed, so a handle stays valid for the life of the index and the
// arena order is the order in which fragments were first seen.

use std::collections::HashMap;

use super::key::EvidenceKey;
use super::record::{EvidenceRecord, FragmentRead};
use crate::error::IntegrityError;

/// Stable reference to a record inside an `EvidenceIndex`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvidenceHandle(usize);

impl EvidenceHandle {
    pub fn position(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct EvidenceIndex<R> {
    records: Vec<(EvidenceKey, EvidenceRecord<R>)>,
    handles: HashMap<EvidenceKey, EvidenceHandle>,
}

impl<R> Default for EvidenceIndex<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            handles: HashMap::new(),
        }
    }
}

impl<R> EvidenceIndex<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `key`, creating an empty record on first reference
    pub fn handle_of_or_create(&mut self, key: EvidenceKey) -> EvidenceHandle {
        if let Some(&handle) = self.handles.get(&key) {
            return handle;
        }
        let handle = EvidenceHandle(self.records.len());
        self.records.push((key.clone(), EvidenceRecord::new()));
        self.handles.insert(key, handle);
        handle
    }

    /// Record for `key`, creating an empty one on first reference.
    ///
    /// This is the only insertion path, so a key never owns more than one
    /// record no matter which of its reads arrives first.
    pub fn get_or_create(&mut self, key: EvidenceKey) -> &mut EvidenceRecord<R> {
        let handle = self.handle_of_or_create(key);
        &mut self.records[handle.0].1
    }

    pub fn handle_of(&self, key: &EvidenceKey) -> Option<EvidenceHandle> {
        self.handles.get(key).copied()
    }

    pub fn get(&self, handle: EvidenceHandle) -> &EvidenceRecord<R> {
        &self.records[handle.0].1
    }

    pub fn get_mut(&mut self, handle: EvidenceHandle) -> &mut EvidenceRecord<R> {
        &mut self.records[handle.0].1
    }

    pub fn key_of(&self, handle: EvidenceHandle) -> &EvidenceKey {
        &self.records[handle.0].0
    }

    pub fn get_by_key(&self, key: &EvidenceKey) -> Option<&EvidenceRecord<R>> {
        self.handle_of(key).map(|h| self.get(h))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &EvidenceRecord<R>> {
        self.records.iter().map(|(_, record)| record)
    }

    /// Records with their keys in first-seen order, empty records included
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (&EvidenceKey, &EvidenceRecord<R>)> {
        self.records.iter().map(|(key, record)| (key, record))
    }

    /// Number of fragments with both reads present
    pub fn complete_pair_count(&self) -> usize {
        self.iter().filter(|r| r.is_complete()).count()
    }
}

impl<R: FragmentRead> EvidenceIndex<R> {
    /// Store an owned copy of `read` in its fragment's record.
    ///
    /// Fails if the target slot is already filled; the index is left
    /// unchanged apart from possibly creating the (empty) record.
    pub fn add(&mut self, read: &R) -> Result<EvidenceHandle, IntegrityError> {
        let key = read.evidence_key();
        let slot = read.read_slot();
        let handle = self.handle_of_or_create(key);

        if self.records[handle.0].1.try_fill(slot, read.clone()).is_err() {
            let key = self.key_of(handle).to_string();
            log::debug!("Duplicate {} read for fragment {}", slot, key);
            return Err(IntegrityError::SlotAlreadyFilled { key, slot });
        }
        Ok(handle)
    }
}
