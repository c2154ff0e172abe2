//! Ordered, ID-indexed record storage
//!
//! This module provides the RecordStore component backing every ledger
//! collection. Records are kept in a `Vec` so exports walk them in insertion
//! order, with a `HashMap` from key to position for O(1) lookup.
//!
//! # Merge Semantics
//!
//! `upsert` replaces a record in place when its key is already present and
//! appends it otherwise. Records are never removed, so positions stay valid
//! for the lifetime of the store.

use crate::core::traits::Keyed;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Outcome of merging a record into a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// No record had the key; the new one was appended
    Inserted,
    /// A record with the key existed and was overwritten in place
    Replaced,
}

/// Insertion-ordered store of keyed records
#[derive(Debug, Clone)]
pub struct RecordStore<T: Keyed> {
    /// Records in insertion order
    records: Vec<T>,
    /// Map of record key to position in `records`
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> RecordStore<T> {
    /// Create a new empty store
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append a record whose key is known to be fresh
    ///
    /// Falls back to replace-in-place if the key turns out to be present, so
    /// the index never points at two records.
    pub fn insert(&mut self, record: T) -> &mut T {
        let position = match self.index.get(record.key()) {
            Some(&position) => {
                self.records[position] = record;
                position
            }
            None => {
                let position = self.records.len();
                self.index.insert(record.key().clone(), position);
                self.records.push(record);
                position
            }
        };
        &mut self.records[position]
    }

    /// Replace the record with the same key, or append it
    pub fn upsert(&mut self, record: T) -> Upsert {
        match self.index.get(record.key()) {
            Some(&position) => {
                self.records[position] = record;
                Upsert::Replaced
            }
            None => {
                self.insert(record);
                Upsert::Inserted
            }
        }
    }

    /// Get a record by key
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&position| &self.records[position])
    }

    /// Get a mutable reference to a record by key
    ///
    /// Callers must not change the record's key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut T>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&position) => Some(&mut self.records[position]),
            None => None,
        }
    }

    /// Whether a record with the key exists
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// All records in insertion order
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Keyed> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
