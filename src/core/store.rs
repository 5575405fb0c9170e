use std::{fmt, hash::Hash};

use hashbrown::HashMap;
use thiserror::Error;
use tracing::warn;

/// Record with a stable identifier.
pub trait Keyed {
    /// Identifier type.
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Borrows the record's identifier.
    fn id(&self) -> &Self::Id;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no record with id {0}")]
    MissingRecord(String),
    #[error("record with id {0} already exists")]
    AlreadyExists(String),
}

/// Ordered, id-indexed record collection owned by one view.
#[derive(Debug, Clone)]
pub struct RecordSet<E: Keyed> {
    records: Vec<E>,
    pos: HashMap<E::Id, usize>,
}

impl<E: Keyed> Default for RecordSet<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            pos: HashMap::new(),
        }
    }
}

impl<E: Keyed> RecordSet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set in input order. Later duplicates of an id are dropped.
    pub fn from_records(records: impl IntoIterator<Item = E>) -> Self {
        let mut set = Self::new();
        for rec in records {
            if let Err(err) = set.insert(rec) {
                warn!(%err, "dropping duplicate record");
            }
        }
        set
    }

    pub fn insert(&mut self, rec: E) -> Result<(), StoreError> {
        if self.pos.contains_key(rec.id()) {
            return Err(StoreError::AlreadyExists(rec.id().to_string()));
        }
        self.pos.insert(rec.id().clone(), self.records.len());
        self.records.push(rec);
        Ok(())
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.pos.get(id).map(|idx| &self.records[*idx])
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.pos.contains_key(id)
    }

    /// Mutates one record in place.
    pub fn update<F>(&mut self, id: &E::Id, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut E),
    {
        let idx = *self
            .pos
            .get(id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        f(&mut self.records[idx]);
        Ok(())
    }

    /// Removes a record, preserving the order of the rest.
    pub fn remove(&mut self, id: &E::Id) -> Result<E, StoreError> {
        let idx = self
            .pos
            .remove(id)
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        let rec = self.records.remove(idx);
        for shifted in &self.records[idx..] {
            if let Some(p) = self.pos.get_mut(shifted.id()) {
                *p -= 1;
            }
        }
        Ok(rec)
    }

    pub fn as_slice(&self) -> &[E] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
