//! Core traits for keyed ledger records
//!
//! Accounts, payments and favorites are all stored in insertion order and
//! looked up by their own identifier. This trait lets a single ordered store
//! serve all three.

use crate::types::{Account, AccountId, Favorite, Payment};
use std::hash::Hash;

/// A record that carries its own unique key
pub trait Keyed {
    /// Identifier type of the record
    type Key: Eq + Hash + Clone;

    /// The record's identifier
    fn key(&self) -> &Self::Key;
}

impl Keyed for Account {
    type Key = AccountId;

    fn key(&self) -> &AccountId {
        &self.id
    }
}

impl Keyed for Payment {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}

impl Keyed for Favorite {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}
