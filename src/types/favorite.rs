//! Saved payment templates

use super::account::{AccountId, Money};
use serde::{Deserialize, Serialize};

/// Opaque favorite identifier
pub type FavoriteId = String;

/// A reusable payment template
///
/// Snapshots the account, amount and category of a payment at the moment it
/// was favorited. Later changes to the source payment are not reflected here.
///
/// Field order matches the dump line format `id|accountID|name|amount|category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub account_id: AccountId,
    pub name: String,
    pub amount: Money,
    pub category: String,
}
