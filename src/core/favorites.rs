//! Favorite payment templates

use crate::core::ledger::Ledger;
use crate::types::{Favorite, LedgerError, Payment};
use tracing::debug;

impl Ledger {
    /// Save a payment as a named, reusable template
    ///
    /// The favorite copies the payment's account, amount and category.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` if the payment does not exist.
    pub fn favorite_payment(&mut self, payment_id: &str, name: &str) -> Result<Favorite, LedgerError> {
        let payment = self.find_payment_by_id(payment_id)?;

        let favorite = Favorite {
            id: self.ids.next_token(),
            account_id: payment.account_id,
            name: name.to_string(),
            amount: payment.amount,
            category: payment.category.clone(),
        };

        debug!(favorite_id = %favorite.id, payment_id, name, "saved favorite");
        Ok(self.favorites.insert(favorite).clone())
    }

    /// Look up a favorite by ID
    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<&Favorite, LedgerError> {
        self.favorites
            .get(favorite_id)
            .ok_or_else(|| LedgerError::favorite_not_found(favorite_id))
    }

    /// Create a new payment from a favorite's stored account, amount and category
    ///
    /// # Errors
    ///
    /// Returns `FavoriteNotFound`, or any error `pay` can return.
    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<Payment, LedgerError> {
        let favorite = self.find_favorite_by_id(favorite_id)?;
        let (account_id, amount, category) =
            (favorite.account_id, favorite.amount, favorite.category.clone());

        debug!(favorite_id, "paying from favorite");
        self.pay(account_id, amount, &category)
    }
}
