//! Payment processing
//!
//! Creates, looks up, reverses and repeats payments against the account
//! registry. Every payment debits its account at creation (no funds check),
//! and a rejection credits the amount back.

use crate::core::ledger::Ledger;
use crate::types::{AccountId, LedgerError, Money, Payment, PaymentStatus};
use tracing::debug;

impl Ledger {
    /// Create a payment and debit the account immediately
    ///
    /// The balance may go negative. The new payment starts `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - The account does not exist
    /// - The balance would overflow
    pub fn pay(
        &mut self,
        account_id: AccountId,
        amount: Money,
        category: &str,
    ) -> Result<Payment, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::amount_must_be_positive(amount));
        }

        let payment = Payment {
            id: self.ids.next_token(),
            account_id,
            amount,
            category: category.to_string(),
            status: PaymentStatus::InProgress,
        };
        self.record_payment(payment)
    }

    /// Look up a payment by ID
    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<&Payment, LedgerError> {
        self.payments
            .get(payment_id)
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))
    }

    /// Reverse a payment: mark it `Fail` and credit its amount back
    ///
    /// Rejecting a payment that is already `Fail` is a no-op, so the amount is
    /// never credited twice.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payment does not exist
    /// - Its account does not exist
    /// - The balance would overflow
    pub fn reject(&mut self, payment_id: &str) -> Result<(), LedgerError> {
        let payment = self.find_payment_by_id(payment_id)?;
        let (account_id, amount, status) = (payment.account_id, payment.amount, payment.status);

        self.accounts.get(account_id)?;

        if status == PaymentStatus::Fail {
            debug!(payment_id, "payment already rejected");
            return Ok(());
        }

        let balance = self.accounts.credit(account_id, amount, "reject")?;
        if let Some(payment) = self.payments.get_mut(payment_id) {
            payment.status = PaymentStatus::Fail;
        }

        debug!(payment_id, account_id, amount, balance, "rejected payment");
        Ok(())
    }

    /// Repeat a payment under a fresh ID
    ///
    /// Copies account, amount, category and current status, then debits the
    /// account again by the same amount.
    ///
    /// Repeating a `Fail` payment yields a new `Fail` payment that is still
    /// debited. Since `reject` skips payments already in `Fail`, that debit
    /// cannot be credited back through `reject`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payment does not exist
    /// - Its account does not exist
    /// - The balance would overflow
    pub fn repeat(&mut self, payment_id: &str) -> Result<Payment, LedgerError> {
        let source = self.find_payment_by_id(payment_id)?;

        let payment = Payment {
            id: self.ids.next_token(),
            account_id: source.account_id,
            amount: source.amount,
            category: source.category.clone(),
            status: source.status,
        };
        debug!(source = payment_id, "repeating payment");
        self.record_payment(payment)
    }

    /// Debit the payment's account and append the payment
    ///
    /// Shared by direct payments, repeats and favorites. Nothing is appended
    /// if the debit fails.
    pub(crate) fn record_payment(&mut self, payment: Payment) -> Result<Payment, LedgerError> {
        let balance = self
            .accounts
            .debit(payment.account_id, payment.amount, "pay")?;

        debug!(
            payment_id = %payment.id,
            account_id = payment.account_id,
            amount = payment.amount,
            balance,
            "recorded payment"
        );
        Ok(self.payments.insert(payment).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ledger_with_balance(balance: Money) -> (Ledger, AccountId) {
        let mut ledger = Ledger::new();
        let account = ledger.register_account("+992000000001").unwrap();
        if balance > 0 {
            ledger.deposit(account.id, balance).unwrap();
        }
        (ledger, account.id)
    }

    #[test]
    fn test_pay_debits_without_funds_check() {
        let (mut ledger, account_id) = ledger_with_balance(10);

        let payment = ledger.pay(account_id, 20, "auto").unwrap();

        assert_eq!(payment.status, PaymentStatus::InProgress);
        assert_eq!(payment.account_id, account_id);
        assert_eq!(payment.amount, 20);
        assert_eq!(payment.category, "auto");
        assert_eq!(ledger.find_account_by_id(account_id).unwrap().balance, -10);
        assert_eq!(ledger.payments().len(), 1);
    }

    #[test]
    fn test_pay_missing_account_leaves_ledger_unchanged() {
        let (mut ledger, _) = ledger_with_balance(10);

        let result = ledger.pay(99, 5, "auto");

        assert_eq!(result.unwrap_err(), LedgerError::account_not_found(99));
        assert!(ledger.payments().is_empty());
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-1)]
    fn test_pay_rejects_non_positive_amount(#[case] amount: Money) {
        let (mut ledger, account_id) = ledger_with_balance(10);

        let result = ledger.pay(account_id, amount, "auto");

        assert_eq!(result.unwrap_err(), LedgerError::amount_must_be_positive(amount));
        assert_eq!(ledger.find_account_by_id(account_id).unwrap().balance, 10);
    }

    #[test]
    fn test_find_payment_by_id() {
        let (mut ledger, account_id) = ledger_with_balance(100);
        let payment = ledger.pay(account_id, 10, "auto").unwrap();

        assert_eq!(ledger.find_payment_by_id(&payment.id).unwrap(), &payment);
        assert_eq!(
            ledger.find_payment_by_id("missing").unwrap_err(),
            LedgerError::payment_not_found("missing")
        );
    }

    #[test]
    fn test_reject_credits_and_fails_payment() {
        let (mut ledger, account_id) = ledger_with_balance(10);
        let payment = ledger.pay(account_id, 20, "auto").unwrap();
        ledger.deposit(account_id, 20).unwrap();

        ledger.reject(&payment.id).unwrap();

        assert_eq!(ledger.find_account_by_id(account_id).unwrap().balance, 30);
        assert_eq!(
            ledger.find_payment_by_id(&payment.id).unwrap().status,
            PaymentStatus::Fail
        );
    }

    #[test]
    fn test_reject_twice_credits_once() {
        let (mut ledger, account_id) = ledger_with_balance(100);
        let payment = ledger.pay(account_id, 40, "auto").unwrap();

        ledger.reject(&payment.id).unwrap();
        ledger.reject(&payment.id).unwrap();

        assert_eq!(ledger.find_account_by_id(account_id).unwrap().balance, 100);
    }

    #[test]
    fn test_reject_missing_payment() {
        let (mut ledger, _) = ledger_with_balance(0);

        assert_eq!(
            ledger.reject("nope").unwrap_err(),
            LedgerError::payment_not_found("nope")
        );
    }

    #[test]
    fn test_reject_payment_of_unknown_account() {
        let mut ledger = Ledger::new();
        ledger.merge_payment(Payment {
            id: "orphan".to_string(),
            account_id: 5,
            amount: 10,
            category: "auto".to_string(),
            status: PaymentStatus::InProgress,
        });

        assert_eq!(
            ledger.reject("orphan").unwrap_err(),
            LedgerError::account_not_found(5)
        );
        assert_eq!(
            ledger.find_payment_by_id("orphan").unwrap().status,
            PaymentStatus::InProgress
        );
    }

    #[test]
    fn test_repeat_creates_new_payment_and_debits_again() {
        let (mut ledger, account_id) = ledger_with_balance(100);
        let original = ledger.pay(account_id, 30, "food").unwrap();

        let repeated = ledger.repeat(&original.id).unwrap();

        assert_ne!(repeated.id, original.id);
        assert_eq!(repeated.account_id, original.account_id);
        assert_eq!(repeated.amount, original.amount);
        assert_eq!(repeated.category, original.category);
        assert_eq!(ledger.payments().len(), 2);
        assert_eq!(ledger.find_account_by_id(account_id).unwrap().balance, 40);
    }

    #[test]
    fn test_repeat_copies_current_status() {
        let (mut ledger, account_id) = ledger_with_balance(100);
        let original = ledger.pay(account_id, 30, "food").unwrap();
        ledger.reject(&original.id).unwrap();

        let repeated = ledger.repeat(&original.id).unwrap();

        assert_eq!(repeated.status, PaymentStatus::Fail);
        assert_eq!(ledger.find_account_by_id(account_id).unwrap().balance, 70);

        // Already failed, so rejecting the copy credits nothing
        ledger.reject(&repeated.id).unwrap();
        assert_eq!(ledger.find_account_by_id(account_id).unwrap().balance, 70);
    }

    #[test]
    fn test_repeat_missing_payment() {
        let (mut ledger, _) = ledger_with_balance(0);

        assert_eq!(
            ledger.repeat("missing").unwrap_err(),
            LedgerError::payment_not_found("missing")
        );
        assert!(ledger.payments().is_empty());
    }
}
