use chrono::Utc;
use log::{info, warn};
use thiserror::Error;

use crate::store::models::{Balances, InternalAccount, Transaction, TransferTarget};
use crate::store::StateStore;

/// Transfer processing errors. Every failure aborts the operation before any
/// state change; there are no partial effects.
#[derive(Debug, Error, PartialEq)]
pub enum TransferError {
    /// Amount is missing, non-numeric, non-finite, or not strictly positive
    #[error("Please enter a valid amount")]
    InvalidAmount,

    /// Source balance is less than the requested amount
    #[error("Insufficient funds in {} account", .0.display_name())]
    InsufficientFunds(InternalAccount),

    /// Source is not one of the internal accounts
    #[error("Unknown source account: {0}")]
    UnknownSource(String),

    /// Destination is neither an internal account nor a beneficiary target
    #[error("Unknown transfer destination: {0}")]
    UnknownTarget(String),
}

/// The two named balances plus the sequential transaction log.
pub struct AccountLedger<'a> {
    store: &'a dyn StateStore,
}

impl<'a> AccountLedger<'a> {
    pub fn new(store: &'a dyn StateStore) -> Self {
        Self { store }
    }

    /// Current balances, or the defaults when nothing usable is stored
    pub fn balances(&self) -> Balances {
        self.store.load_balances()
    }

    /// The full transaction log in append (chronological) order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.store.load_transactions()
    }

    /// Validate and apply a transfer: debit the source, credit the
    /// destination when it is an internal account, and append one completed
    /// ledger entry dated today. A transfer to an external beneficiary only
    /// records the debit; there is no counterpart account to credit.
    pub fn apply_transfer(
        &self,
        from: InternalAccount,
        to: &TransferTarget,
        amount: f64,
    ) -> Result<Transaction, TransferError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(TransferError::InvalidAmount);
        }

        let mut balances = self.balances();
        if balances.get(from) < amount {
            return Err(TransferError::InsufficientFunds(from));
        }

        *balances.get_mut(from) -= amount;
        if let TransferTarget::Internal(dest) = to {
            *balances.get_mut(*dest) += amount;
        }

        if let Err(e) = self.store.save_balances(&balances) {
            warn!("Could not persist balances: {}", e);
        }

        let transaction = Transaction::transfer(
            Utc::now().date_naive(),
            format!("From {} to {}", from, to),
            -amount.abs(),
        );

        let mut transactions = self.transactions();
        transactions.push(transaction.clone());
        if let Err(e) = self.store.save_transactions(&transactions) {
            warn!("Could not persist the transaction log: {}", e);
        }

        info!("Transfer of {:.2} from {} to {} completed", amount, from, to);
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{TransactionStatus, TransactionType};
    use crate::store::JsonFileStore;
    use rstest::rstest;
    use tempfile::TempDir;

    fn setup_ledger() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_default_balances() {
        let (store, _temp_dir) = setup_ledger();
        let ledger = AccountLedger::new(&store);

        let balances = ledger.balances();
        assert_eq!(balances.savings, 5450.75);
        assert_eq!(balances.checking, 1200.00);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_internal_transfer_scenario() {
        let (store, _temp_dir) = setup_ledger();
        let ledger = AccountLedger::new(&store);

        let transaction = ledger
            .apply_transfer(
                InternalAccount::Savings,
                &TransferTarget::Internal(InternalAccount::Checking),
                100.00,
            )
            .unwrap();

        let balances = ledger.balances();
        assert_eq!(balances.savings, 5350.75);
        assert_eq!(balances.checking, 1300.00);

        assert_eq!(transaction.amount, -100.00);
        assert_eq!(transaction.status, TransactionStatus::Completed);
        assert_eq!(transaction.transaction_type, TransactionType::Transfer);
        assert_eq!(transaction.description, "From savings to checking");
        assert_eq!(ledger.transactions(), vec![transaction]);
    }

    #[rstest]
    #[case(InternalAccount::Savings, InternalAccount::Checking, 250.25)]
    #[case(InternalAccount::Checking, InternalAccount::Savings, 1200.00)]
    fn test_internal_transfer_conserves_total(
        #[case] from: InternalAccount,
        #[case] to: InternalAccount,
        #[case] amount: f64,
    ) {
        let (store, _temp_dir) = setup_ledger();
        let ledger = AccountLedger::new(&store);

        let before = ledger.balances();
        ledger
            .apply_transfer(from, &TransferTarget::Internal(to), amount)
            .unwrap();
        let after = ledger.balances();

        assert!((before.total() - after.total()).abs() < 1e-9);
        assert!((before.get(from) - amount - after.get(from)).abs() < 1e-9);
        assert!((before.get(to) + amount - after.get(to)).abs() < 1e-9);
    }

    #[test]
    fn test_beneficiary_transfer_debits_only() {
        let (store, _temp_dir) = setup_ledger();
        let ledger = AccountLedger::new(&store);

        // Pinned behavior: the external destination receives no credit,
        // only the debit is recorded.
        ledger
            .apply_transfer(
                InternalAccount::Savings,
                &TransferTarget::Beneficiary("b-1".to_string()),
                100.00,
            )
            .unwrap();

        let balances = ledger.balances();
        assert_eq!(balances.savings, 5350.75);
        assert_eq!(balances.checking, 1200.00);

        let transactions = ledger.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].description, "From savings to beneficiary:b-1");
    }

    #[test]
    fn test_insufficient_funds_leaves_state_unchanged() {
        let (store, _temp_dir) = setup_ledger();
        let ledger = AccountLedger::new(&store);

        let result = ledger.apply_transfer(
            InternalAccount::Checking,
            &TransferTarget::Internal(InternalAccount::Savings),
            1200.01,
        );
        assert_eq!(
            result,
            Err(TransferError::InsufficientFunds(InternalAccount::Checking))
        );

        assert_eq!(ledger.balances(), Balances::default());
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_exact_balance_is_sufficient() {
        let (store, _temp_dir) = setup_ledger();
        let ledger = AccountLedger::new(&store);

        ledger
            .apply_transfer(
                InternalAccount::Checking,
                &TransferTarget::Internal(InternalAccount::Savings),
                1200.00,
            )
            .unwrap();

        let balances = ledger.balances();
        assert_eq!(balances.checking, 0.0);
        assert_eq!(balances.savings, 6650.75);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-25.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_invalid_amounts_rejected(#[case] amount: f64) {
        let (store, _temp_dir) = setup_ledger();
        let ledger = AccountLedger::new(&store);

        let result = ledger.apply_transfer(
            InternalAccount::Savings,
            &TransferTarget::Internal(InternalAccount::Checking),
            amount,
        );
        assert_eq!(result, Err(TransferError::InvalidAmount));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_log_is_append_only_in_order() {
        let (store, _temp_dir) = setup_ledger();
        let ledger = AccountLedger::new(&store);

        for amount in [10.0, 20.0, 30.0] {
            ledger
                .apply_transfer(
                    InternalAccount::Savings,
                    &TransferTarget::Internal(InternalAccount::Checking),
                    amount,
                )
                .unwrap();
        }

        let amounts: Vec<f64> = ledger.transactions().iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![-10.0, -20.0, -30.0]);
    }
}
