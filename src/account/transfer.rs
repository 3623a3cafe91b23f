use log::debug;

use crate::store::models::{Balances, InternalAccount, Transaction, TransferTarget};
use crate::store::StateStore;

use super::ledger::{AccountLedger, TransferError};

/// Everything the dashboard re-renders after a committed transfer. Balances
/// and history are reloaded from the store rather than taken from the
/// in-memory copy, so what is shown is what was actually persisted.
#[derive(Debug)]
pub struct TransferOutcome {
    pub transaction: Transaction,
    pub balances: Balances,
    pub transactions: Vec<Transaction>,
}

/// Single-shot validate-then-commit handler for a transfer form submission.
/// Holds no state of its own; any failure aborts with nothing applied.
pub struct TransferEngine<'a> {
    store: &'a dyn StateStore,
}

impl<'a> TransferEngine<'a> {
    pub fn new(store: &'a dyn StateStore) -> Self {
        Self { store }
    }

    /// Validate the raw form fields and commit the transfer.
    pub fn submit(
        &self,
        from: &str,
        to: &str,
        raw_amount: &str,
    ) -> Result<TransferOutcome, TransferError> {
        let amount: f64 = raw_amount
            .trim()
            .parse()
            .map_err(|_| TransferError::InvalidAmount)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(TransferError::InvalidAmount);
        }

        let from = InternalAccount::from_str(from)
            .map_err(|_| TransferError::UnknownSource(from.to_string()))?;
        let to = TransferTarget::from_str(to)
            .map_err(|_| TransferError::UnknownTarget(to.to_string()))?;

        debug!("Submitting transfer of {:.2} from {} to {}", amount, from, to);

        let ledger = AccountLedger::new(self.store);
        let transaction = ledger.apply_transfer(from, &to, amount)?;

        Ok(TransferOutcome {
            transaction,
            balances: ledger.balances(),
            transactions: ledger.transactions(),
        })
    }
}
