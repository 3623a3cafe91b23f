pub mod ledger;
pub mod transfer;

pub use ledger::{AccountLedger, TransferError};
pub use transfer::{TransferEngine, TransferOutcome};
