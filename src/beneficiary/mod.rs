use log::{info, warn};
use thiserror::Error;

use crate::store::models::{Beneficiary, InternalAccount, TransferTarget};
use crate::store::StateStore;

/// Beneficiary management errors
#[derive(Debug, Error, PartialEq)]
pub enum BeneficiaryError {
    #[error("Beneficiary name is required")]
    MissingName,

    #[error("Account number is required")]
    MissingAccount,

    #[error("Removal requires confirmation")]
    NotConfirmed,

    #[error("No such beneficiary: {0}")]
    NotFound(String),
}

/// One entry of the transfer destination selector
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOption {
    pub label: String,
    pub target: TransferTarget,
}

/// Ordered list of named external payees. The registry exclusively owns the
/// list; every entry carries a stable id assigned at creation, so a selection
/// stays valid across later additions and removals.
pub struct BeneficiaryRegistry<'a> {
    store: &'a dyn StateStore,
}

impl<'a> BeneficiaryRegistry<'a> {
    pub fn new(store: &'a dyn StateStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Beneficiary> {
        self.store.load_beneficiaries()
    }

    /// Append a new payee. Both fields are required.
    pub fn add(&self, name: &str, account: &str) -> Result<Beneficiary, BeneficiaryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BeneficiaryError::MissingName);
        }
        let account = account.trim();
        if account.is_empty() {
            return Err(BeneficiaryError::MissingAccount);
        }

        let mut beneficiaries = self.list();
        let beneficiary = Beneficiary::new(name.to_string(), account.to_string());
        beneficiaries.push(beneficiary.clone());

        if let Err(e) = self.store.save_beneficiaries(&beneficiaries) {
            warn!("Could not persist the beneficiary list: {}", e);
        }

        info!("Beneficiary added: {} ({})", beneficiary.name, beneficiary.id);
        Ok(beneficiary)
    }

    /// Remove exactly the targeted entry. The caller must pass an explicit
    /// confirmation, the analogue of the original confirm dialog.
    pub fn remove(&self, id: &str, confirmed: bool) -> Result<Beneficiary, BeneficiaryError> {
        if !confirmed {
            return Err(BeneficiaryError::NotConfirmed);
        }

        let mut beneficiaries = self.list();
        let position = beneficiaries
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BeneficiaryError::NotFound(id.to_string()))?;
        let removed = beneficiaries.remove(position);

        if let Err(e) = self.store.save_beneficiaries(&beneficiaries) {
            warn!("Could not persist the beneficiary list: {}", e);
        }

        info!("Beneficiary removed: {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// The destination selector entries consumed by the transfer form: the
    /// internal checking account first, then every beneficiary in list order.
    pub fn transfer_targets(&self) -> Vec<TransferOption> {
        let mut options = vec![TransferOption {
            label: "My Checking Account".to_string(),
            target: TransferTarget::Internal(InternalAccount::Checking),
        }];

        for beneficiary in self.list() {
            options.push(TransferOption {
                label: format!("{} - {}", beneficiary.name, beneficiary.account),
                target: TransferTarget::Beneficiary(beneficiary.id),
            });
        }

        options
    }
}
