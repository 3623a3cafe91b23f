use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;
use std::fmt;

/// Registered user. Stored verbatim, password included: this is a local
/// simulation, not real authentication.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub name: String,
    /// Unique, compared case-insensitively, stored lowercased
    pub email: String,
    pub password: String,
    pub phone: String,
    #[serde(rename = "accountType")]
    pub account_type: String,
}

/// Internal account
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InternalAccount {
    Savings,
    Checking,
}

impl InternalAccount {
    pub fn as_str(&self) -> &str {
        match self {
            InternalAccount::Savings => "savings",
            InternalAccount::Checking => "checking",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "savings" => Ok(InternalAccount::Savings),
            "checking" => Ok(InternalAccount::Checking),
            _ => Err(format!("Invalid account: {}", s)),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            InternalAccount::Savings => "Savings",
            InternalAccount::Checking => "Checking",
        }
    }
}

impl fmt::Display for InternalAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two ledger balances
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Balances {
    pub savings: f64,
    pub checking: f64,
}

impl Default for Balances {
    fn default() -> Self {
        Self {
            savings: 5450.75,
            checking: 1200.00,
        }
    }
}

impl Balances {
    pub fn get(&self, account: InternalAccount) -> f64 {
        match account {
            InternalAccount::Savings => self.savings,
            InternalAccount::Checking => self.checking,
        }
    }

    pub fn get_mut(&mut self, account: InternalAccount) -> &mut f64 {
        match account {
            InternalAccount::Savings => &mut self.savings,
            InternalAccount::Checking => &mut self.checking,
        }
    }

    pub fn total(&self) -> f64 {
        self.savings + self.checking
    }
}

/// Transaction type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum TransactionType {
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Transfer => "Transfer",
        }
    }
}

/// Transaction status
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Failed => "Failed",
        }
    }
}

/// Ledger entry. The log is append-only; insertion order is chronological
/// order. Negative amounts are debits.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: f64,
    pub status: TransactionStatus,
}

impl Transaction {
    /// A completed transfer entry dated `date`
    pub fn transfer(date: NaiveDate, description: String, amount: f64) -> Self {
        Self {
            date,
            transaction_type: TransactionType::Transfer,
            description,
            amount,
            status: TransactionStatus::Completed,
        }
    }
}

/// External payee. The id is assigned at creation and stays stable across
/// later additions and removals.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Beneficiary {
    pub id: String,
    pub name: String,
    pub account: String,
}

impl Beneficiary {
    pub fn new(name: String, account: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            account,
        }
    }
}

/// A transfer destination: one of the internal accounts, or an external
/// beneficiary identified by its stable id. Beneficiary targets use the
/// `beneficiary:<id>` selector syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferTarget {
    Internal(InternalAccount),
    Beneficiary(String),
}

impl TransferTarget {
    pub fn from_str(s: &str) -> Result<Self, String> {
        if let Some(id) = s.strip_prefix("beneficiary:") {
            if id.is_empty() {
                return Err("Missing beneficiary id".to_string());
            }
            return Ok(TransferTarget::Beneficiary(id.to_string()));
        }
        InternalAccount::from_str(s).map(TransferTarget::Internal)
    }
}

impl fmt::Display for TransferTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferTarget::Internal(account) => write!(f, "{}", account.as_str()),
            TransferTarget::Beneficiary(id) => write!(f, "beneficiary:{}", id),
        }
    }
}
