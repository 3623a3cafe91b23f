pub mod account;
pub mod beneficiary;
pub mod cli;
pub mod config;
pub mod session;
pub mod store;
pub mod user;
