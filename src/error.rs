use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a ledger operation is rejected. None of these are fatal: the caller
/// reports the error and keeps accepting commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Already logged in as {0}")]
    AlreadyLoggedIn(String),
    #[error("No customer logged in")]
    NoActiveSession,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Cannot transfer to self")]
    SelfTransfer,
    #[error("Amount too large")]
    AmountOverflow,
}

/// Turns the result of a `checked_*` operation into a ledger error.
pub fn checked(value: Option<Decimal>) -> Result<Decimal, LedgerError> {
    value.ok_or(LedgerError::AmountOverflow)
}
