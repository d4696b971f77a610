pub mod accounts;
pub mod commands;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod orchestrator;

pub use accounts::Account;
pub use commands::{Command, CommandError};
pub use engine::{Report, SettlementEngine};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use orchestrator::run;
