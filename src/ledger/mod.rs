pub mod ledger;

pub use ledger::{AccountSnapshot, Ledger};
