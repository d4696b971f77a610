pub mod client_account;

pub use client_account::{cents, Account};
