use std::collections::BTreeMap;
use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accounts::{cents, Account};

/// Every account the process has seen, keyed by exact (case-sensitive) name.
/// Accounts are created lazily and never removed.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: BTreeMap<String, Account>,
}

/// One CSV row. Amounts are rounded to the cent and serialize as text.
#[derive(Debug, Serialize)]
pub struct AccountSnapshot<'a> {
    pub name: &'a str,
    pub balance: Decimal,
    pub owed: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get mutable reference to an account, or create a new one if it doesn't exist
    pub fn get_or_create(&mut self, name: &str) -> &mut Account {
        if !self.accounts.contains_key(name) {
            log::debug!("opening account for {}", name);
        }
        self.accounts
            .entry(name.to_string())
            .or_insert_with(|| Account::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Debtors holding a positive debt to `creditor`, in name order.
    pub fn debtors_of(&self, creditor: &str) -> Vec<(String, Decimal)> {
        self.accounts
            .values()
            .filter(|account| account.name != creditor)
            .filter_map(|account| {
                account
                    .owes(creditor)
                    .filter(|amount| *amount > Decimal::ZERO)
                    .map(|amount| (account.name.clone(), amount))
            })
            .collect()
    }

    /// Write every account to `out` in CSV format
    pub fn write_snapshot<W: Write>(&self, out: W) -> Result<(), csv::Error> {
        let mut wtr = Writer::from_writer(out);
        for account in self.accounts() {
            wtr.serialize(AccountSnapshot {
                name: &account.name,
                balance: cents(&account.balance),
                owed: cents(&account.total_owed()),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}
