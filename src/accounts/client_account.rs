use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{checked, LedgerError};

/// Money is shown to the cent, halves rounding away from zero.
pub fn cents(amount: &Decimal) -> Decimal {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

#[derive(Debug, Clone)]
pub struct Account {
    pub name: String,
    pub balance: Decimal,
    /// Creditor name -> amount this account owes them, ordered by creditor.
    pub owed: BTreeMap<String, Decimal>,
}

impl Account {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            balance: Decimal::ZERO,
            owed: BTreeMap::new(),
        }
    }

    /// Adds `amount` to the balance, leaving it untouched on overflow.
    pub fn credit(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.balance = checked(self.balance.checked_add(amount))?;
        Ok(self.balance)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        if self.balance < amount {
            return false;
        }
        self.balance -= amount;
        true
    }

    /// Amount owed to `creditor`, if an entry exists.
    pub fn owes(&self, creditor: &str) -> Option<Decimal> {
        self.owed.get(creditor).copied()
    }

    /// Accumulates onto any existing debt to `creditor`.
    pub fn add_debt(&mut self, creditor: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        let current = self.owes(creditor).unwrap_or(Decimal::ZERO);
        let total = checked(current.checked_add(amount))?;
        self.owed.insert(creditor.to_string(), total);
        Ok(total)
    }

    /// Overwrites the debt to `creditor`. Zero and negative residuals are kept.
    pub fn set_debt(&mut self, creditor: &str, amount: Decimal) {
        self.owed.insert(creditor.to_string(), amount);
    }

    pub fn clear_debt(&mut self, creditor: &str) -> Option<Decimal> {
        self.owed.remove(creditor)
    }

    /// Display-only sum of every entry; saturates instead of overflowing.
    pub fn total_owed(&self) -> Decimal {
        self.owed
            .values()
            .fold(Decimal::ZERO, |total, owed| total.saturating_add(*owed))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn decimal(amount: f64) -> Decimal {
        Decimal::from_f64(amount).unwrap()
    }

    #[test]
    fn test_new_account_is_empty() {
        let acc = Account::new("alice");
        assert_eq!(acc.name, "alice");
        assert_eq!(acc.balance, Decimal::ZERO);
        assert!(acc.owed.is_empty());
    }

    #[test]
    fn test_withdraw() {
        let mut acc = Account::new("alice");
        acc.credit(decimal(100.0)).unwrap();
        assert!(acc.withdraw(decimal(40.0)));
        assert_eq!(acc.balance, decimal(60.0));

        // Withdraw more than balance → no change
        assert!(!acc.withdraw(decimal(100.0)));
        assert_eq!(acc.balance, decimal(60.0));
    }

    #[test]
    fn test_debts_accumulate_and_clear() {
        let mut acc = Account::new("alice");
        assert_eq!(acc.add_debt("bob", decimal(30.0)), Ok(decimal(30.0)));
        assert_eq!(acc.add_debt("bob", decimal(20.0)), Ok(decimal(50.0)));
        acc.add_debt("carol", decimal(5.0)).unwrap();
        assert_eq!(acc.total_owed(), decimal(55.0));

        assert_eq!(acc.clear_debt("bob"), Some(decimal(50.0)));
        assert_eq!(acc.owes("bob"), None);
        assert_eq!(acc.owes("carol"), Some(decimal(5.0)));
    }

    #[test]
    fn test_set_debt_keeps_non_positive_entry() {
        let mut acc = Account::new("alice");
        acc.set_debt("bob", decimal(-5.0));
        assert_eq!(acc.owes("bob"), Some(decimal(-5.0)));
        acc.set_debt("bob", Decimal::ZERO);
        assert_eq!(acc.owes("bob"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_overflow_leaves_account_unchanged() {
        let mut acc = Account::new("alice");
        acc.credit(Decimal::MAX).unwrap();
        assert_eq!(acc.credit(Decimal::ONE), Err(LedgerError::AmountOverflow));
        assert_eq!(acc.balance, Decimal::MAX);

        acc.add_debt("bob", Decimal::MAX).unwrap();
        assert_eq!(acc.add_debt("bob", Decimal::ONE), Err(LedgerError::AmountOverflow));
        assert_eq!(acc.owes("bob"), Some(Decimal::MAX));

        acc.add_debt("carol", Decimal::ONE).unwrap();
        assert_eq!(acc.total_owed(), Decimal::MAX);
    }
}
