use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::engine::Report;
use crate::error::{checked, LedgerError};
use crate::ledger::Ledger;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Applies session commands to a ledger and settles bilateral debts as money
/// moves. At most one customer is logged in at a time.
pub struct SettlementEngine {
    ledger: Ledger,
    active: Option<String>,
}

impl SettlementEngine {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            active: None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn active_customer(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn active_name(&self) -> Result<String> {
        self.active.clone().ok_or(LedgerError::NoActiveSession)
    }

    /// Bind the session to `name`, opening the account if needed, and report
    /// its balance and debts in both directions.
    pub fn login(&mut self, name: &str) -> Result<Vec<Report>> {
        if let Some(current) = &self.active {
            warn!("login as {} rejected, {} is still logged in", name, current);
            return Err(LedgerError::AlreadyLoggedIn(current.clone()));
        }

        let account = self.ledger.get_or_create(name);
        let mut reports = vec![
            Report::Greeting(account.name.clone()),
            Report::Balance(account.balance),
        ];
        reports.extend(account.owed.iter().map(|(creditor, amount)| Report::OwedTo {
            creditor: creditor.clone(),
            amount: *amount,
        }));
        reports.extend(
            self.ledger
                .debtors_of(name)
                .into_iter()
                .map(|(debtor, amount)| Report::OwedFrom { debtor, amount }),
        );

        info!("{} logged in", name);
        self.active = Some(name.to_string());
        Ok(reports)
    }

    /// Credit `amount`, then pay down every outstanding debt in creditor-name
    /// order. A debt the balance cannot cover is reduced by the whole deposit
    /// and its creditor receives the whole deposit; the entry stays even when
    /// that leaves it at zero or below.
    ///
    /// Every new value is computed before anything is written, so an
    /// overflow leaves the ledger as it was.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Vec<Report>> {
        let name = self.active_name()?;

        let account = self.ledger.get_or_create(&name);
        let mut balance = checked(account.balance.checked_add(amount))?;
        let mut owed = account.owed.clone();
        let mut payouts = Vec::new();
        for (creditor, debt) in &account.owed {
            let paid = if balance >= *debt {
                balance = checked(balance.checked_sub(*debt))?;
                owed.remove(creditor);
                debug!("{} settles {} owed to {}", name, debt, creditor);
                *debt
            } else {
                balance = Decimal::ZERO;
                let remaining = checked(debt.checked_sub(amount))?;
                owed.insert(creditor.clone(), remaining);
                debug!(
                    "{} pays {} towards debt to {}, {} remaining",
                    name, amount, creditor, remaining
                );
                amount
            };
            payouts.push((creditor.clone(), paid));
        }

        let mut credited = Vec::with_capacity(payouts.len());
        for (creditor, paid) in &payouts {
            let current = self
                .ledger
                .get(creditor)
                .map_or(Decimal::ZERO, |account| account.balance);
            credited.push(checked(current.checked_add(*paid))?);
        }

        let mut reports = Vec::new();
        for ((creditor, paid), new_balance) in payouts.into_iter().zip(credited) {
            self.ledger.get_or_create(&creditor).balance = new_balance;
            reports.push(Report::Transferred {
                to: creditor,
                amount: paid,
            });
        }

        let account = self.ledger.get_or_create(&name);
        account.balance = balance;
        account.owed = owed;
        info!("{} deposited {}, balance {}", name, amount, account.balance);
        reports.push(Report::Balance(account.balance));
        reports.extend(account.owed.iter().map(|(creditor, owed)| Report::OwedTo {
            creditor: creditor.clone(),
            amount: *owed,
        }));
        Ok(reports)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Vec<Report>> {
        let name = self.active_name()?;
        let account = self.ledger.get_or_create(&name);
        if !account.withdraw(amount) {
            warn!(
                "{} cannot withdraw {} with balance {}",
                name, amount, account.balance
            );
            return Err(LedgerError::InsufficientFunds);
        }
        info!("{} withdrew {}, balance {}", name, amount, account.balance);
        Ok(vec![Report::Balance(account.balance)])
    }

    /// Move `amount` to `target`. A shortfall becomes debt owed to the target;
    /// a debt the target already owes the sender is netted before any cash
    /// moves.
    pub fn transfer(&mut self, target: &str, amount: Decimal) -> Result<Vec<Report>> {
        let name = self.active_name()?;
        if target == name {
            warn!("{} attempted a transfer to self", name);
            return Err(LedgerError::SelfTransfer);
        }

        let (target_balance, reverse_debt) = self
            .ledger
            .get(target)
            .map_or((Decimal::ZERO, None), |account| {
                (account.balance, account.owes(&name))
            });
        let account = self.ledger.get_or_create(&name);
        let balance = account.balance;

        if amount > balance {
            let shortfall = checked(amount.checked_sub(balance))?;
            let credited = checked(target_balance.checked_add(balance))?;
            let owed = account.add_debt(target, shortfall)?;
            account.balance = Decimal::ZERO;
            self.ledger.get_or_create(target).balance = credited;
            info!(
                "{} sent {} of {} to {}, now owes {}",
                name, balance, amount, target, owed
            );
            return Ok(vec![
                Report::Transferred {
                    to: target.to_string(),
                    amount: balance,
                },
                Report::Balance(Decimal::ZERO),
                Report::OwedTo {
                    creditor: target.to_string(),
                    amount: owed,
                },
            ]);
        }

        match reverse_debt {
            Some(reverse) if reverse > amount => {
                let remaining = checked(reverse.checked_sub(amount))?;
                self.ledger.get_or_create(target).set_debt(&name, remaining);
                info!(
                    "{} netted {} against debt from {}, {} remaining",
                    name, amount, target, remaining
                );
                Ok(vec![
                    Report::Balance(balance),
                    Report::OwedFrom {
                        debtor: target.to_string(),
                        amount: remaining,
                    },
                ])
            }
            Some(reverse) => {
                let excess = checked(amount.checked_sub(reverse))?;
                let new_balance = checked(balance.checked_sub(excess))?;
                account.balance = new_balance;
                self.ledger.get_or_create(target).clear_debt(&name);
                info!(
                    "{} cleared {} owed by {} and paid {}",
                    name, reverse, target, excess
                );
                Ok(vec![Report::Balance(new_balance)])
            }
            None => {
                let new_balance = checked(balance.checked_sub(amount))?;
                self.ledger.get_or_create(target).credit(amount)?;
                self.ledger.get_or_create(&name).balance = new_balance;
                info!("{} transferred {} to {}", name, amount, target);
                Ok(vec![
                    Report::Transferred {
                        to: target.to_string(),
                        amount,
                    },
                    Report::Balance(new_balance),
                ])
            }
        }
    }

    pub fn logout(&mut self) -> Result<Vec<Report>> {
        let name = self.active.take().ok_or(LedgerError::NoActiveSession)?;
        info!("{} logged out", name);
        Ok(vec![Report::Goodbye(name)])
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(Ledger::new())
    }
}
