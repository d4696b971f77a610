use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Deposit(Decimal),
    Withdraw(Decimal),
    Transfer { target: String, amount: Decimal },
    Logout,
}

/// Input rejected before it reaches the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Unknown command")]
    Unknown,
}

fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| CommandError::InvalidAmount)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CommandError::InvalidAmount);
    }
    Ok(amount)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((name, args)) = parts.split_first() else {
            return Err(CommandError::Unknown);
        };

        match *name {
            "login" => match args {
                [customer] => Ok(Command::Login(customer.to_string())),
                _ => Err(CommandError::Usage("login [name]")),
            },
            "deposit" => match args {
                [amount] => Ok(Command::Deposit(parse_amount(amount)?)),
                _ => Err(CommandError::Usage("deposit [amount]")),
            },
            "withdraw" => match args {
                [amount] => Ok(Command::Withdraw(parse_amount(amount)?)),
                _ => Err(CommandError::Usage("withdraw [amount]")),
            },
            "transfer" => match args {
                [target, amount] => Ok(Command::Transfer {
                    target: target.to_string(),
                    amount: parse_amount(amount)?,
                }),
                _ => Err(CommandError::Usage("transfer [target] [amount]")),
            },
            "logout" => match args {
                [] => Ok(Command::Logout),
                _ => Err(CommandError::Usage("logout")),
            },
            _ => Err(CommandError::Unknown),
        }
    }
}
