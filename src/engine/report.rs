use std::fmt;

use rust_decimal::Decimal;

use crate::accounts::cents;

/// One human-readable status line produced by a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Greeting(String),
    Balance(Decimal),
    Transferred { to: String, amount: Decimal },
    /// The active account owes `creditor`.
    OwedTo { creditor: String, amount: Decimal },
    /// `debtor` owes the active account.
    OwedFrom { debtor: String, amount: Decimal },
    Goodbye(String),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Greeting(name) => write!(f, "Hello, {}!", name),
            Report::Balance(amount) => write!(f, "Your balance is ${}", cents(amount)),
            Report::Transferred { to, amount } => {
                write!(f, "Transferred ${} to {}", cents(amount), to)
            }
            Report::OwedTo { creditor, amount } => {
                write!(f, "Owed ${} to {}", cents(amount), creditor)
            }
            Report::OwedFrom { debtor, amount } => {
                write!(f, "Owed ${} from {}", cents(amount), debtor)
            }
            Report::Goodbye(name) => write!(f, "Goodbye, {}!", name),
        }
    }
}
