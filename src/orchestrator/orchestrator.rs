use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use log::{debug, info, warn};

use crate::commands::{Command, CommandError};
use crate::engine::{Report, SettlementEngine};
use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Run a session over `script`, or interactively over stdin when no script is
/// given. A script run ends by printing a CSV snapshot of every account.
pub fn run(script: Option<&str>) -> Result<(), Box<dyn Error>> {
    let mut engine = SettlementEngine::new(Ledger::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match script {
        Some(filename) => {
            let file = File::open(filename)?;
            run_session(&mut engine, BufReader::new(file), &mut out, false)?;
            engine.ledger().write_snapshot(&mut out)?;
        }
        None => {
            let stdin = io::stdin();
            run_session(&mut engine, stdin.lock(), &mut out, true)?;
        }
    }

    Ok(())
}

pub fn execute(engine: &mut SettlementEngine, command: Command) -> Result<Vec<Report>, LedgerError> {
    match command {
        Command::Login(name) => engine.login(&name),
        Command::Deposit(amount) => engine.deposit(amount),
        Command::Withdraw(amount) => engine.withdraw(amount),
        Command::Transfer { target, amount } => engine.transfer(&target, amount),
        Command::Logout => engine.logout(),
    }
}

/// Read commands line by line until EOF. Rejected input (including lines that
/// are not UTF-8) and failed operations are reported and the loop carries on;
/// only I/O errors end it early.
pub fn run_session<R: BufRead, W: Write>(
    engine: &mut SettlementEngine,
    mut input: R,
    out: &mut W,
    prompt: bool,
) -> Result<(), Box<dyn Error>> {
    let mut buf = Vec::new();
    let mut processed = 0usize;

    loop {
        if prompt {
            write!(out, "$ ")?;
            out.flush()?;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!("skipping line that is not valid UTF-8");
            writeln!(out, "{}", CommandError::Unknown)?;
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }

        processed += 1;
        debug!("command: {}", line.trim());
        match line.parse::<Command>() {
            Ok(command) => match execute(engine, command) {
                Ok(reports) => {
                    for report in reports {
                        writeln!(out, "{}", report)?;
                    }
                }
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            Err(e) => writeln!(out, "{}", e)?,
        }
    }

    if prompt {
        writeln!(out)?;
    }
    info!("input exhausted after {} commands", processed);
    Ok(())
}
