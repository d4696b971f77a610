use::std::env;
use::std::process;

use ledger_atm::run;
use log::info;

fn main() {
    // Optional single argument: a file of commands to replay instead of stdin
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [commands.txt]", args[0]);
        process::exit(1);
    }
    let script = args.get(1).map(String::as_str);
    // Initialize logger (respect RUST_LOG env var if set)
    env_logger::init();

    match script {
        Some(filename) => info!("starting ledger with script: {}", filename),
        None => info!("starting interactive ledger session"),
    }

    if let Err(e) = run(script) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
