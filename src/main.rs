use std::env;
use std::error::Error;
use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    if let Err(err) = run_app() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays pure CSV. Verbosity comes from `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_app() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        return Err("Usage: cargo run -- journal.csv".into());
    }
    expense_ledger::run(&args[1], std::io::stdout())?;
    Ok(())
}
