use clap::Parser;
use ohlrepair::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
