use clap::Parser;

use hexagn::driver::{run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    run(&cli)
}
