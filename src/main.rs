use std::io;
use std::process;

use clap::Parser;

use jirosso::cli::Cli;
use jirosso::{app, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = app::run(cli) {
        let _ = app::report(&err, &mut io::stderr().lock());
        process::exit(err.exit_code());
    }
}
