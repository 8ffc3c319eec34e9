//! wordtree CLI Binary
//!
//! Command-line interface for folder word-count aggregation.

use clap::Parser;
use std::process;
use wordtree::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let root = cli.command.config_root();
    let mut context = match CliContext::new(&root, cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };
    context.apply_log_flags(&cli);
    if let Err(e) = context.init_logging() {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
