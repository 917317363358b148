mod app;
mod cli;
mod output;

use std::process;

use clap::Parser;

use crate::cli::Config;

fn main() {
    let cfg = Config::parse();
    match app::run(cfg) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2);
        }
    }
}
