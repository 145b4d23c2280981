use std::io;
use std::io::BufWriter;
use std::process::ExitCode;

use clap::Parser;
use describe_subtree::DescribeOptions;
use describe_subtree::cli::Args;
use describe_subtree::describe;
use env_logger::Env;
use log::debug;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the description.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    let options = DescribeOptions::from(&args);
    debug!("describing {} path(s) with {options:?}", args.paths.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match describe(&args.paths, &options, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("describe-subtree: {e}");
            ExitCode::FAILURE
        }
    }
}
