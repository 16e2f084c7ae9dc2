use clap::Parser;
use log::{debug, error};
use std::error::Error;

mod args;
mod tabulate;

use crate::args::Args;
use crate::tabulate::RunOptions;

fn main() {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    let opts = RunOptions {
        input: args.input.clone(),
        input_type: args.input_type.clone(),
        candidates: args.candidates.clone(),
        excel_worksheet_name: args.excel_worksheet_name.clone(),
        out: args.out.clone(),
        reference: args.reference.clone(),
    };

    let res = match args.config.as_deref() {
        Some(config_path) => tabulate::run_election_config(config_path, &opts),
        None => tabulate::run_election_input(&opts),
    };

    if let Err(e) = res {
        error!("{}", e);
        let mut source = e.source();
        while let Some(s) = source {
            eprintln!("caused by: {}", s);
            source = s.source();
        }
        std::process::exit(1);
    }
}
