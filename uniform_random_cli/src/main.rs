// `sample` — record and check uniform_random conformance vectors.
//
// Records draws from a seeded `Stream` as a JSON vector set, or checks a
// vector file (produced here or by another implementation of the generator)
// against this one. Exits non-zero on the first divergence.
//
// Usage:
//   sample [--seed N] [--count C] <raw | float LOW HIGH | exp MIN MAX EXPONENT | int LOW HIGH>
//   sample verify [FILE]
//
// Logging goes through `env_logger`; set `RUST_LOG=debug` for per-vector
// progress.

mod args;

use std::path::{Path, PathBuf};

use log::{error, info};
use thiserror::Error;
use uniform_random::{ReferenceVector, VectorError, VectorSet, default_vectors};

use crate::args::{ArgsError, Command, parse_args, print_usage};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Vector(#[from] VectorError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!("{e}");
        if matches!(e, CliError::Args(_)) {
            print_usage();
        }
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    match parse_args(args)? {
        Command::Help => print_usage(),
        Command::Sample { seed, count, call } => {
            let set = VectorSet {
                vectors: vec![ReferenceVector::record(
                    format!("sample_seed_{seed}"),
                    seed,
                    vec![call; count],
                )],
            };
            println!("{}", set.to_json_pretty()?);
        }
        Command::Verify { path } => {
            let set = match &path {
                Some(path) => load(path)?,
                None => default_vectors(),
            };
            let checked = set.check_all()?;
            let source = path
                .as_deref()
                .map_or_else(|| "built-in vectors".to_string(), |p| p.display().to_string());
            info!("{checked} vectors match ({source})");
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<VectorSet, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(VectorSet::from_json(&json)?)
}
