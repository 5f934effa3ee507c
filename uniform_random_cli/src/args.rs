// Command-line parsing for `sample`.
//
// Plain `std::env::args()` matching, no argument-parsing crate. Numbers after
// a call name are positional, so negative bounds (`int -3 3`) need no quoting
// or `--` separator.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use uniform_random::Call;

#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    /// Record `count` repetitions of `call` on a stream seeded with `seed`.
    Sample { seed: i32, count: usize, call: Call },
    /// Check a vector file, or the embedded defaults when `path` is `None`.
    Verify { path: Option<PathBuf> },
}

#[derive(Debug, Error, PartialEq)]
pub enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("invalid {what}: `{value}`")]
    InvalidValue { what: &'static str, value: String },
    #[error("unknown argument: {0}")]
    Unknown(String),
    #[error("no call given (expected raw, float, exp or int)")]
    MissingCall,
    #[error("more than one call given: {0}")]
    ExtraCall(String),
}

/// Parse arguments, not including the program name.
pub fn parse_args(args: &[String]) -> Result<Command, ArgsError> {
    if let Some(("verify", rest)) = args
        .split_first()
        .map(|(first, rest)| (first.as_str(), rest))
    {
        return match rest {
            [] => Ok(Command::Verify { path: None }),
            [flag] if flag == "--help" || flag == "-h" => Ok(Command::Help),
            [path] => Ok(Command::Verify {
                path: Some(PathBuf::from(path)),
            }),
            [_, extra, ..] => Err(ArgsError::Unknown(extra.clone())),
        };
    }

    let mut seed = 0;
    let mut count = 1;
    let mut call = None;
    let mut i = 0;

    while i < args.len() {
        let start = i;
        let parsed = match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--seed" => {
                i += 1;
                seed = value(args, i, "--seed")?;
                None
            }
            "--count" => {
                i += 1;
                count = value(args, i, "--count")?;
                None
            }
            "raw" => Some(Call::Raw),
            "float" => {
                let low = float_value(args, i + 1, "float low")?;
                let high = float_value(args, i + 2, "float high")?;
                i += 2;
                Some(Call::Float { low, high })
            }
            "exp" => {
                let min = float_value(args, i + 1, "exp min")?;
                let max = float_value(args, i + 2, "exp max")?;
                let exponent = float_value(args, i + 3, "exp exponent")?;
                i += 3;
                Some(Call::FloatExp { min, max, exponent })
            }
            "int" => {
                let low = value(args, i + 1, "int low")?;
                let high = value(args, i + 2, "int high")?;
                i += 2;
                Some(Call::Int { low, high })
            }
            other => return Err(ArgsError::Unknown(other.to_string())),
        };

        if let Some(parsed) = parsed {
            if call.is_some() {
                return Err(ArgsError::ExtraCall(args[start].clone()));
            }
            call = Some(parsed);
        }
        i += 1;
    }

    let call = call.ok_or(ArgsError::MissingCall)?;
    Ok(Command::Sample { seed, count, call })
}

fn value<T: FromStr>(args: &[String], i: usize, what: &'static str) -> Result<T, ArgsError> {
    let raw = args.get(i).ok_or(ArgsError::MissingValue(what))?;
    raw.parse().map_err(|_| ArgsError::InvalidValue {
        what,
        value: raw.clone(),
    })
}

/// Like `value`, but rejects NaN and infinities, which JSON cannot carry.
fn float_value(args: &[String], i: usize, what: &'static str) -> Result<f32, ArgsError> {
    let parsed: f32 = value(args, i, what)?;
    if !parsed.is_finite() {
        return Err(ArgsError::InvalidValue {
            what,
            value: args[i].clone(),
        });
    }
    Ok(parsed)
}

pub fn print_usage() {
    println!("Usage: sample [--seed N] [--count C] <CALL>");
    println!("       sample verify [FILE]");
    println!();
    println!("Calls:");
    println!("  raw                     generate_random_number()");
    println!("  float LOW HIGH          random_float(LOW, HIGH)");
    println!("  exp MIN MAX EXPONENT    random_float_exp(MIN, MAX, EXPONENT)");
    println!("  int LOW HIGH            random_int(LOW, HIGH)");
    println!();
    println!("Options:");
    println!("  --seed <N>              Stream seed (default: 0)");
    println!("  --count <C>             Repetitions of the call (default: 1)");
    println!("  --help, -h              Show this help");
    println!();
    println!("`sample` prints a JSON vector set holding the recorded draws.");
    println!("`verify` checks a vector file, or the built-in vectors when FILE is omitted.");
    println!("Set RUST_LOG=debug to list each vector as it passes.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn sample_with_defaults() {
        assert_eq!(
            parse_args(&args("raw")),
            Ok(Command::Sample {
                seed: 0,
                count: 1,
                call: Call::Raw
            })
        );
    }

    #[test]
    fn sample_float_with_seed_and_count() {
        assert_eq!(
            parse_args(&args("--seed 72 --count 4 float 0 1")),
            Ok(Command::Sample {
                seed: 72,
                count: 4,
                call: Call::Float {
                    low: 0.0,
                    high: 1.0
                }
            })
        );
    }

    #[test]
    fn options_may_follow_the_call() {
        assert_eq!(
            parse_args(&args("int -3 3 --seed -9")),
            Ok(Command::Sample {
                seed: -9,
                count: 1,
                call: Call::Int { low: -3, high: 3 }
            })
        );
    }

    #[test]
    fn sample_exp() {
        assert_eq!(
            parse_args(&args("exp 10 20 0.5")),
            Ok(Command::Sample {
                seed: 0,
                count: 1,
                call: Call::FloatExp {
                    min: 10.0,
                    max: 20.0,
                    exponent: 0.5
                }
            })
        );
    }

    #[test]
    fn verify_forms() {
        assert_eq!(
            parse_args(&args("verify")),
            Ok(Command::Verify { path: None })
        );
        assert_eq!(
            parse_args(&args("verify vectors.json")),
            Ok(Command::Verify {
                path: Some(PathBuf::from("vectors.json"))
            })
        );
        assert_eq!(
            parse_args(&args("verify a.json b.json")),
            Err(ArgsError::Unknown("b.json".to_string()))
        );
    }

    #[test]
    fn help_anywhere() {
        assert_eq!(parse_args(&args("--seed 3 -h")), Ok(Command::Help));
        assert_eq!(parse_args(&args("verify --help")), Ok(Command::Help));
    }

    #[test]
    fn errors() {
        assert_eq!(parse_args(&args("")), Err(ArgsError::MissingCall));
        assert_eq!(
            parse_args(&args("raw --seed")),
            Err(ArgsError::MissingValue("--seed"))
        );
        assert_eq!(
            parse_args(&args("int 1 x")),
            Err(ArgsError::InvalidValue {
                what: "int high",
                value: "x".to_string()
            })
        );
        assert_eq!(
            parse_args(&args("--seed 99999999999 raw")),
            Err(ArgsError::InvalidValue {
                what: "--seed",
                value: "99999999999".to_string()
            })
        );
        assert_eq!(
            parse_args(&args("raw raw")),
            Err(ArgsError::ExtraCall("raw".to_string()))
        );
        assert_eq!(
            parse_args(&args("--verbose raw")),
            Err(ArgsError::Unknown("--verbose".to_string()))
        );
    }

    #[test]
    fn non_finite_floats_rejected() {
        assert_eq!(
            parse_args(&args("float NaN 1")),
            Err(ArgsError::InvalidValue {
                what: "float low",
                value: "NaN".to_string()
            })
        );
        assert_eq!(
            parse_args(&args("exp 0 inf 2")),
            Err(ArgsError::InvalidValue {
                what: "exp max",
                value: "inf".to_string()
            })
        );
        assert_eq!(
            parse_args(&args("exp 0 1 -infinity")),
            Err(ArgsError::InvalidValue {
                what: "exp exponent",
                value: "-infinity".to_string()
            })
        );
    }
}
