//! Trammel CLI
//!
//! Fits the conic of a sketch file and prints its branch polylines (and
//! optionally the string-construction frames) as JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! trammel sketch.toml
//! trammel sketch.toml --config trammel.toml --animate
//! RUST_LOG=debug trammel sketch.toml
//! ```

mod report;

use std::path::PathBuf;
use std::process;

use trammel_core::TrammelConfig;

fn print_usage() {
    eprintln!(
        r#"Trammel conic sketch tool

USAGE:
    trammel <sketch.toml> [--config <config.toml>] [--animate]

ARGS:
    <sketch.toml>   Sketch with `apex`, `p1`, `p2`, `extra` as [x, y]

OPTIONS:
    --config <path> Sampling/animation/tolerance settings (TOML)
    --animate       Include every frame of one string-animation run
    --help          Show this help message
"#
    );
}

struct Args {
    sketch: PathBuf,
    config: Option<PathBuf>,
    animate: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut sketch = None;
    let mut config = None;
    let mut animate = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--animate" => animate = true,
            "--config" => {
                let path = iter.next().ok_or("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            path if sketch.is_none() => sketch = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {}", extra)),
        }
    }

    Ok(Args {
        sketch: sketch.ok_or("missing required argument <sketch.toml>")?,
        config,
        animate,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        process::exit(0);
    }

    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n", e);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => TrammelConfig::load_from_file(path),
        None => TrammelConfig::default(),
    };
    let points = report::load_sketch(&args.sketch)?;
    let report = report::build_report(points, &config, args.animate)?;
    log::info!(
        "Fitted {} with C = {} ({} samples)",
        args.sketch.display(),
        report.shape_constant,
        report.branches.len()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("trammel")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_full() {
        let parsed = parse_args(&args(&["s.toml", "--config", "c.toml", "--animate"])).unwrap();
        assert_eq!(parsed.sketch, PathBuf::from("s.toml"));
        assert_eq!(parsed.config, Some(PathBuf::from("c.toml")));
        assert!(parsed.animate);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["s.toml", "--config"])).is_err());
        assert!(parse_args(&args(&["s.toml", "--bogus"])).is_err());
        assert!(parse_args(&args(&["a.toml", "b.toml"])).is_err());
    }
}
