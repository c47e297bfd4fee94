//! Quietcut command-line batch slicer.
//!
//! Thin driver around [`quietcut_core::BatchPipeline`]: parses raw textual
//! options into validated slicing parameters, feeds the file list to the
//! pipeline, renders one line per finished file, and exits non-zero when
//! any file failed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use quietcut_core::{BatchEvent, BatchPipeline, FileOutcome, SliceParams};
use tracing::info;

const USAGE: &str = "\
usage: quietcut [options] <input.wav>...

options:
  --out <dir>            output directory (default: beside each source file)
  --threshold <db>       silence threshold in dBFS (default: -40)
  --min-length <ms>      minimum chunk length (default: 5000)
  --min-interval <ms>    minimum silent run to cut at (default: 300)
  --hop-size <ms>        analysis hop size (default: 10)
  --max-silence <ms>     silence kept at each cut point (default: 500)
  -h, --help             print this help
";

#[derive(Debug)]
struct Args {
    inputs: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    params: SliceParams,
}

fn parse_args() -> Result<Option<Args>> {
    let mut inputs = Vec::new();
    let mut out_dir = None;
    let mut params = SliceParams::default();

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        if !arg.starts_with('-') {
            inputs.push(PathBuf::from(arg));
            continue;
        }
        let mut value_for = |flag: &str| {
            it.next()
                .ok_or_else(|| anyhow!("missing value for {flag}"))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--out" => out_dir = Some(PathBuf::from(value_for("--out")?)),
            "--threshold" => {
                let raw = value_for("--threshold")?;
                params.threshold_db = raw
                    .parse()
                    .with_context(|| format!("--threshold: not a number: '{raw}'"))?;
            }
            "--min-length" => {
                let raw = value_for("--min-length")?;
                params.min_length_ms = raw
                    .parse()
                    .with_context(|| format!("--min-length: not a whole number: '{raw}'"))?;
            }
            "--min-interval" => {
                let raw = value_for("--min-interval")?;
                params.min_interval_ms = raw
                    .parse()
                    .with_context(|| format!("--min-interval: not a whole number: '{raw}'"))?;
            }
            "--hop-size" => {
                let raw = value_for("--hop-size")?;
                params.hop_size_ms = raw
                    .parse()
                    .with_context(|| format!("--hop-size: not a whole number: '{raw}'"))?;
            }
            "--max-silence" => {
                let raw = value_for("--max-silence")?;
                params.max_silence_kept_ms = raw
                    .parse()
                    .with_context(|| format!("--max-silence: not a whole number: '{raw}'"))?;
            }
            other => bail!("unknown option: {other}"),
        }
    }

    Ok(Some(Args {
        inputs,
        out_dir,
        params,
    }))
}

fn run() -> Result<ExitCode> {
    let Some(args) = parse_args()? else {
        print!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    };

    if args.inputs.is_empty() {
        // Zero inputs is a no-op, not an error.
        println!("nothing to do");
        return Ok(ExitCode::SUCCESS);
    }

    // Parameter problems surface here, before any file is touched.
    let pipeline = BatchPipeline::new(args.params)?;
    info!(files = args.inputs.len(), "starting batch");

    let rx = pipeline.start(args.inputs, args.out_dir)?;
    for event in rx {
        match event {
            BatchEvent::FileFinished(report) => match report.outcome {
                FileOutcome::Sliced { chunks, .. } => {
                    println!("sliced {} -> {chunks} chunk(s)", report.source.display());
                }
                FileOutcome::Failed { error } => {
                    println!("failed {}: {error}", report.source.display());
                }
            },
            BatchEvent::BatchFinished(report) => {
                println!(
                    "done: {} sliced, {} failed{}",
                    report.finished,
                    report.failed,
                    if report.stopped { " (stopped)" } else { "" }
                );
                return Ok(if report.failed > 0 {
                    ExitCode::FAILURE
                } else {
                    ExitCode::SUCCESS
                });
            }
        }
    }

    bail!("batch worker exited without a final report");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quietcut=warn".parse().unwrap()),
        )
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("quietcut: {e:#}");
            ExitCode::FAILURE
        }
    }
}
