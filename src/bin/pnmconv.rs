//! pnmconv CLI: read one Netpbm image on stdin, write the converted image on stdout.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use pnmconv::{Limits, Mode, PnmError, TranscodeOutput, TranscodeRequest, Unstoppable};

/// Netpbm (P1-P6) depth downsampler and ASCII/binary converter.
///
/// Exactly one of --downsample or --convert must be given.
#[derive(Parser, Debug)]
#[command(name = "pnmconv")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    pnmconv --downsample < photo.ppm > gray.pgm     P6 -> P5
    pnmconv --downsample < gray.pgm > bw.pbm        P5 -> P4
    pnmconv --convert < photo.ppm > plain.ppm       P6 -> P3")]
struct Args {
    /// Reduce color depth by one step (P3→P2→P1, P6→P5→P4)
    #[arg(short, long)]
    downsample: bool,

    /// Flip between ASCII and binary encoding (P1↔P4, P2↔P5, P3↔P6)
    #[arg(short, long)]
    convert: bool,

    /// Reject images wider than this
    #[arg(long, value_name = "PIXELS")]
    max_width: Option<u64>,

    /// Reject images taller than this
    #[arg(long, value_name = "PIXELS")]
    max_height: Option<u64>,

    /// Reject images with more pixels than this
    #[arg(long, value_name = "COUNT")]
    max_pixels: Option<u64>,

    /// Do not print the success message
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn limits(&self) -> Limits {
        Limits {
            max_width: self.max_width,
            max_height: self.max_height,
            max_pixels: self.max_pixels,
        }
    }
}

fn run(args: &Args) -> Result<TranscodeOutput, PnmError> {
    let mode = Mode::from_flags(args.downsample, args.convert)?;
    let limits = args.limits();
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    TranscodeRequest::new(mode)
        .with_limits(&limits)
        .transcode(stdin, stdout, Unstoppable)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            log::info!("{} -> {}", report.source, report.target);
            if !args.quiet {
                eprintln!("Successful conversion!");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("{e}");
            eprintln!("Input error!");
            ExitCode::FAILURE
        }
    }
}
