//! # pnmconv
//!
//! Streaming transcoder for the six classic Netpbm formats, P1 through P6.
//!
//! Two conversions are supported:
//!
//! - **Downsample** — drop one step of color depth, keeping the encoding:
//!   P3 → P2 → P1 and P6 → P5 → P4. Color becomes gray by luminosity
//!   (`(299r + 587g + 114b) / 1000`), gray becomes bilevel by thresholding at
//!   `(max + 1) / 2`.
//! - **Radix convert** — flip between ASCII ("plain") and binary ("raw")
//!   encoding without touching sample values: P1 ↔ P4, P2 ↔ P5, P3 ↔ P6.
//!
//! ## Streaming
//!
//! Input is read through a [`std::io::BufRead`] one byte at a time with a single
//! byte of lookahead, and output is written pixel by pixel. The image is never
//! held in memory, so arbitrarily large inputs run in constant space.
//!
//! ## Non-Goals
//!
//! - PAM (P7), PFM, and 16-bit samples (max sample must be ≤ 255)
//! - Recovery from malformed input: the first error aborts the run
//! - Color management beyond the fixed luminosity weights
//!
//! ## Usage
//!
//! ```no_run
//! use pnmconv::{Mode, TranscodeRequest, Unstoppable};
//! use std::io;
//!
//! let stdin = io::stdin().lock();
//! let stdout = io::stdout().lock();
//! let report = TranscodeRequest::new(Mode::RadixConvert)
//!     .transcode(stdin, stdout, Unstoppable)?;
//! eprintln!("{} -> {}", report.source, report.target);
//! # Ok::<(), pnmconv::PnmError>(())
//! ```

#![forbid(unsafe_code)]

mod emitter;
mod error;
mod format;
mod header;
mod lexer;
mod limits;
mod pixel;
mod transcode;

// Re-exports
pub use enough::{Stop, Unstoppable};
pub use error::PnmError;
pub use format::{ColorDepth, Encoding, FormatCode};
pub use header::{ImageHeader, MAX_SAMPLE_LIMIT};
pub use limits::Limits;
pub use pixel::{is_white, luminosity, threshold};
pub use transcode::{Mode, TranscodeOutput, TranscodeRequest};

/// Reduce an in-memory image by one step of color depth.
pub fn downsample(data: &[u8], stop: impl Stop) -> Result<Vec<u8>, PnmError> {
    TranscodeRequest::new(Mode::Downsample).transcode_to_vec(data, stop)
}

/// Re-encode an in-memory image between its ASCII and binary forms.
pub fn radix_convert(data: &[u8], stop: impl Stop) -> Result<Vec<u8>, PnmError> {
    TranscodeRequest::new(Mode::RadixConvert).transcode_to_vec(data, stop)
}
