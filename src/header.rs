//! Netpbm header parsing.
//!
//! Grammar: `P<digit> <width> <height> [<max sample>]`, fields separated by
//! whitespace and `#` line comments. The max-sample field is absent for bitmaps.

use core::fmt;
use std::io::BufRead;

use crate::error::PnmError;
use crate::format::{Encoding, FormatCode};
use crate::lexer::{Lexer, is_separator};

/// Largest max-sample value accepted; samples are single bytes.
pub const MAX_SAMPLE_LIMIT: u32 = 255;

/// Parsed Netpbm header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    pub format: FormatCode,
    pub width: u32,
    pub height: u32,
    /// Present iff the format is not a bitmap.
    pub max_sample: Option<u16>,
}

impl ImageHeader {
    /// Parse only the header fields from the start of `data`.
    ///
    /// Pixel data is not inspected, so a buffer holding just the header is enough.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PnmError> {
        parse_fields(&mut Lexer::new(data))
    }

    /// The same image described in another format.
    ///
    /// The max-sample field is carried over, or dropped when the target is a bitmap.
    pub fn with_format(&self, format: FormatCode) -> Self {
        let max_sample = if format.has_max_sample() {
            self.max_sample
        } else {
            None
        };
        Self {
            format,
            max_sample,
            ..*self
        }
    }
}

/// Header line as written to output, without the trailing newline.
impl fmt::Display for ImageHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{} {} {}", self.format.digit(), self.width, self.height)?;
        if let Some(max) = self.max_sample {
            write!(f, " {max}")?;
        }
        Ok(())
    }
}

/// Parse the header and position the lexer on the first pixel sample.
pub(crate) fn parse_header<R: BufRead>(lexer: &mut Lexer<R>) -> Result<ImageHeader, PnmError> {
    let header = parse_fields(lexer)?;
    match header.format.encoding() {
        // The first sample may be preceded by more whitespace and comments.
        Encoding::Ascii => lexer.skip_comments()?,
        // Exactly one whitespace byte; everything after it is raw data.
        Encoding::Binary => match lexer.next_byte()? {
            Some(b) if is_separator(b) => {}
            Some(b) => {
                return Err(PnmError::MalformedHeader(format!(
                    "expected whitespace before pixel data, found 0x{b:02x}"
                )));
            }
            None => return Err(PnmError::UnexpectedEof),
        },
    }
    Ok(header)
}

fn parse_fields<R: BufRead>(lexer: &mut Lexer<R>) -> Result<ImageHeader, PnmError> {
    match lexer.next_byte()? {
        Some(b'P') => {}
        Some(b) => {
            return Err(PnmError::MalformedHeader(format!(
                "expected magic 'P', found 0x{b:02x}"
            )));
        }
        None => return Err(PnmError::UnexpectedEof),
    }

    let digit = lexer.next_byte()?.ok_or(PnmError::UnexpectedEof)?;
    let format = digit
        .checked_sub(b'0')
        .and_then(FormatCode::from_digit)
        .ok_or_else(|| {
            PnmError::MalformedHeader(format!("unknown format P{}", char::from(digit)))
        })?;

    lexer.skip_comments()?;
    let width = lexer.read_decimal(None)?;
    lexer.skip_comments()?;
    let height = lexer.read_decimal(None)?;
    if width == 0 || height == 0 {
        return Err(PnmError::MalformedHeader(format!(
            "zero dimension {width}x{height}"
        )));
    }

    let max_sample = if format.has_max_sample() {
        lexer.skip_comments()?;
        let max = lexer.read_decimal(None)?;
        if max > MAX_SAMPLE_LIMIT {
            return Err(PnmError::MaxSampleTooLarge(max));
        }
        if max == 0 {
            return Err(PnmError::MalformedHeader("max sample value is zero".into()));
        }
        // Bounded by MAX_SAMPLE_LIMIT above.
        Some(max as u16)
    } else {
        None
    };

    Ok(ImageHeader {
        format,
        width,
        height,
        max_sample,
    })
}
