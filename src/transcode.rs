//! The transcoding pipeline: lexer → reduction → emitter, one pixel at a time.
//!
//! Every conversion, lossy or not, runs through the same row/column loop.
//! What differs is how a pixel is decoded (ASCII token, raw byte, packed bit),
//! the [`Reduction`] applied to it, and how the emitter writes it back out.

use std::io::{BufRead, Write};

use enough::Stop;
use log::{debug, trace};

use crate::emitter::Emitter;
use crate::error::PnmError;
use crate::format::{ColorDepth, Encoding, FormatCode};
use crate::header::{ImageHeader, parse_header};
use crate::lexer::{Lexer, Terminator};
use crate::limits::Limits;
use crate::pixel::{Pixel, Reduction};

/// Which conversion to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Drop one step of color depth, keeping the encoding: P3→P2→P1, P6→P5→P4.
    Downsample,
    /// Flip between ASCII and binary encoding, keeping the depth: P1↔P4, P2↔P5, P3↔P6.
    RadixConvert,
}

impl Mode {
    /// Select a mode from two independent switches. Exactly one must be set.
    pub fn from_flags(downsample: bool, convert: bool) -> Result<Self, PnmError> {
        match (downsample, convert) {
            (true, false) => Ok(Self::Downsample),
            (false, true) => Ok(Self::RadixConvert),
            _ => Err(PnmError::ModeConflict),
        }
    }

    /// Output format for a given input format.
    pub fn target_format(self, source: FormatCode) -> Result<FormatCode, PnmError> {
        match self {
            Self::Downsample => source
                .downsampled()
                .ok_or(PnmError::UnsupportedConversion(source)),
            Self::RadixConvert => Ok(source.radix_flipped()),
        }
    }

    fn reduction(self, source: &ImageHeader) -> Reduction {
        match (self, source.format.depth()) {
            (Self::Downsample, ColorDepth::Color) => Reduction::Luminosity,
            (Self::Downsample, ColorDepth::Gray) => Reduction::Threshold {
                max_sample: sample_bound(source),
            },
            _ => Reduction::Identity,
        }
    }
}

/// Summary of a finished conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranscodeOutput {
    /// Header as read from the input.
    pub source: ImageHeader,
    /// Header as written to the output.
    pub target: ImageHeader,
}

/// Builder for a single conversion run.
#[derive(Clone, Debug)]
pub struct TranscodeRequest<'a> {
    mode: Mode,
    limits: Option<&'a Limits>,
}

impl<'a> TranscodeRequest<'a> {
    pub fn new(mode: Mode) -> Self {
        Self { mode, limits: None }
    }

    /// Reject images whose dimensions exceed `limits` before writing anything.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Stream one image from `reader` to `writer`.
    ///
    /// On error, bytes already written stay written; the output is then a
    /// truncated image.
    pub fn transcode<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: W,
        stop: impl Stop,
    ) -> Result<TranscodeOutput, PnmError> {
        let mut lexer = Lexer::new(reader);
        let source = parse_header(&mut lexer)?;
        let target_format = self.mode.target_format(source.format)?;
        let target = source.with_format(target_format);
        debug!("{:?}: {source} -> {target}", self.mode);

        if let Some(limits) = self.limits {
            limits.check(source.width, source.height)?;
        }

        let mut emitter = Emitter::new(writer, target_format);
        emitter.write_header(&target)?;
        transcode_pixels(
            &mut lexer,
            &mut emitter,
            &source,
            self.mode.reduction(&source),
            &stop,
        )?;
        emitter.finish()?;
        debug!("converted {} bytes of input", lexer.offset());

        Ok(TranscodeOutput { source, target })
    }

    /// Convert an in-memory image.
    pub fn transcode_to_vec(&self, data: &[u8], stop: impl Stop) -> Result<Vec<u8>, PnmError> {
        let mut out = Vec::with_capacity(data.len());
        self.transcode(data, &mut out, stop)?;
        Ok(out)
    }
}

fn transcode_pixels<R: BufRead, W: Write>(
    lexer: &mut Lexer<R>,
    emitter: &mut Emitter<W>,
    source: &ImageHeader,
    reduction: Reduction,
    stop: &dyn Stop,
) -> Result<(), PnmError> {
    let mut reader = PixelReader::new(source);
    let (w, h) = (source.width, source.height);

    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        for col in 0..w {
            let last = row + 1 == h && col + 1 == w;
            let pixel = reader.read(lexer, last)?;
            emitter.emit(reduction.apply(pixel))?;
        }
        reader.end_row();
        emitter.end_row()?;
        trace!("row {row} done");
    }
    Ok(())
}

/// Largest value a single input sample may take.
fn sample_bound(header: &ImageHeader) -> u16 {
    match (header.format.encoding(), header.max_sample) {
        (_, Some(max)) => max,
        // Plain bitmaps hold only 0 and 1.
        (Encoding::Ascii, None) => 1,
        // Raw bitmap bytes are bit fields, any value goes.
        (Encoding::Binary, None) => u16::from(u8::MAX),
    }
}

/// Decodes pixels of one source format from the lexer.
struct PixelReader {
    encoding: Encoding,
    depth: ColorDepth,
    bound: u16,
    /// Remaining bits of the current raw-bitmap byte, MSB first.
    packed: u8,
    packed_left: u8,
}

impl PixelReader {
    fn new(header: &ImageHeader) -> Self {
        Self {
            encoding: header.format.encoding(),
            depth: header.format.depth(),
            bound: sample_bound(header),
            packed: 0,
            packed_left: 0,
        }
    }

    fn read<R: BufRead>(&mut self, lexer: &mut Lexer<R>, last: bool) -> Result<Pixel, PnmError> {
        let pixel = match (self.encoding, self.depth) {
            (Encoding::Binary, ColorDepth::Bilevel) => {
                if self.packed_left == 0 {
                    self.packed = lexer.read_binary_sample(self.bound)?;
                    self.packed_left = 8;
                }
                let black = self.packed & 0x80 != 0;
                self.packed <<= 1;
                self.packed_left -= 1;
                Pixel::Bit(black)
            }
            (Encoding::Binary, ColorDepth::Gray) => {
                Pixel::Gray(lexer.read_binary_sample(self.bound)?)
            }
            (Encoding::Binary, ColorDepth::Color) => Pixel::Rgb([
                lexer.read_binary_sample(self.bound)?,
                lexer.read_binary_sample(self.bound)?,
                lexer.read_binary_sample(self.bound)?,
            ]),
            (Encoding::Ascii, ColorDepth::Bilevel) => {
                Pixel::Bit(self.ascii(lexer, terminator(last))? == 1)
            }
            (Encoding::Ascii, ColorDepth::Gray) => Pixel::Gray(self.ascii(lexer, terminator(last))?),
            (Encoding::Ascii, ColorDepth::Color) => Pixel::Rgb([
                self.ascii(lexer, Terminator::RequireSeparator)?,
                self.ascii(lexer, Terminator::RequireSeparator)?,
                self.ascii(lexer, terminator(last))?,
            ]),
        };
        Ok(pixel)
    }

    fn ascii<R: BufRead>(
        &self,
        lexer: &mut Lexer<R>,
        terminator: Terminator,
    ) -> Result<u8, PnmError> {
        let value = lexer.read_ascii_sample(Some(self.bound), terminator)?;
        u8::try_from(value).map_err(|_| PnmError::SampleOutOfRange {
            value,
            max: self.bound,
        })
    }

    /// Padding bits at the end of a packed row carry no pixels.
    fn end_row(&mut self) {
        self.packed_left = 0;
    }
}

fn terminator(last: bool) -> Terminator {
    if last {
        Terminator::AllowEndOfStream
    } else {
        Terminator::RequireSeparator
    }
}
