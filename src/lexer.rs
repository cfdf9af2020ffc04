//! Byte-level tokenizer for Netpbm streams.
//!
//! Works over any [`BufRead`] with a single byte of lookahead: [`Lexer::peek`]
//! inspects the next byte without consuming it, [`Lexer::advance`] consumes it.
//! Nothing is ever pushed back beyond that one byte.

use std::io::{BufRead, ErrorKind};

use crate::error::PnmError;

/// What may follow a decimal token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Terminator {
    /// More tokens follow, so end of stream here is truncation.
    RequireSeparator,
    /// The token is the final sample of the image; the stream may end right after it.
    AllowEndOfStream,
}

/// Forward-only byte cursor with one byte of lookahead.
pub(crate) struct Lexer<R> {
    inner: R,
    offset: u64,
}

impl<R: BufRead> Lexer<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Bytes consumed so far.
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    /// Look at the next byte without consuming it. `None` at end of stream.
    pub(crate) fn peek(&mut self) -> Result<Option<u8>, PnmError> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Consume the byte last returned by [`peek`](Self::peek).
    pub(crate) fn advance(&mut self) {
        self.inner.consume(1);
        self.offset += 1;
    }

    /// Consume and return the next byte.
    pub(crate) fn next_byte(&mut self) -> Result<Option<u8>, PnmError> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.advance();
        }
        Ok(byte)
    }

    /// Skip a run of whitespace, leaving the cursor on the first other byte.
    pub(crate) fn skip_whitespace(&mut self, terminator: Terminator) -> Result<(), PnmError> {
        loop {
            match self.peek()? {
                Some(b) if is_separator(b) => self.advance(),
                Some(_) => return Ok(()),
                None => {
                    return match terminator {
                        Terminator::AllowEndOfStream => Ok(()),
                        Terminator::RequireSeparator => Err(PnmError::UnexpectedEof),
                    };
                }
            }
        }
    }

    /// Skip whitespace and `#` line comments up to the next digit.
    ///
    /// Any other byte outside a comment is a malformed header; end of stream
    /// anywhere in here is truncation.
    pub(crate) fn skip_comments(&mut self) -> Result<(), PnmError> {
        loop {
            self.skip_whitespace(Terminator::RequireSeparator)?;
            match self.peek()? {
                Some(b'#') => self.skip_line()?,
                Some(b) if b.is_ascii_digit() => return Ok(()),
                Some(b) => {
                    return Err(PnmError::MalformedHeader(format!(
                        "unexpected byte 0x{b:02x} at offset {}",
                        self.offset
                    )));
                }
                None => return Err(PnmError::UnexpectedEof),
            }
        }
    }

    /// Consume through the next newline.
    fn skip_line(&mut self) -> Result<(), PnmError> {
        loop {
            match self.next_byte()? {
                Some(b'\n') => return Ok(()),
                Some(_) => {}
                None => return Err(PnmError::UnexpectedEof),
            }
        }
    }

    /// Read one raw byte as a sample.
    pub(crate) fn read_binary_sample(&mut self, max_sample: u16) -> Result<u8, PnmError> {
        let byte = self.next_byte()?.ok_or(PnmError::UnexpectedEof)?;
        if u16::from(byte) > max_sample {
            return Err(PnmError::SampleOutOfRange {
                value: u32::from(byte),
                max: max_sample,
            });
        }
        Ok(byte)
    }

    /// Read a decimal token, stopping before the first whitespace byte or at end of stream.
    ///
    /// The terminator is not consumed.
    pub(crate) fn read_decimal(&mut self, max_sample: Option<u16>) -> Result<u32, PnmError> {
        let mut value: u32 = 0;
        let mut digits = 0usize;
        loop {
            match self.peek()? {
                Some(b) if b.is_ascii_digit() => {
                    value = match value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u32::from(b - b'0')))
                    {
                        Some(v) => v,
                        None => return Err(overflow(max_sample)),
                    };
                    digits += 1;
                    self.advance();
                }
                Some(b) if is_separator(b) && digits > 0 => break,
                Some(b) => return Err(PnmError::InvalidDigit(b)),
                None if digits > 0 => break,
                None => return Err(PnmError::UnexpectedEof),
            }
        }

        if let Some(max) = max_sample {
            if value > u32::from(max) {
                return Err(PnmError::SampleOutOfRange { value, max });
            }
        }
        Ok(value)
    }

    /// Read a decimal sample and the whitespace that follows it.
    pub(crate) fn read_ascii_sample(
        &mut self,
        max_sample: Option<u16>,
        terminator: Terminator,
    ) -> Result<u32, PnmError> {
        let value = self.read_decimal(max_sample)?;
        self.skip_whitespace(terminator)?;
        Ok(value)
    }
}

/// Token separator: ASCII whitespace plus vertical tab, matching C `isspace`.
pub(crate) fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

fn overflow(max_sample: Option<u16>) -> PnmError {
    match max_sample {
        Some(max) => PnmError::SampleOutOfRange {
            value: u32::MAX,
            max,
        },
        None => PnmError::MalformedHeader("number does not fit in 32 bits".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexer(data: &[u8]) -> Lexer<&[u8]> {
        Lexer::new(data)
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lx = lexer(b"ab");
        assert_eq!(lx.peek().unwrap(), Some(b'a'));
        assert_eq!(lx.peek().unwrap(), Some(b'a'));
        lx.advance();
        assert_eq!(lx.next_byte().unwrap(), Some(b'b'));
        assert_eq!(lx.next_byte().unwrap(), None);
        assert_eq!(lx.offset(), 2);
    }

    #[test]
    fn whitespace_eof_depends_on_terminator() {
        let mut lx = lexer(b" \t\r\n");
        assert!(matches!(
            lx.skip_whitespace(Terminator::RequireSeparator),
            Err(PnmError::UnexpectedEof)
        ));

        let mut lx = lexer(b" \t\r\n");
        lx.skip_whitespace(Terminator::AllowEndOfStream).unwrap();
        assert_eq!(lx.peek().unwrap(), None);
    }

    #[test]
    fn vertical_tab_separates() {
        let mut lx = lexer(b"3\x0b\x0b4");
        assert_eq!(
            lx.read_ascii_sample(None, Terminator::RequireSeparator)
                .unwrap(),
            3
        );
        assert_eq!(lx.peek().unwrap(), Some(b'4'));
    }

    #[test]
    fn whitespace_stops_on_data() {
        let mut lx = lexer(b"  \n7");
        lx.skip_whitespace(Terminator::RequireSeparator).unwrap();
        assert_eq!(lx.peek().unwrap(), Some(b'7'));
    }

    #[test]
    fn comments_skipped_until_digit() {
        let mut lx = lexer(b" # one\n\t# two  \n  42");
        lx.skip_comments().unwrap();
        assert_eq!(lx.read_decimal(None).unwrap(), 42);
    }

    #[test]
    fn comment_directly_after_token() {
        let mut lx = lexer(b"#x\n5");
        lx.skip_comments().unwrap();
        assert_eq!(lx.peek().unwrap(), Some(b'5'));
    }

    #[test]
    fn stray_byte_in_header_is_malformed() {
        let mut lx = lexer(b"  x 10");
        assert!(matches!(
            lx.skip_comments(),
            Err(PnmError::MalformedHeader(_))
        ));
    }

    #[test]
    fn unterminated_comment_is_eof() {
        let mut lx = lexer(b" # no newline");
        assert!(matches!(lx.skip_comments(), Err(PnmError::UnexpectedEof)));
    }

    #[test]
    fn binary_sample_bounds() {
        let mut lx = lexer(&[10, 200]);
        assert_eq!(lx.read_binary_sample(100).unwrap(), 10);
        match lx.read_binary_sample(100) {
            Err(PnmError::SampleOutOfRange { value: 200, max: 100 }) => {}
            other => panic!("expected SampleOutOfRange, got {other:?}"),
        }
        assert!(matches!(
            lx.read_binary_sample(255),
            Err(PnmError::UnexpectedEof)
        ));
    }

    #[test]
    fn binary_sample_may_be_whitespace_code() {
        let mut lx = lexer(b" \n");
        assert_eq!(lx.read_binary_sample(255).unwrap(), b' ');
        assert_eq!(lx.read_binary_sample(255).unwrap(), b'\n');
    }

    #[test]
    fn ascii_sample_consumes_separator() {
        let mut lx = lexer(b"12   34\n");
        assert_eq!(
            lx.read_ascii_sample(Some(255), Terminator::RequireSeparator)
                .unwrap(),
            12
        );
        assert_eq!(lx.peek().unwrap(), Some(b'3'));
        assert_eq!(
            lx.read_ascii_sample(Some(255), Terminator::AllowEndOfStream)
                .unwrap(),
            34
        );
        assert_eq!(lx.peek().unwrap(), None);
    }

    #[test]
    fn last_sample_without_trailing_whitespace() {
        let mut lx = lexer(b"255");
        assert_eq!(
            lx.read_ascii_sample(Some(255), Terminator::AllowEndOfStream)
                .unwrap(),
            255
        );
    }

    #[test]
    fn truncated_before_last_sample() {
        let mut lx = lexer(b"255");
        assert!(matches!(
            lx.read_ascii_sample(Some(255), Terminator::RequireSeparator),
            Err(PnmError::UnexpectedEof)
        ));

        let mut lx = lexer(b"");
        assert!(matches!(
            lx.read_ascii_sample(Some(255), Terminator::AllowEndOfStream),
            Err(PnmError::UnexpectedEof)
        ));
    }

    #[test]
    fn non_digit_rejected() {
        let mut lx = lexer(b"1a2 ");
        assert!(matches!(
            lx.read_ascii_sample(None, Terminator::RequireSeparator),
            Err(PnmError::InvalidDigit(b'a'))
        ));
        let mut lx = lexer(b"-1 ");
        assert!(matches!(
            lx.read_decimal(None),
            Err(PnmError::InvalidDigit(b'-'))
        ));
    }

    #[test]
    fn ascii_sample_bounds() {
        let mut lx = lexer(b"256 ");
        match lx.read_ascii_sample(Some(255), Terminator::RequireSeparator) {
            Err(PnmError::SampleOutOfRange { value: 256, max: 255 }) => {}
            other => panic!("expected SampleOutOfRange, got {other:?}"),
        }
        let mut lx = lexer(b"2 ");
        assert!(matches!(
            lx.read_ascii_sample(Some(1), Terminator::RequireSeparator),
            Err(PnmError::SampleOutOfRange { value: 2, max: 1 })
        ));
    }

    #[test]
    fn unbounded_overflow_is_malformed() {
        let mut lx = lexer(b"99999999999 ");
        assert!(matches!(
            lx.read_decimal(None),
            Err(PnmError::MalformedHeader(_))
        ));
        let mut lx = lexer(b"4294967295 ");
        assert_eq!(lx.read_decimal(None).unwrap(), u32::MAX);
    }

    #[test]
    fn leading_zeros_accepted() {
        let mut lx = lexer(b"007 ");
        assert_eq!(lx.read_decimal(Some(7)).unwrap(), 7);
    }
}
