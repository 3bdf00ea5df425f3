//! The twin buffer: two fixed-size halves fed from a [`Read`], with
//! lookahead retraction bounded to two characters.
//!
//! Ported from `original_source/lexer.c`'s `fetchNextChar`/`getStream`
//! pair, which keeps two `BUFFER_SIZE`-byte halves in one flat array and
//! refills whichever half the forward pointer just left, planting a
//! sentinel so the scanner notices end-of-buffer without a bounds check
//! on every character. The sentinel here is `None` (end of input) rather
//! than a null byte, since Rust gives us `Option<u8>` for free; the
//! refill-on-crossing and double-retraction arithmetic are otherwise
//! unchanged.

use std::io::{self, Read};

/// Size of one half of the twin buffer, in bytes.
pub const BUF: usize = 256;

/// Reads a byte source through two `BUF`-byte halves, refilling one half
/// at a time as the read cursor crosses into it, and supporting retraction
/// of up to two characters (the deepest lookahead any DFA state in
/// [`crate::lexer::Lexer`] needs).
pub struct TwinBuffer<R: Read> {
    reader: R,
    halves: [Vec<u8>; 2],
    /// Number of valid bytes in each half (less than `BUF` only for the
    /// half that hit end-of-file).
    filled: [usize; 2],
    eof_half: Option<usize>,
    /// Absolute position of the next character to read, counted from the
    /// start of the logical stream.
    pos: usize,
    /// Furthest absolute position ever reached by a successful read. A
    /// half is only refilled the first time `pos` arrives at its boundary
    /// (`pos == high_water`); a boundary revisited after a retract finds
    /// the half's contents untouched.
    high_water: usize,
}

impl<R: Read> TwinBuffer<R> {
    pub fn new(reader: R) -> io::Result<Self> {
        let mut buffer = TwinBuffer {
            reader,
            halves: [vec![0u8; BUF], vec![0u8; BUF]],
            filled: [0, 0],
            eof_half: None,
            pos: 0,
            high_water: 0,
        };
        buffer.fill_half(0)?;
        Ok(buffer)
    }

    fn fill_half(&mut self, half: usize) -> io::Result<()> {
        let mut total = 0;
        while total < BUF {
            let n = self.reader.read(&mut self.halves[half][total..])?;
            if n == 0 {
                self.eof_half = Some(half);
                break;
            }
            total += n;
        }
        self.filled[half] = total;
        Ok(())
    }

    /// Reads and consumes the next character, refilling the other half the
    /// instant the cursor crosses a buffer boundary, exactly as
    /// `fetchNextChar` does.
    pub fn next_char(&mut self) -> io::Result<Option<u8>> {
        let half = (self.pos / BUF) % 2;
        let offset = self.pos % BUF;

        if offset == 0
            && self.pos >= BUF
            && self.pos == self.high_water
            && Some(half) != self.eof_half
        {
            self.fill_half(half)?;
        }

        if Some(half) == self.eof_half && offset >= self.filled[half] {
            return Ok(None);
        }

        let byte = self.halves[half][offset];
        self.pos += 1;
        if self.pos > self.high_water {
            self.high_water = self.pos;
        }
        Ok(Some(byte))
    }

    /// Un-reads the last `count` characters. Callers retract one or two
    /// characters at a time, occasionally in succession when a multi-char
    /// lookahead turns out not to match (e.g. a numeral's fractional part
    /// falling short of two digits) — never further back than a buffer
    /// half holds, which is the same bound `fetchNextChar`'s retract arm
    /// enforces by never letting the backward pointer lap the forward one.
    pub fn retract(&mut self, count: usize) {
        debug_assert!(count <= BUF);
        self.pos = self.pos.saturating_sub(count);
    }

    /// 1-based position within the current line, for error-column style
    /// diagnostics if ever needed; not required by spec.md's diagnostic
    /// shapes today but kept since callers may want it for future
    /// reporting without re-deriving buffer offsets.
    pub fn position(&self) -> usize {
        self.pos
    }
}
