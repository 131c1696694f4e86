//! Run-length compression of pixel bit streams.
//!
//! The stream starts with the value of the first run as a literal bit.
//! Every run length `n` then follows as an Elias-gamma code: `k - 1` zero
//! bits, then the `k` bit binary form of `n`, most significant bit first.
//! The leading 1 of the binary form terminates the zero prefix, so no
//! separators are needed. The decoder flips the current color after each
//! run.
//!
//! ```text
//! bits   1 1 1 1 1 0 0 1
//! runs   (1, 5) (0, 2) (1, 1)
//! coded  1 | 0 0 1 0 1 | 0 1 0 | 1
//! ```

use log::debug;

use crate::{Bits, BITS_PER_FRAME};

/// Compression type announced in the parameters frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Raw,
    RunLength,
}

impl Compression {
    pub fn code(self) -> u8 {
        match self {
            Self::Raw => 0x00,
            Self::RunLength => 0x02,
        }
    }
}

/// Iterator over the maximal runs of a bit sequence as `(value, length)`.
pub struct Runs<'a> {
    bits: &'a [bool],
}

impl<'a> Iterator for Runs<'a> {
    type Item = (bool, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let value = *self.bits.first()?;
        let len = self
            .bits
            .iter()
            .position(|&b| b != value)
            .unwrap_or(self.bits.len());
        self.bits = &self.bits[len..];
        Some((value, len))
    }
}

pub fn runs(bits: &[bool]) -> Runs<'_> {
    Runs { bits }
}

/// Append the Elias-gamma code of `n` to `out`.
///
/// `n` must be at least 1.
pub fn gamma(n: usize, out: &mut Bits) {
    debug_assert!(n >= 1, "run lengths start at 1");

    let k = (usize::BITS - n.leading_zeros()) as usize;
    out.extend(std::iter::repeat(false).take(k - 1));
    out.extend((0..k).rev().map(|i| (n >> i) & 1 == 1));
}

/// Run-length encode a bit sequence. An empty input gives an empty output.
pub fn compress(bits: &[bool]) -> Bits {
    let mut out = Bits::new();
    if let Some(&first) = bits.first() {
        out.push(first);
        for (_, len) in runs(bits) {
            gamma(len, &mut out);
        }
    }
    out
}

/// Reverse of [`compress`].
///
/// Decoding stops when the remaining bits can not hold a complete length
/// code, so trailing zero padding is ignored.
pub fn decompress(coded: &[bool]) -> Bits {
    let mut out = Bits::new();
    let (&first, mut rest) = match coded.split_first() {
        Some(split) => split,
        None => return out,
    };
    let mut value = first;

    loop {
        let zeros = match rest.iter().position(|&b| b) {
            Some(zeros) => zeros,
            None => break,
        };
        if rest.len() < zeros * 2 + 1 {
            break;
        }
        let len = rest[zeros..zeros * 2 + 1]
            .iter()
            .fold(0usize, |acc, &b| (acc << 1) | b as usize);
        out.extend(std::iter::repeat(value).take(len));
        value = !value;
        rest = &rest[zeros * 2 + 1..];
    }
    out
}

/// Pick the shorter of the raw and compressed stream.
///
/// The compressed stream is used only when it is strictly shorter.
pub fn select(raw: Bits) -> (Compression, Bits) {
    let compressed = compress(&raw);
    debug!(
        "raw stream {} bits, compressed stream {} bits",
        raw.len(),
        compressed.len()
    );
    if compressed.len() < raw.len() {
        (Compression::RunLength, compressed)
    } else {
        (Compression::Raw, raw)
    }
}

/// Zero pad a stream to a whole number of data frames.
pub fn pad(bits: &mut Bits) {
    let rem = bits.len() % BITS_PER_FRAME;
    if rem != 0 {
        bits.resize(bits.len() + BITS_PER_FRAME - rem, false);
    }
}
