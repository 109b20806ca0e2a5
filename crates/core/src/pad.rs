//! Width normalization
//!
//! Pure functions that fit content into an exact byte width. The fill
//! sequence may be several bytes long; it is cycled from its first byte and
//! cut to the number of bytes needed. Content wider than the target loses
//! the bytes on the side opposite the alignment:
//!
//! ```
//! use fixedwidth_core::pad::{pad_left, pad_right};
//!
//! assert_eq!(pad_left(b"1", b"0", 4), b"0001");
//! assert_eq!(pad_right(b"TEST", b" ", 8), b"TEST    ");
//! assert_eq!(pad_left(b"12345", b"0", 3), b"345");
//! assert_eq!(pad_right(b"12345", b" ", 3), b"123");
//! ```

use crate::descriptor::Align;

/// Build `count` bytes by cycling `pad`
///
/// An empty `pad` yields nothing rather than looping.
fn fill(pad: &[u8], count: usize) -> impl Iterator<Item = u8> + '_ {
    pad.iter().copied().cycle().take(count)
}

/// Right-align `content` in `width` bytes, filling on the left
pub fn pad_left(content: &[u8], pad: &[u8], width: usize) -> Vec<u8> {
    if content.len() >= width {
        return content[content.len() - width..].to_vec();
    }
    let mut out = Vec::with_capacity(width);
    out.extend(fill(pad, width - content.len()));
    out.extend_from_slice(content);
    out
}

/// Left-align `content` in `width` bytes, filling on the right
pub fn pad_right(content: &[u8], pad: &[u8], width: usize) -> Vec<u8> {
    if content.len() >= width {
        return content[..width].to_vec();
    }
    let mut out = Vec::with_capacity(width);
    out.extend_from_slice(content);
    out.extend(fill(pad, width - content.len()));
    out
}

/// Dispatch to [`pad_right`] for left alignment and [`pad_left`] for right
#[inline]
pub fn align_and_pad(align: Align, content: &[u8], pad: &[u8], width: usize) -> Vec<u8> {
    match align {
        Align::Left => pad_right(content, pad, width),
        Align::Right => pad_left(content, pad, width),
    }
}

/// Strip pad bytes from the padded side of a span
///
/// Right-aligned spans lose leading pad bytes, left-aligned spans lose
/// trailing ones. Any byte occurring in `pad` counts as padding, which
/// covers partial repetitions of a multi-byte sequence.
pub fn trim_pad<'a>(span: &'a [u8], pad: &[u8], align: Align) -> &'a [u8] {
    let is_pad = |b: &u8| pad.contains(b);
    match align {
        Align::Right => {
            let start = span.iter().position(|b| !is_pad(b)).unwrap_or(span.len());
            &span[start..]
        }
        Align::Left => {
            let end = span.iter().rposition(|b| !is_pad(b)).map_or(0, |i| i + 1);
            &span[..end]
        }
    }
}

/// Whether the span holds nothing but pad bytes
#[inline]
pub fn is_all_pad(span: &[u8], pad: &[u8]) -> bool {
    span.iter().all(|b| pad.contains(b))
}
