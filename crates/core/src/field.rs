//! Field kinds and their encode/decode rules
//!
//! Every type that can appear in a record implements [`FixedField`]. The
//! implementations here cover integers, text, raw bytes and the `Option`
//! envelope; temporal values live in [`crate::temporal`], nested records and
//! custom codecs are registered with `impl_record_field!` and
//! `impl_codec_field!`.
//!
//! ## Absence
//!
//! `decode` returns `Ok(None)` when the span carries no value. The decoder
//! turns that into `None` for optional fields and applies the configured
//! [`AbsentPolicy`](crate::config::AbsentPolicy) to everything else.

use crate::config::DigitCase;
use crate::descriptor::{Align, FieldDescriptor, FieldKind};
use crate::error::{Error, Result};
use crate::marshal::Encoder;
use crate::pad::{align_and_pad, is_all_pad, pad_right, trim_pad};
use crate::unmarshal::Decoder;

/// A type with a fixed-width encoding
pub trait FixedField: Sized {
    /// Dispatch category; selects descriptor defaults
    const KIND: FieldKind;

    /// Value an absent non-optional field is reset to
    fn zero() -> Self;

    /// Bytes the field occupies for the given descriptor
    ///
    /// Scalars occupy `desc.width()`; nested records report their own width.
    fn width(desc: &FieldDescriptor) -> Result<usize> {
        Ok(desc.width())
    }

    /// Append the encoding of `self` to the encoder
    fn encode(&self, desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()>;

    /// Append the encoding of an absent value
    ///
    /// Defaults to `width` bytes of the descriptor's pad, which for a zero-padded
    /// integer is the same as encoding nothing at all.
    fn encode_absent(desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()> {
        let width = Self::width(desc)?;
        enc.write(&align_and_pad(desc.align(), b"", desc.pad(), width));
        Ok(())
    }

    /// Consume this field's span from the decoder
    ///
    /// Returns `Ok(None)` when the span holds no value.
    fn decode(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<Self>>;

    /// Decode inside an `Option` envelope
    ///
    /// Same as [`FixedField::decode`] unless the kind has a value that is only
    /// absent when optional (an all-pad byte span).
    fn decode_optional(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<Self>> {
        Self::decode(desc, dec)
    }

    /// Decode into an existing value
    ///
    /// Returns `Ok(false)` when the span holds no value; `slot` is then left
    /// for the caller's absent policy. Nested records override this to decode
    /// field by field, so the policy also applies to their inner fields.
    fn decode_into(slot: &mut Self, desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<bool> {
        match Self::decode(desc, dec)? {
            Some(value) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// =========================================================================
// Integers
// =========================================================================

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_BASE: u32 = 36;

fn checked_base(desc: &FieldDescriptor) -> Result<u32> {
    let base = desc.base();
    if base > MAX_BASE {
        return Err(Error::invalid_number(
            desc.name(),
            format!("base {} is outside 2..={}", base, MAX_BASE),
        ));
    }
    Ok(base)
}

/// Render `value` in `base` (2..=36)
pub(crate) fn format_radix(value: i128, base: u32, case: DigitCase) -> String {
    if base == 10 {
        return value.to_string();
    }
    let base = u128::from(base);
    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::new();
    loop {
        let digit = DIGITS[(magnitude % base) as usize];
        digits.push(match case {
            DigitCase::Upper => digit.to_ascii_uppercase(),
            DigitCase::Lower => digit,
        });
        magnitude /= base;
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.reverse();
    // Only ASCII was pushed
    digits.into_iter().map(char::from).collect()
}

fn encode_integer(value: i128, desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()> {
    let base = checked_base(desc)?;
    let digits = format_radix(value, base, enc.config().digit_case);
    enc.check_fits(desc, digits.len())?;
    enc.write(&align_and_pad(
        desc.align(),
        digits.as_bytes(),
        desc.pad(),
        desc.width(),
    ));
    Ok(())
}

fn decode_integer(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<i128>> {
    let base = checked_base(desc)?;
    let span = dec.take(desc.name(), desc.width())?;
    if span.first() == Some(&0) {
        return Ok(None);
    }

    let mut digits = trim_pad(span, desc.pad(), desc.align());
    if digits.is_empty() {
        // An all-pad span is a present value only if the pad itself reads as
        // a number ("0000"); otherwise ("    ") the field is absent.
        return Ok(std::str::from_utf8(span)
            .ok()
            .and_then(|text| i128::from_str_radix(text, base).ok()));
    }
    let pad_is_digit = desc
        .pad()
        .iter()
        .any(|b| char::from(*b).is_digit(base));
    if !pad_is_digit {
        let opposite = match desc.align() {
            Align::Left => Align::Right,
            Align::Right => Align::Left,
        };
        digits = trim_pad(digits, desc.pad(), opposite);
    }

    let text = std::str::from_utf8(digits).map_err(|e| Error::invalid_number(desc.name(), e))?;
    i128::from_str_radix(text, base).map(Some).map_err(|e| {
        Error::invalid_number(
            desc.name(),
            format!("`{}` is not a base-{} integer: {}", text, base, e),
        )
    })
}

macro_rules! impl_integer_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedField for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn zero() -> Self {
                    0
                }

                fn encode(&self, desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()> {
                    encode_integer(*self as i128, desc, enc)
                }

                fn decode(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<Self>> {
                    match decode_integer(desc, dec)? {
                        Some(value) => <$ty>::try_from(value).map(Some).map_err(|_| {
                            Error::invalid_number(
                                desc.name(),
                                format!("{} is out of range for {}", value, stringify!($ty)),
                            )
                        }),
                        None => Ok(None),
                    }
                }
            }
        )*
    };
}

impl_integer_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// =========================================================================
// Text
// =========================================================================

/// Cut `text` to at most `width` bytes without splitting a character
///
/// Left-aligned text keeps its head, right-aligned text its tail; the
/// freed bytes are filled with pad like any short value.
fn fit_text(text: &str, width: usize, align: Align) -> &str {
    if text.len() <= width {
        return text;
    }
    match align {
        Align::Left => {
            let end = (0..=width)
                .rev()
                .find(|&i| text.is_char_boundary(i))
                .unwrap_or(0);
            &text[..end]
        }
        Align::Right => {
            let start = (text.len() - width..=text.len())
                .find(|&i| text.is_char_boundary(i))
                .unwrap_or(text.len());
            &text[start..]
        }
    }
}

impl FixedField for String {
    const KIND: FieldKind = FieldKind::Text;

    fn zero() -> Self {
        String::new()
    }

    fn encode(&self, desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()> {
        enc.check_fits(desc, self.len())?;
        enc.write(&align_and_pad(
            desc.align(),
            fit_text(self, desc.width(), desc.align()).as_bytes(),
            desc.pad(),
            desc.width(),
        ));
        Ok(())
    }

    fn decode(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<Self>> {
        let span = dec.take(desc.name(), desc.width())?;
        if span.first() == Some(&0) {
            return Ok(None);
        }
        let text = trim_pad(span, desc.pad(), desc.align());
        if text.is_empty() {
            return Ok(None);
        }
        std::str::from_utf8(text)
            .map(|s| Some(s.to_owned()))
            .map_err(|e| Error::InvalidText {
                field: desc.name(),
                reason: e.to_string(),
            })
    }
}

// =========================================================================
// Raw bytes
// =========================================================================

impl FixedField for Vec<u8> {
    const KIND: FieldKind = FieldKind::Bytes;

    fn zero() -> Self {
        Vec::new()
    }

    fn encode(&self, desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()> {
        if self.len() > desc.width() {
            return Err(Error::OversizeValue {
                field: desc.name(),
                width: desc.width(),
                actual: self.len(),
            });
        }
        let mut span = pad_right(b"", desc.pad(), desc.width());
        span[..self.len()].copy_from_slice(self);
        enc.write(&span);
        Ok(())
    }

    fn decode(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<Self>> {
        dec.take(desc.name(), desc.width()).map(|span| Some(span.to_vec()))
    }

    fn decode_optional(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<Self>> {
        let span = dec.take(desc.name(), desc.width())?;
        if is_all_pad(span, desc.pad()) {
            return Ok(None);
        }
        Ok(Some(span.to_vec()))
    }
}

// =========================================================================
// Optional envelope
// =========================================================================

impl<T: FixedField> FixedField for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn zero() -> Self {
        None
    }

    fn width(desc: &FieldDescriptor) -> Result<usize> {
        T::width(desc)
    }

    fn encode(&self, desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()> {
        match self {
            Some(value) => value.encode(desc, enc),
            None => T::encode_absent(desc, enc),
        }
    }

    fn encode_absent(desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()> {
        T::encode_absent(desc, enc)
    }

    fn decode(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<Self>> {
        // Absence is a value for an optional field, never a reason to keep the old one
        T::decode_optional(desc, dec).map(Some)
    }

    fn decode_into(slot: &mut Self, desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<bool> {
        match slot {
            // A present nested record is updated in place
            Some(inner) if T::KIND == FieldKind::Record => {
                if !T::decode_into(inner, desc, dec)? {
                    *slot = None;
                }
            }
            _ => *slot = T::decode_optional(desc, dec)?,
        }
        Ok(true)
    }
}
