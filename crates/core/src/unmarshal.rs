//! Unmarshal engine
//!
//! A [`Decoder`] owns the read cursor for one call. Each declared field
//! takes exactly its width from the cursor; nested records keep reading from
//! the same decoder, so offsets stay sequential with no gaps or overlap.
//! Fields are assigned as soon as they decode: when a field fails, the ones
//! before it are populated and the ones after it are untouched.

use tracing::{debug, trace};

use crate::config::{AbsentPolicy, CodecConfig};
use crate::error::{Error, Result};
use crate::field::FixedField;
use crate::record::{record_width, FieldSpec, Record};

/// Read cursor threaded through one unmarshal call
#[derive(Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    cursor: usize,
    config: &'a CodecConfig,
}

impl<'a> Decoder<'a> {
    /// Start decoding at offset 0
    pub fn new(data: &'a [u8], config: &'a CodecConfig) -> Self {
        Decoder {
            data,
            cursor: 0,
            config,
        }
    }

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &'a CodecConfig {
        self.config
    }

    /// Current offset into the input
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes left after the cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Look at the next `len` bytes without consuming them
    ///
    /// # Errors
    ///
    /// Returns `Error::ShortBuffer` if fewer than `len` bytes remain.
    pub fn peek(&self, field: &'static str, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::ShortBuffer {
                field,
                offset: self.cursor,
                needed: len,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.cursor..self.cursor + len])
    }

    /// Consume the next `len` bytes
    pub fn take(&mut self, field: &'static str, len: usize) -> Result<&'a [u8]> {
        let span = self.peek(field, len)?;
        self.cursor += len;
        Ok(span)
    }

    /// Decode one declared field into `slot`
    pub fn field<T: FixedField>(&mut self, spec: &FieldSpec, slot: &mut T) -> Result<()> {
        debug_assert_eq!(spec.kind, T::KIND, "field table kind for `{}`", spec.name);
        let desc = spec.descriptor()?;
        let offset = self.cursor;
        if !T::decode_into(slot, &desc, self)? {
            match self.config.absent_policy {
                AbsentPolicy::Reset => *slot = T::zero(),
                AbsentPolicy::Keep => {}
            }
        }
        trace!(
            field = spec.name,
            offset,
            width = self.cursor - offset,
            "decoded field"
        );
        Ok(())
    }
}

/// Decode `data` into `dest` with the default configuration
///
/// # Errors
///
/// Returns the first error raised by any field, in declaration order. Fields
/// after the failing one keep their previous values.
pub fn unmarshal<R: Record>(data: &[u8], dest: &mut R) -> Result<()> {
    unmarshal_with(data, dest, &CodecConfig::default())
}

/// Decode `data` into `dest` with an explicit configuration
///
/// In strict mode oversized input is rejected before any field is touched.
pub fn unmarshal_with<R: Record>(data: &[u8], dest: &mut R, config: &CodecConfig) -> Result<()> {
    if config.strict_width {
        let width = record_width::<R>()?;
        if data.len() > width {
            return Err(Error::TrailingBytes {
                width,
                actual: data.len(),
            });
        }
    }

    let mut dec = Decoder::new(data, config);
    dest.decode_fields(&mut dec)?;

    if dec.remaining() > 0 {
        debug!(
            record = std::any::type_name::<R>(),
            ignored = dec.remaining(),
            "ignoring trailing bytes"
        );
    }
    debug!(
        record = std::any::type_name::<R>(),
        bytes = dec.position(),
        "unmarshalled record"
    );
    Ok(())
}

/// Decode a fresh record from `data`
pub fn from_bytes<R: Record>(data: &[u8]) -> Result<R> {
    from_bytes_with(data, &CodecConfig::default())
}

/// Decode a fresh record from `data` with an explicit configuration
pub fn from_bytes_with<R: Record>(data: &[u8], config: &CodecConfig) -> Result<R> {
    let mut record = R::default();
    unmarshal_with(data, &mut record, config)?;
    Ok(record)
}
