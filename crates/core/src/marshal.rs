//! Marshal engine
//!
//! Walks a record's field table in declaration order and appends each
//! field's encoding to an [`Encoder`]. Nested records write into the same
//! encoder, so the output is the plain concatenation of every declared span.

use tracing::{debug, trace, warn};

use crate::config::CodecConfig;
use crate::descriptor::FieldDescriptor;
use crate::error::{Error, Result};
use crate::field::FixedField;
use crate::record::{FieldSpec, Record};

/// Output accumulator threaded through one marshal call
#[derive(Debug)]
pub struct Encoder<'a> {
    buf: Vec<u8>,
    config: &'a CodecConfig,
}

impl<'a> Encoder<'a> {
    /// Create an empty encoder
    pub fn new(config: &'a CodecConfig) -> Self {
        Encoder {
            buf: Vec::new(),
            config,
        }
    }

    /// Create an encoder with room for `capacity` bytes
    pub fn with_capacity(config: &'a CodecConfig, capacity: usize) -> Self {
        Encoder {
            buf: Vec::with_capacity(capacity),
            config,
        }
    }

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &'a CodecConfig {
        self.config
    }

    /// Bytes written so far
    #[inline]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Append bytes as they are
    #[inline]
    pub fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append bytes that are expected to fill the field's span exactly
    ///
    /// Temporal and custom encodings are never re-padded. A length mismatch
    /// fails with `Error::WidthMismatch` in strict mode and is logged otherwise.
    pub fn write_verbatim(&mut self, desc: &FieldDescriptor, bytes: &[u8]) -> Result<()> {
        if bytes.len() != desc.width() {
            if self.config.strict_width {
                return Err(Error::WidthMismatch {
                    field: desc.name(),
                    width: desc.width(),
                    actual: bytes.len(),
                });
            }
            warn!(
                field = desc.name(),
                declared = desc.width(),
                actual = bytes.len(),
                "encoded width differs from declared width"
            );
        }
        self.write(bytes);
        Ok(())
    }

    /// Reject content wider than the span when strict width checking is on
    pub fn check_fits(&self, desc: &FieldDescriptor, actual: usize) -> Result<()> {
        if self.config.strict_width && actual > desc.width() {
            return Err(Error::OversizeValue {
                field: desc.name(),
                width: desc.width(),
                actual,
            });
        }
        Ok(())
    }

    /// Encode one declared field
    pub fn field<T: FixedField>(&mut self, spec: &FieldSpec, value: &T) -> Result<()> {
        debug_assert_eq!(spec.kind, T::KIND, "field table kind for `{}`", spec.name);
        let desc = spec.descriptor()?;
        let offset = self.position();
        value.encode(&desc, self)?;
        trace!(
            field = spec.name,
            offset,
            width = self.position() - offset,
            "encoded field"
        );
        Ok(())
    }

    /// Finish and return the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode a record with the default configuration
///
/// # Errors
///
/// Returns the first error raised by any field, in declaration order.
pub fn marshal<R: Record>(record: &R) -> Result<Vec<u8>> {
    marshal_with(record, &CodecConfig::default())
}

/// Encode a record with an explicit configuration
pub fn marshal_with<R: Record>(record: &R, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut enc = Encoder::new(config);
    record.encode_fields(&mut enc)?;
    let out = enc.into_bytes();
    debug!(
        record = std::any::type_name::<R>(),
        bytes = out.len(),
        "marshalled record"
    );
    Ok(out)
}
