//! Custom field codecs
//!
//! A type that knows its own wire form implements [`FixedCodec`] and is
//! registered with [`impl_codec_field!`](crate::impl_codec_field). The engine
//! then hands it the raw span on decode and writes its bytes verbatim on
//! encode, bypassing padding, alignment and kind-based parsing.
//!
//! Either method may be left out; using the missing direction fails with
//! `Error::UnsupportedKind`.
//!
//! ```
//! use fixedwidth_core::{impl_codec_field, BoxError, FixedCodec};
//!
//! /// Packed yes/no flag
//! #[derive(Debug, Default, PartialEq)]
//! struct Flag(bool);
//!
//! impl FixedCodec for Flag {
//!     fn encode_fixed(&self) -> Result<Vec<u8>, BoxError> {
//!         Ok(if self.0 { b"Y".to_vec() } else { b"N".to_vec() })
//!     }
//!
//!     fn decode_fixed(&mut self, data: &[u8]) -> Result<(), BoxError> {
//!         self.0 = match data {
//!             b"Y" => true,
//!             b"N" => false,
//!             other => return Err(format!("bad flag {:?}", other).into()),
//!         };
//!         Ok(())
//!     }
//! }
//!
//! impl_codec_field!(Flag);
//! ```

use std::fmt;

use crate::descriptor::FieldDescriptor;
use crate::error::{BoxError, Error, Result};
use crate::marshal::Encoder;
use crate::unmarshal::Decoder;

/// Marker error returned by the default `FixedCodec` methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unimplemented;

impl fmt::Display for Unimplemented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "codec direction not implemented")
    }
}

impl std::error::Error for Unimplemented {}

/// Capability of a field type to encode and decode itself
pub trait FixedCodec: Default {
    /// Produce the field's bytes; written without padding
    fn encode_fixed(&self) -> std::result::Result<Vec<u8>, BoxError> {
        Err(Box::new(Unimplemented))
    }

    /// Populate `self` from the field's span
    ///
    /// The span is exactly the declared `len`; the codec decides what an
    /// empty or all-pad span means.
    fn decode_fixed(&mut self, _data: &[u8]) -> std::result::Result<(), BoxError> {
        Err(Box::new(Unimplemented))
    }
}

fn codec_error(field: &'static str, direction: &str, source: BoxError) -> Error {
    if source.downcast_ref::<Unimplemented>().is_some() {
        return Error::UnsupportedKind {
            field,
            reason: format!("custom codec does not implement {}", direction),
        };
    }
    Error::Codec { field, source }
}

/// Encode a custom codec value
pub fn encode_custom<C: FixedCodec>(
    value: &C,
    desc: &FieldDescriptor,
    enc: &mut Encoder<'_>,
) -> Result<()> {
    let bytes = value
        .encode_fixed()
        .map_err(|e| codec_error(desc.name(), "encode_fixed", e))?;
    enc.write_verbatim(desc, &bytes)
}

/// Decode a custom codec value from the next `len` bytes
pub fn decode_custom<C: FixedCodec>(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<C>> {
    let span = dec.take(desc.name(), desc.width())?;
    let mut value = C::default();
    value
        .decode_fixed(span)
        .map_err(|e| codec_error(desc.name(), "decode_fixed", e))?;
    Ok(Some(value))
}

/// Register [`FixedCodec`] types as field types
#[macro_export]
macro_rules! impl_codec_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FixedField for $ty {
                const KIND: $crate::FieldKind = $crate::FieldKind::Custom;

                fn zero() -> Self {
                    <$ty as ::core::default::Default>::default()
                }

                fn encode(
                    &self,
                    desc: &$crate::FieldDescriptor,
                    enc: &mut $crate::Encoder<'_>,
                ) -> $crate::Result<()> {
                    $crate::codec::encode_custom(self, desc, enc)
                }

                fn decode(
                    desc: &$crate::FieldDescriptor,
                    dec: &mut $crate::Decoder<'_>,
                ) -> $crate::Result<::core::option::Option<Self>> {
                    $crate::codec::decode_custom::<$ty>(desc, dec)
                }
            }
        )+
    };
}
