//! Record descriptions
//!
//! A record is described by a constant table of [`FieldSpec`] entries, one per
//! annotated field, in declaration order. `#[derive(Record)]` writes the
//! table and the two traversal methods; a hand-written implementation looks
//! the same:
//!
//! ```
//! use fixedwidth_core::{Decoder, Encoder, FieldSpec, Record, Result};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Header {
//!     batch: u32,
//!     origin: String,
//! }
//!
//! impl Record for Header {
//!     const FIELDS: &'static [FieldSpec] = &[
//!         FieldSpec::of::<u32>("batch", "len:5"),
//!         FieldSpec::of::<String>("origin", "len:6"),
//!     ];
//!
//!     fn encode_fields(&self, enc: &mut Encoder<'_>) -> Result<()> {
//!         enc.field(&Self::FIELDS[0], &self.batch)?;
//!         enc.field(&Self::FIELDS[1], &self.origin)
//!     }
//!
//!     fn decode_fields(&mut self, dec: &mut Decoder<'_>) -> Result<()> {
//!         dec.field(&Self::FIELDS[0], &mut self.batch)?;
//!         dec.field(&Self::FIELDS[1], &mut self.origin)
//!     }
//! }
//!
//! let bytes = fixedwidth_core::marshal(&Header { batch: 17, origin: "NYC".into() }).unwrap();
//! assert_eq!(bytes, b"00017NYC   ");
//! assert_eq!(fixedwidth_core::record_width::<Header>().unwrap(), 11);
//! ```

use std::fmt;

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::error::{Error, Result};
use crate::field::FixedField;
use crate::marshal::Encoder;
use crate::pad::is_all_pad;
use crate::unmarshal::Decoder;

/// One entry of a record's field table
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// Field name, used in errors and logs
    pub name: &'static str,
    /// Raw annotation, e.g. `"len:8,format:%m%d%Y"`
    pub tag: &'static str,
    /// Kind of the field's type
    pub kind: FieldKind,
    /// Width of the field's type for a parsed descriptor
    pub width: fn(&FieldDescriptor) -> Result<usize>,
}

impl FieldSpec {
    /// Table entry for a field of type `T`
    pub const fn of<T: FixedField>(name: &'static str, tag: &'static str) -> Self {
        FieldSpec {
            name,
            tag,
            kind: T::KIND,
            width: T::width,
        }
    }

    /// Parse the annotation
    pub fn descriptor(&self) -> Result<FieldDescriptor> {
        FieldDescriptor::parse(self.name, self.tag, self.kind)
    }

    /// Bytes the field occupies
    pub fn width(&self) -> Result<usize> {
        (self.width)(&self.descriptor()?)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A fixed-width record shape
///
/// `Default` supplies the zero value used when a nested record is absent and
/// the starting point of [`from_bytes`](crate::from_bytes).
pub trait Record: Default {
    /// Annotated fields in declaration order
    const FIELDS: &'static [FieldSpec];

    /// Encode every field of [`Record::FIELDS`] in order
    fn encode_fields(&self, enc: &mut Encoder<'_>) -> Result<()>;

    /// Decode every field of [`Record::FIELDS`] in order
    fn decode_fields(&mut self, dec: &mut Decoder<'_>) -> Result<()>;
}

/// Total encoded width of a record: the sum of its fields' widths
///
/// # Errors
///
/// Returns `Error::InvalidTag` if any annotation, including those of nested
/// records, fails to parse.
pub fn record_width<R: Record>() -> Result<usize> {
    R::FIELDS.iter().map(FieldSpec::width).sum()
}

/// Width of a nested record, checked against the field's declared `len`
pub fn nested_width<R: Record>(desc: &FieldDescriptor) -> Result<usize> {
    let width = record_width::<R>()?;
    if width != desc.width() {
        return Err(Error::invalid_tag(
            desc.name(),
            format!(
                "nested record is {} bytes wide but the field declares len:{}",
                width,
                desc.width()
            ),
        ));
    }
    Ok(width)
}

/// Encode a nested record in place
pub fn encode_nested<R: Record>(
    record: &R,
    desc: &FieldDescriptor,
    enc: &mut Encoder<'_>,
) -> Result<()> {
    nested_width::<R>(desc)?;
    record.encode_fields(enc)
}

/// Decode a nested record from the parent's cursor
///
/// A span made only of the field's pad is absent.
pub fn decode_nested<R: Record>(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<R>> {
    let mut record = R::default();
    Ok(decode_nested_into(&mut record, desc, dec)?.then_some(record))
}

/// Decode a nested record over its current value
///
/// Inner fields go through [`Decoder::field`], so the absent policy applies
/// to each of them. Returns `false` for an all-pad span, leaving `record`
/// untouched.
pub fn decode_nested_into<R: Record>(
    record: &mut R,
    desc: &FieldDescriptor,
    dec: &mut Decoder<'_>,
) -> Result<bool> {
    let width = nested_width::<R>(desc)?;
    let span = dec.peek(desc.name(), width)?;
    if is_all_pad(span, desc.pad()) {
        dec.take(desc.name(), width)?;
        return Ok(false);
    }
    record.decode_fields(dec)?;
    Ok(true)
}

/// Register record types as nested field types
///
/// `#[derive(Record)]` does this automatically; hand-written records call it
/// once per type.
#[macro_export]
macro_rules! impl_record_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FixedField for $ty {
                const KIND: $crate::FieldKind = $crate::FieldKind::Record;

                fn zero() -> Self {
                    <$ty as ::core::default::Default>::default()
                }

                fn width(desc: &$crate::FieldDescriptor) -> $crate::Result<usize> {
                    $crate::record::nested_width::<$ty>(desc)
                }

                fn encode(
                    &self,
                    desc: &$crate::FieldDescriptor,
                    enc: &mut $crate::Encoder<'_>,
                ) -> $crate::Result<()> {
                    $crate::record::encode_nested(self, desc, enc)
                }

                fn decode(
                    desc: &$crate::FieldDescriptor,
                    dec: &mut $crate::Decoder<'_>,
                ) -> $crate::Result<::core::option::Option<Self>> {
                    $crate::record::decode_nested::<$ty>(desc, dec)
                }

                fn decode_into(
                    slot: &mut Self,
                    desc: &$crate::FieldDescriptor,
                    dec: &mut $crate::Decoder<'_>,
                ) -> $crate::Result<bool> {
                    $crate::record::decode_nested_into(slot, desc, dec)
                }
            }
        )+
    };
}
