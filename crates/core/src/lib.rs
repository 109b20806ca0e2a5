//! Fixed-width record codec engine
//!
//! This crate defines the building blocks used by the `fixedwidth` facade:
//! - FieldDescriptor: parsed per-field annotation (width, pad, base, align, format)
//! - pad: width normalization helpers
//! - FixedField: per-kind encode/decode rules (integers, text, bytes, temporal, Option)
//! - Record / FieldSpec: the immutable field table of a record shape
//! - Encoder / Decoder: the marshal and unmarshal engines with explicit cursors
//! - FixedCodec: extension point for types with their own wire form
//! - CodecConfig: digit case, absent-field policy, strict width checking
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod marshal;
pub mod pad;
pub mod record;
pub mod temporal;
pub mod unmarshal;

pub use codec::{FixedCodec, Unimplemented};
pub use config::{AbsentPolicy, CodecConfig, DigitCase};
pub use descriptor::{Align, FieldDescriptor, FieldKind};
pub use error::{BoxError, Error, Result};
pub use field::FixedField;
pub use marshal::{marshal, marshal_with, Encoder};
pub use record::{record_width, FieldSpec, Record};
pub use unmarshal::{from_bytes, from_bytes_with, unmarshal, unmarshal_with, Decoder};
