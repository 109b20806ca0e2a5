//! fixedwidth - Fixed-width positional record codec
//!
//! Encodes records into byte buffers where every field occupies a static,
//! contiguous span with no delimiters, and decodes them back. This is the
//! layout of legacy mainframe, EDI and flat-file banking formats.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use fixedwidth::Record;
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! struct Statement {
//!     #[fixed("len:8,format:%m%d%Y")]
//!     date: NaiveDate,
//!     #[fixed("len:3")]
//!     number: i64,
//!     #[fixed("len:5")]
//!     text: String,
//! }
//!
//! let statement: Statement = fixedwidth::from_bytes(b"11161990123Hello")?;
//! assert_eq!(statement.date, NaiveDate::from_ymd_opt(1990, 11, 16).unwrap());
//! assert_eq!(statement.number, 123);
//! assert_eq!(statement.text, "Hello");
//!
//! assert_eq!(fixedwidth::marshal(&statement)?, b"11161990123Hello");
//! # Ok::<(), fixedwidth::Error>(())
//! ```
//!
//! # Annotations
//!
//! `#[fixed("len:<int>[,pad:<seq>][,base:<int>][,align:<left|right>][,format:<pattern>]")]`
//!
//! Integers default to `pad:0,align:right`, everything else to a space pad
//! and left alignment. Temporal fields require a chrono strftime `format`.
//! Fields without the attribute are skipped by the codec.
//!
//! # Architecture
//!
//! The engine lives in `fixedwidth-core` and the derive macro in
//! `fixedwidth-derive`; this crate re-exports both.

pub use fixedwidth_core::*;
pub use fixedwidth_derive::Record;
