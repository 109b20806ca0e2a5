//! Field annotation parsing
//!
//! An annotation is a comma-separated list of `key:value` pairs attached to a
//! record field, for example `"len:8,format:%m%d%Y"` or `"len:4,pad: "`.
//! Parsing yields an immutable [`FieldDescriptor`]. Defaults depend on the
//! field's [`FieldKind`]: numeric fields pad with `0` and align right, every
//! other kind pads with a space and aligns left.
//!
//! ## Keys
//!
//! | key      | default            | notes                                  |
//! |----------|--------------------|----------------------------------------|
//! | `len`    | required           | byte width, must be positive           |
//! | `base`   | `10`               | integer radix, must be at least 2      |
//! | `pad`    | `0` / space        | fill sequence, may span several bytes  |
//! | `align`  | right / left       | `left` or `right`                      |
//! | `format` | none               | chrono strftime pattern, temporal only |
//!
//! The value runs to the end of the segment, so `format:%H:%M` keeps its colon.
//! Values of `pad` and `format` are taken verbatim, whitespace included.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Annotation key for the field width
pub const TAG_LEN: &str = "len";
/// Annotation key for the integer radix
pub const TAG_BASE: &str = "base";
/// Annotation key for the fill sequence
pub const TAG_PAD: &str = "pad";
/// Annotation key for the temporal pattern
pub const TAG_FORMAT: &str = "format";
/// Annotation key for the alignment
pub const TAG_ALIGN: &str = "align";

/// Fill used by numeric fields when no `pad` is given
pub const DEFAULT_PAD_NUMERIC: &str = "0";
/// Fill used by all other fields when no `pad` is given
pub const DEFAULT_PAD_TEXT: &str = " ";
/// Radix used when no `base` is given
pub const DEFAULT_BASE: u32 = 10;

/// Dispatch category of a field type
///
/// The kind selects descriptor defaults and documents which encode/decode
/// rule a field type follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Signed or unsigned integer
    Integer,
    /// UTF-8 text
    Text,
    /// Raw byte sequence
    Bytes,
    /// Nested record
    Record,
    /// Date, time or timestamp
    Temporal,
    /// Type with its own codec
    Custom,
}

impl FieldKind {
    /// Whether the kind uses numeric defaults (`0` pad, right alignment)
    pub const fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Integer)
    }
}

/// Side a value is pushed against inside its span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Content first, padding after
    Left,
    /// Padding first, content after
    Right,
}

impl Align {
    fn parse(field: &'static str, raw: &str) -> Result<Self> {
        match raw.trim() {
            "left" => Ok(Align::Left),
            "right" => Ok(Align::Right),
            other => Err(Error::invalid_tag(
                field,
                format!("align must be `left` or `right`, got `{}`", other),
            )),
        }
    }
}

/// Parsed layout metadata for one field
///
/// ## Invariants
///
/// - `width() > 0`
/// - `base() >= 2`
/// - `pad()` is never empty
/// - `format()` is only set for [`FieldKind::Temporal`] fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    len: usize,
    pad: Vec<u8>,
    base: u32,
    align: Align,
    format: Option<String>,
}

impl FieldDescriptor {
    /// Parse an annotation for a field of the given kind
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTag` when `len` is missing, non-numeric or zero,
    /// when `base` is non-numeric or below 2, when `pad` is empty, when `align`
    /// is not `left`/`right`, or when a segment has no `:` separator.
    pub fn parse(name: &'static str, annotation: &str, kind: FieldKind) -> Result<Self> {
        let mut len = None;
        let mut base = None;
        let mut pad = None;
        let mut align = None;
        let mut format = None;

        for segment in annotation.split(',') {
            let (key, value) = segment.split_once(':').ok_or_else(|| {
                Error::invalid_tag(name, format!("expected `key:value`, got `{}`", segment))
            })?;
            match key.trim() {
                TAG_LEN => len = Some(value),
                TAG_BASE => base = Some(value),
                TAG_PAD => pad = Some(value),
                TAG_ALIGN => align = Some(value),
                TAG_FORMAT => format = Some(value),
                other => debug!(field = name, key = other, "ignoring unknown annotation key"),
            }
        }

        let len = match len {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                Error::invalid_tag(name, format!("len `{}` is not a number: {}", raw, e))
            })?,
            None => return Err(Error::invalid_tag(name, "missing `len`")),
        };
        if len == 0 {
            return Err(Error::invalid_tag(name, "len must be positive"));
        }

        let base = match base {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                Error::invalid_tag(name, format!("base `{}` is not a number: {}", raw, e))
            })?,
            None => DEFAULT_BASE,
        };
        if base < 2 {
            return Err(Error::invalid_tag(
                name,
                format!("base must be at least 2, got {}", base),
            ));
        }

        let pad = match pad {
            Some("") => return Err(Error::invalid_tag(name, "pad must not be empty")),
            Some(raw) => raw.as_bytes().to_vec(),
            None if kind.is_numeric() => DEFAULT_PAD_NUMERIC.as_bytes().to_vec(),
            None => DEFAULT_PAD_TEXT.as_bytes().to_vec(),
        };

        let align = match align {
            Some(raw) => Align::parse(name, raw)?,
            None if kind.is_numeric() => Align::Right,
            None => Align::Left,
        };

        let format = match kind {
            FieldKind::Temporal => format.filter(|f| !f.is_empty()).map(str::to_owned),
            _ => None,
        };

        Ok(FieldDescriptor {
            name,
            len,
            pad,
            base,
            align,
            format,
        })
    }

    /// Name of the field this descriptor belongs to
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared width in bytes (`len` key)
    #[inline]
    pub fn width(&self) -> usize {
        self.len
    }

    /// Fill sequence
    #[inline]
    pub fn pad(&self) -> &[u8] {
        &self.pad
    }

    /// Integer radix
    #[inline]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Alignment inside the span
    #[inline]
    pub fn align(&self) -> Align {
        self.align
    }

    /// Temporal pattern, if declared
    #[inline]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Temporal pattern, or `Error::MissingFormat`
    pub fn require_format(&self) -> Result<&str> {
        self.format().ok_or(Error::MissingFormat { field: self.name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(annotation: &str, kind: FieldKind) -> Result<FieldDescriptor> {
        FieldDescriptor::parse("field", annotation, kind)
    }

    #[test]
    fn test_numeric_defaults() {
        let desc = parse("len:4", FieldKind::Integer).unwrap();
        assert_eq!(desc.width(), 4);
        assert_eq!(desc.pad(), b"0");
        assert_eq!(desc.base(), 10);
        assert_eq!(desc.align(), Align::Right);
        assert_eq!(desc.format(), None);
    }

    #[test]
    fn test_text_defaults() {
        for kind in [
            FieldKind::Text,
            FieldKind::Bytes,
            FieldKind::Temporal,
            FieldKind::Record,
            FieldKind::Custom,
        ] {
            let desc = parse("len:8", kind).unwrap();
            assert_eq!(desc.pad(), b" ", "{:?}", kind);
            assert_eq!(desc.align(), Align::Left, "{:?}", kind);
        }
    }

    #[test]
    fn test_all_keys() {
        let desc = parse("len:6,pad:*-,base:16,align:left", FieldKind::Integer).unwrap();
        assert_eq!(desc.width(), 6);
        assert_eq!(desc.pad(), b"*-");
        assert_eq!(desc.base(), 16);
        assert_eq!(desc.align(), Align::Left);
    }

    #[test]
    fn test_space_pad_is_kept_verbatim() {
        let desc = parse("len:4,pad: ", FieldKind::Integer).unwrap();
        assert_eq!(desc.pad(), b" ");
    }

    #[test]
    fn test_format_keeps_colons() {
        let desc = parse("len:8,format:%H:%M:%S", FieldKind::Temporal).unwrap();
        assert_eq!(desc.format(), Some("%H:%M:%S"));
        assert_eq!(desc.require_format().unwrap(), "%H:%M:%S");
    }

    #[test]
    fn test_format_ignored_for_non_temporal() {
        let desc = parse("len:8,format:%Y", FieldKind::Text).unwrap();
        assert_eq!(desc.format(), None);
    }

    #[test]
    fn test_missing_format() {
        let desc = parse("len:8", FieldKind::Temporal).unwrap();
        assert!(matches!(
            desc.require_format(),
            Err(Error::MissingFormat { field: "field" })
        ));
    }

    #[test]
    fn test_missing_len() {
        assert!(matches!(
            parse("pad:0", FieldKind::Integer),
            Err(Error::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_non_numeric_len() {
        assert!(matches!(
            parse("len:abc", FieldKind::Integer),
            Err(Error::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_zero_len() {
        assert!(matches!(
            parse("len:0", FieldKind::Text),
            Err(Error::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_bad_base() {
        assert!(matches!(
            parse("len:4,base:hex", FieldKind::Integer),
            Err(Error::InvalidTag { .. })
        ));
        assert!(matches!(
            parse("len:4,base:1", FieldKind::Integer),
            Err(Error::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_empty_pad() {
        assert!(matches!(
            parse("len:4,pad:", FieldKind::Text),
            Err(Error::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_bad_align() {
        assert!(matches!(
            parse("len:4,align:center", FieldKind::Text),
            Err(Error::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_segment_without_separator() {
        assert!(matches!(
            parse("len:4,pad", FieldKind::Text),
            Err(Error::InvalidTag { .. })
        ));
        assert!(matches!(parse("", FieldKind::Text), Err(Error::InvalidTag { .. })));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let desc = parse("len:3,comment:legacy", FieldKind::Text).unwrap();
        assert_eq!(desc.width(), 3);
    }

    #[test]
    fn test_later_keys_win() {
        let desc = parse("len:3,len:5", FieldKind::Text).unwrap();
        assert_eq!(desc.width(), 5);
    }
}
