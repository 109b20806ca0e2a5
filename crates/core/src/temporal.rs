//! Date and time fields
//!
//! Temporal fields need a `format` key holding a chrono strftime pattern,
//! e.g. `"len:8,format:%m%d%Y"` for `MMDDYYYY`. The formatted text is written
//! verbatim; it is expected to be exactly `len` bytes. On decode the pad is
//! trimmed and an empty span is absent.
//!
//! `DateTime<Utc>` accepts patterns with or without an offset; without one
//! the text is read as UTC, and a date-only pattern yields midnight.

use std::fmt::Write;

use chrono::format::{DelayedFormat, ParseResult, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::error::{Error, Result};
use crate::field::FixedField;
use crate::marshal::Encoder;
use crate::pad::trim_pad;
use crate::unmarshal::Decoder;

fn render(desc: &FieldDescriptor, formatted: DelayedFormat<StrftimeItems<'_>>) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).map_err(|_| {
        Error::invalid_temporal(
            desc.name(),
            format!(
                "pattern `{}` cannot render this value",
                desc.format().unwrap_or_default()
            ),
        )
    })?;
    Ok(out)
}

/// Take the span and return its trimmed text, or `None` when it is empty
fn temporal_text<'a>(desc: &FieldDescriptor, dec: &mut Decoder<'a>) -> Result<Option<&'a str>> {
    let span = dec.take(desc.name(), desc.width())?;
    let trimmed = trim_pad(span, desc.pad(), desc.align());
    if trimmed.is_empty() {
        return Ok(None);
    }
    std::str::from_utf8(trimmed)
        .map(Some)
        .map_err(|e| Error::invalid_temporal(desc.name(), e))
}

fn parse_naive_datetime(text: &str, pattern: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, pattern).or_else(|err| {
        NaiveDate::parse_from_str(text, pattern)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(err)
    })
}

fn parse_utc(text: &str, pattern: &str) -> ParseResult<DateTime<Utc>> {
    DateTime::parse_from_str(text, pattern)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| parse_naive_datetime(text, pattern).map(|naive| Utc.from_utc_datetime(&naive)))
}

fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn zero_datetime() -> NaiveDateTime {
    zero_date().and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN)
}

macro_rules! impl_temporal_field {
    ($ty:ty, zero: $zero:expr, parse: $parse:expr) => {
        impl FixedField for $ty {
            const KIND: FieldKind = FieldKind::Temporal;

            fn zero() -> Self {
                $zero
            }

            fn encode(&self, desc: &FieldDescriptor, enc: &mut Encoder<'_>) -> Result<()> {
                let pattern = desc.require_format()?;
                let text = render(desc, self.format(pattern))?;
                enc.write_verbatim(desc, text.as_bytes())
            }

            fn decode(desc: &FieldDescriptor, dec: &mut Decoder<'_>) -> Result<Option<Self>> {
                let pattern = desc.require_format()?;
                let Some(text) = temporal_text(desc, dec)? else {
                    return Ok(None);
                };
                ($parse)(text, pattern).map(Some).map_err(|e| {
                    Error::invalid_temporal(
                        desc.name(),
                        format!("`{}` does not match `{}`: {}", text, pattern, e),
                    )
                })
            }
        }
    };
}

impl_temporal_field!(NaiveDate, zero: zero_date(), parse: NaiveDate::parse_from_str);
impl_temporal_field!(
    NaiveTime,
    zero: zero_datetime().time(),
    parse: NaiveTime::parse_from_str
);
impl_temporal_field!(NaiveDateTime, zero: zero_datetime(), parse: parse_naive_datetime);
impl_temporal_field!(
    DateTime<Utc>,
    zero: Utc.from_utc_datetime(&zero_datetime()),
    parse: parse_utc
);
