//! Round-trip and width properties
//!
//! For every record whose values fit their declared widths:
//! - `marshal(r).len() == record_width::<R>()`
//! - `from_bytes(marshal(r)) == r`
//!
//! The one documented exception is an optional field whose pad is itself a
//! valid encoding, covered by `test_zero_padded_none_reads_back_as_zero`.

use chrono::NaiveDate;
use fixedwidth::{from_bytes, marshal, marshal_with, record_width, CodecConfig, DigitCase, Record};
use proptest::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Totals {
    #[fixed("len:4,base:16")]
    checksum: u16,
    #[fixed("len:6,pad: ")]
    count: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Ledger {
    #[fixed("len:10")]
    account: u32,
    #[fixed("len:11,pad: ")]
    balance: i32,
    #[fixed("len:12")]
    holder: String,
    #[fixed("len:8,align:right,pad:.")]
    branch: String,
    #[fixed("len:8,format:%Y%m%d")]
    opened: NaiveDate,
    #[fixed("len:8,format:%Y%m%d")]
    closed: Option<NaiveDate>,
    #[fixed("len:10")]
    totals: Totals,
    #[fixed("len:10")]
    previous: Option<Totals>,
    #[fixed("len:3")]
    flags: Vec<u8>,
    note: String,
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1000i32..=9999, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn totals_strategy() -> impl Strategy<Value = Totals> {
    (any::<u16>(), proptest::option::of(0u32..1_000_000))
        .prop_map(|(checksum, count)| Totals { checksum, count })
}

fn ledger_strategy() -> impl Strategy<Value = Ledger> {
    (
        any::<u32>(),
        any::<i32>(),
        "[A-Za-z0-9]([A-Za-z0-9 ]{0,10}[A-Za-z0-9])?",
        "[A-Z0-9]{0,8}",
        date_strategy(),
        proptest::option::of(date_strategy()),
        totals_strategy(),
        proptest::option::of(totals_strategy()),
        proptest::collection::vec(any::<u8>(), 3),
    )
        .prop_map(
            |(account, balance, holder, branch, opened, closed, totals, previous, flags)| Ledger {
                account,
                balance,
                holder,
                branch,
                opened,
                closed,
                totals,
                previous,
                flags,
                note: String::new(),
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_width_invariant(ledger in ledger_strategy()) {
        let bytes = marshal(&ledger).unwrap();
        prop_assert_eq!(bytes.len(), record_width::<Ledger>().unwrap());
    }

    #[test]
    fn prop_roundtrip(ledger in ledger_strategy()) {
        let bytes = marshal(&ledger).unwrap();
        let decoded: Ledger = from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, ledger);
    }

    #[test]
    fn prop_roundtrip_lowercase_hex(totals in totals_strategy()) {
        let config = CodecConfig::default().with_digit_case(DigitCase::Lower);
        let bytes = marshal_with(&totals, &config).unwrap();
        let decoded: Totals = from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, totals);
    }
}

#[test]
fn test_record_width() {
    assert_eq!(record_width::<Totals>().unwrap(), 10);
    assert_eq!(record_width::<Ledger>().unwrap(), 80);
}

#[test]
fn test_untagged_field_is_not_encoded() {
    let ledger = Ledger {
        note: "not on the wire".to_string(),
        ..Ledger::default()
    };
    let decoded: Ledger = from_bytes(&marshal(&ledger).unwrap()).unwrap();
    assert_eq!(decoded.note, "");
}

#[test]
fn test_zero_padded_none_reads_back_as_zero() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct Counter {
        #[fixed("len:4")]
        value: Option<i64>,
    }

    let bytes = marshal(&Counter { value: None }).unwrap();
    assert_eq!(bytes, b"0000".to_vec());
    let decoded: Counter = from_bytes(&bytes).unwrap();
    assert_eq!(decoded.value, Some(0));
}

#[test]
fn test_zeroed_nested_record_is_present() {
    let totals = Totals {
        checksum: 0,
        count: None,
    };
    // "0000" followed by six spaces is not all-pad
    let ledger = Ledger {
        previous: Some(totals.clone()),
        ..Ledger::default()
    };
    let decoded: Ledger = from_bytes(&marshal(&ledger).unwrap()).unwrap();
    assert_eq!(decoded.previous, Some(totals));
}

#[test]
fn test_optional_bytes_roundtrip() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct Blob {
        #[fixed("len:3")]
        data: Option<Vec<u8>>,
    }

    let bytes = marshal(&Blob { data: None }).unwrap();
    assert_eq!(bytes, b"   ".to_vec());
    assert_eq!(from_bytes::<Blob>(&bytes).unwrap(), Blob { data: None });

    let present = Blob {
        data: Some(vec![1, 2, 3]),
    };
    assert_eq!(from_bytes::<Blob>(&marshal(&present).unwrap()).unwrap(), present);
}
