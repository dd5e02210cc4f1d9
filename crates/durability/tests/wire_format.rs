//! Wire format tests
//!
//! Property tests for scalar and container round trips in both encodings,
//! plus fixed byte layouts that existing files depend on.

use proptest::prelude::*;
use simstore_core::{Encoding, FileKind, FormatVersion, Stage};
use simstore_durability::{
    read_header, read_sequence, read_sparse, write_header, write_sequence, write_sparse,
    ReadHandle, Scalar, WriteHandle,
};

fn encode<T: Scalar>(value: &T, encoding: Encoding) -> Vec<u8> {
    let mut w = WriteHandle::new(Vec::new(), encoding);
    w.put(value).unwrap();
    w.into_inner()
}

fn decode<T: Scalar>(bytes: &[u8], encoding: Encoding) -> T {
    let mut r = ReadHandle::new(bytes, encoding);
    r.get().unwrap()
}

fn encodings() -> impl Strategy<Value = Encoding> {
    prop_oneof![Just(Encoding::Text), Just(Encoding::Binary)]
}

proptest! {
    #[test]
    fn prop_i64_round_trip(value in any::<i64>(), encoding in encodings()) {
        prop_assert_eq!(decode::<i64>(&encode(&value, encoding), encoding), value);
    }

    #[test]
    fn prop_f64_round_trip(value in any::<f64>().prop_filter("finite", |v| v.is_finite()),
                           encoding in encodings()) {
        let back = decode::<f64>(&encode(&value, encoding), encoding);
        prop_assert_eq!(back.to_bits(), value.to_bits());
    }

    #[test]
    fn prop_text_round_trip(value in "[^\"]{0,40}", encoding in encodings()) {
        prop_assert_eq!(decode::<String>(&encode(&value, encoding), encoding), value);
    }

    #[test]
    fn prop_sequence_round_trip(values in prop::collection::vec(any::<i32>(), 0..64),
                                encoding in encodings()) {
        let mut w = WriteHandle::new(Vec::new(), encoding);
        write_sequence(&mut w, &values, true, true).unwrap();
        let bytes = w.into_inner();

        let mut r = ReadHandle::new(&bytes[..], encoding);
        prop_assert_eq!(read_sequence::<i32, _>(&mut r, None).unwrap(), values);
    }

    #[test]
    fn prop_sparse_round_trip(entries in prop::collection::vec((any::<u32>(), -1.0f64..1.0), 0..32),
                              encoding in encodings()) {
        let mut w = WriteHandle::new(Vec::new(), encoding);
        write_sparse(&mut w, &entries, true).unwrap();
        let bytes = w.into_inner();

        let mut r = ReadHandle::new(&bytes[..], encoding);
        prop_assert_eq!(read_sparse::<f64, _>(&mut r).unwrap(), entries);
    }

    #[test]
    fn prop_values_after_text_keep_their_place(a in any::<u32>(), s in "[a-z ]{0,12}", b in any::<bool>()) {
        let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
        w.put(&a).unwrap();
        w.space().unwrap();
        w.put(&s).unwrap();
        w.space().unwrap();
        w.put(&b).unwrap();
        let bytes = w.into_inner();

        let mut r = ReadHandle::new(&bytes[..], Encoding::Text);
        prop_assert_eq!(r.get::<u32>().unwrap(), a);
        prop_assert_eq!(r.get::<String>().unwrap(), s);
        prop_assert_eq!(r.get::<bool>().unwrap(), b);
    }
}

#[test]
fn test_material_header_scenario() {
    for encoding in [Encoding::Text, Encoding::Binary] {
        let mut w = WriteHandle::new(Vec::new(), encoding);
        write_header(&mut w, FileKind::Material, FormatVersion::release(1, 2, 0), "").unwrap();
        let bytes = w.into_inner();

        let mut r = ReadHandle::new(&bytes[..], encoding);
        let header = read_header(&mut r).unwrap();
        assert_eq!(header.kind, FileKind::Material);
        assert_eq!(header.version, FormatVersion::new(1, 2, 0, Stage::Release));
        assert_eq!(header.information, "");
        assert!(!header.is_link());
    }
}

#[test]
fn test_float_sequence_text_bytes() {
    let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
    write_sequence(&mut w, &[1.5f64, -2.0, 0.0], true, true).unwrap();
    assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "3 1.5 -2 0\n");
}

#[test]
fn test_header_then_body_text_layout() {
    let mut w = WriteHandle::new(Vec::new(), Encoding::Text);
    write_header(&mut w, FileKind::ViewFactorMatrix, FormatVersion::release(1, 2, 0), "x").unwrap();
    write_sequence(&mut w, &[1u32, 2], true, true).unwrap();
    assert_eq!(
        String::from_utf8(w.into_inner()).unwrap(),
        "\"1.2.0\" 3 \"x\"\n2 1 2\n"
    );
}
