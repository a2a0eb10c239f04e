//! # Field Hash and Codec Properties
//!
//! Property tests over arbitrary inputs for the two leaf utilities every
//! proof and blob path depends on:
//!
//! - `field_hash` output is always a canonical element below the modulus.
//! - `field_hash` is deterministic and agrees with its decimal round trip.
//! - hex and base64 text codecs invert each other for any UTF-8 string.

use proptest::prelude::*;
use zkl_core::codec::{from_base64, from_hex, to_base64, to_hex};
use zkl_core::{field_hash, ContentId, FieldElement, TextEncoding, FIELD_MODULUS};

/// `a < b` for base-10 strings without leading zeros.
fn decimal_lt(a: &str, b: &str) -> bool {
    a.len() < b.len() || (a.len() == b.len() && a < b)
}

proptest! {
    #[test]
    fn field_hash_is_below_modulus(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let value = field_hash(&bytes).to_string();
        prop_assert!(decimal_lt(&value, FIELD_MODULUS), "{} >= modulus", value);
        prop_assert!(value == "0" || !value.starts_with('0'));
    }

    #[test]
    fn field_hash_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(field_hash(&bytes), field_hash(bytes.clone()));
    }

    #[test]
    fn field_hash_decimal_roundtrips(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let fe = field_hash(&bytes);
        let parsed = FieldElement::from_decimal(&fe.to_string()).unwrap();
        prop_assert_eq!(parsed, fe);
    }

    #[test]
    fn short_inputs_do_not_wrap(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
        // Up to 16 bytes fits in a u128, well below the 254-bit modulus.
        let expected = bytes.iter().fold(0u128, |acc, &b| acc * 256 + u128::from(b));
        prop_assert_eq!(field_hash(&bytes).to_string(), expected.to_string());
    }

    #[test]
    fn hex_roundtrips(s in "\\PC{0,64}") {
        prop_assert_eq!(from_hex(&to_hex(&s)).unwrap(), s.as_bytes());
        prop_assert_eq!(TextEncoding::Hex.decode_text(&TextEncoding::Hex.encode_text(&s)).unwrap(), s);
    }

    #[test]
    fn base64_roundtrips(s in "\\PC{0,64}") {
        prop_assert_eq!(from_base64(&to_base64(&s)).unwrap(), s.as_bytes());
        prop_assert_eq!(TextEncoding::Base64.decode_text(&TextEncoding::Base64.encode_text(&s)).unwrap(), s);
    }

    #[test]
    fn distinct_short_cids_hash_differently(a in "[A-Za-z0-9]{1,20}", b in "[A-Za-z0-9]{1,20}") {
        prop_assume!(a != b);
        let (a, b) = (ContentId::new(a).unwrap(), ContentId::new(b).unwrap());
        prop_assert_ne!(a.field_value(), b.field_value());
    }
}
