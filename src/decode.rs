//! Lenient JSON projection of captured output onto result records.
//!
//! Result records derive `Deserialize` with `#[serde(default)]`, so keys the
//! program did not print keep their zero value. Keys are matched
//! case-insensitively (`Address` and `address` are the same field): object
//! keys are lower-cased before projection and record fields are named in
//! lower case. Object members set to `null` are dropped, so they also keep
//! their zero value. A zero value therefore means "not reported", never
//! "confirmed zero".

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// Decode one JSON document from `output` into `T`.
///
/// Malformed or empty output is an [`Error::Decode`]; a top-level `null`
/// yields `T::default()`.
pub fn decode<T>(output: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let decode_err = |source| Error::Decode {
        source,
        output: output.to_vec(),
    };

    let value: Value = serde_json::from_slice(output).map_err(decode_err)?;
    if value.is_null() {
        return Ok(T::default());
    }

    serde_json::from_value(fold_keys(value)).map_err(decode_err)
}

/// Lower-case every object key and drop `null` members, recursively.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.to_lowercase(), fold_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Entry {
        address: String,
        balance: i64,
        #[serde(rename = "default")]
        is_default: bool,
    }

    #[test]
    fn missing_fields_stay_zero() {
        let e: Entry = decode(br#"{"Address":"f3abc"}"#).unwrap();
        assert_eq!(
            e,
            Entry {
                address: "f3abc".into(),
                balance: 0,
                is_default: false
            }
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let e: Entry = decode(br#"{"address":"f1","Extra":{"Nested":1},"DEFAULT":true}"#).unwrap();
        assert_eq!(e.address, "f1");
        assert!(e.is_default);
    }

    #[test]
    fn arrays_fold_nested_keys() {
        let list: Vec<Entry> =
            decode(b"[{\"Address\":\"a\",\"Balance\":7},{\"address\":\"b\"}]\n").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].balance, 7);
        assert_eq!(list[1].address, "b");
    }

    #[test]
    fn null_is_default() {
        let e: Entry = decode(b" null ").unwrap();
        assert_eq!(e, Entry::default());
    }

    #[test]
    fn null_members_stay_zero() {
        let e: Entry = decode(br#"{"Address":null,"Balance":3,"Default":null}"#).unwrap();
        assert_eq!(
            e,
            Entry {
                address: String::new(),
                balance: 3,
                is_default: false
            }
        );

        let list: Vec<Entry> = decode(br#"[{"address":"a","balance":null}]"#).unwrap();
        assert_eq!(list[0].balance, 0);
    }

    #[test]
    fn malformed_output_is_error_with_bytes() {
        let err = decode::<Entry>(b"ERROR: repo not initialized").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(err.output(), Some(&b"ERROR: repo not initialized"[..]));
    }

    #[test]
    fn empty_output_is_error() {
        assert!(decode::<Entry>(b"").is_err());
    }

    #[test]
    fn wrong_types_are_error() {
        assert!(decode::<Entry>(br#"{"balance":"lots"}"#).is_err());
    }
}
