//! JSON encoding and decoding of request and response bodies.
//!
//! Thin layer over `serde_json` that owns the body rules of the pipeline:
//! blank bodies decode to nothing, `String` targets receive the raw text, and
//! everything else goes through serde.

use serde::{de::DeserializeOwned, Serialize};
use std::any::{Any, TypeId};

/// Serializes `value` to JSON text.
pub fn encode<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value)
}

/// Decodes a response body into `T`.
///
/// Returns `Ok(None)` when the body is empty or whitespace only. When `T` is
/// `String` the text is returned unchanged without being parsed.
///
/// # Examples
///
/// ```
/// use courier::codec;
///
/// let n: Option<u32> = codec::decode("42").unwrap();
/// assert_eq!(n, Some(42));
///
/// let raw: Option<String> = codec::decode("not json").unwrap();
/// assert_eq!(raw.as_deref(), Some("not json"));
///
/// let empty: Option<u32> = codec::decode("  \n").unwrap();
/// assert_eq!(empty, None);
/// ```
pub fn decode<T>(text: &str) -> Result<Option<T>, serde_json::Error>
where
    T: DeserializeOwned + 'static,
{
    if text.trim().is_empty() {
        return Ok(None);
    }

    if TypeId::of::<T>() == TypeId::of::<String>() {
        let raw: Box<dyn Any> = Box::new(text.to_owned());
        return Ok(raw.downcast::<T>().ok().map(|value| *value));
    }

    serde_json::from_str(text).map(Some)
}

/// Serde helpers for timestamps in the `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'` form.
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "courier::codec::timestamp")]
///     at: DateTime<Utc>,
/// }
///
/// let event = Event { at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap() };
/// let json = serde_json::to_string(&event).unwrap();
/// assert_eq!(json, r#"{"at":"2024-03-01T12:30:00.000Z"}"#);
/// ```
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// The `chrono` format string for timestamps on the wire.
    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }

    pub(crate) fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, FORMAT).map(|naive| naive.and_utc())
    }

    /// Same format for `Option<DateTime<Utc>>` fields.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.collect_str(&value.format(super::FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|text| super::parse(&text).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct User {
        id: u64,
        name: String,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Audit {
        #[serde(with = "timestamp")]
        created: DateTime<Utc>,
        #[serde(with = "timestamp::option", default)]
        deleted: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_decode_struct() {
        let user: Option<User> = decode(r#"{"id":1,"name":"Ann"}"#).unwrap();
        assert_eq!(
            user,
            Some(User {
                id: 1,
                name: "Ann".to_string()
            })
        );
    }

    #[test]
    fn test_encoded_value_decodes_back() {
        let user = User {
            id: 7,
            name: "Bo".to_string(),
        };
        let text = encode(&user).unwrap();
        assert_eq!(decode::<User>(&text).unwrap(), Some(user));
    }

    #[test]
    fn test_blank_body_is_not_an_error() {
        assert!(decode::<User>("").unwrap().is_none());
        assert!(decode::<User>(" \t\r\n").unwrap().is_none());
        assert!(decode::<String>("   ").unwrap().is_none());
    }

    #[test]
    fn test_string_target_skips_parsing() {
        let raw = decode::<String>("<html>oops</html>").unwrap();
        assert_eq!(raw.as_deref(), Some("<html>oops</html>"));

        // Quoted JSON strings are passed through verbatim too.
        let raw = decode::<String>(r#""quoted""#).unwrap();
        assert_eq!(raw.as_deref(), Some(r#""quoted""#));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = decode::<User>("{id: 1").unwrap_err();
        assert!(err.is_syntax() || err.is_eof());

        let err = decode::<User>(r#"{"message":"not found"}"#).unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_timestamp_format() {
        let created = Utc.with_ymd_and_hms(2023, 11, 5, 8, 9, 10).unwrap()
            + chrono::Duration::milliseconds(123);
        let audit = Audit {
            created,
            deleted: None,
        };

        let json = encode(&audit).unwrap();
        assert_eq!(json, r#"{"created":"2023-11-05T08:09:10.123Z","deleted":null}"#);
        assert_eq!(decode::<Audit>(&json).unwrap(), Some(audit));
    }

    #[test]
    fn test_timestamp_rejects_other_formats() {
        let result = decode::<Audit>(r#"{"created":"05/11/2023"}"#);
        assert!(result.is_err());

        let audit = decode::<Audit>(r#"{"created":"2023-11-05T08:09:10.000Z"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(audit.deleted, None);
    }
}
