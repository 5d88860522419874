//! Shared model pieces: timestamps, choice values and nested references

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire form of the zero timestamp.
///
/// A writable model always serializes its `created` and `last_updated` fields;
/// when they were never set they carry this value.
pub const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00.000Z";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Optional point in time that serializes its unset state as [`ZERO_TIMESTAMP`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp(Option<DateTime<Utc>>);

impl Timestamp {
    /// Wrap a concrete instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(Some(instant))
    }

    /// The wrapped instant, `None` for the zero timestamp.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// True when no instant is set.
    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(instant) => write!(f, "{}", instant.format(TIMESTAMP_FORMAT)),
            None => f.write_str(ZERO_TIMESTAMP),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(Self(None));
        };
        if raw.is_empty() || raw == ZERO_TIMESTAMP {
            return Ok(Self(None));
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Self(Some(instant.with_timezone(&Utc))));
        }
        // Older NetBox releases return plain dates for `created`
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(Some(naive.and_utc())))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

/// Choice field as returned by NetBox (`{"value": ..., "label": ...}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceValue {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// Nested tag reference, used both when reading and when writing tags
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NestedTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub slug: String,
}

// Nested serializers (simplified versions for references)

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedSite {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedTenant {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedDeviceRole {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedPlatform {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedCluster {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedVirtualMachine {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
}

/// Generic nested reference for relations the provider only tracks by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedRef {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_timestamp_serializes_to_sentinel() {
        let encoded = serde_json::to_string(&Timestamp::default()).unwrap();
        assert_eq!(encoded, format!("\"{}\"", ZERO_TIMESTAMP));
    }

    #[test]
    fn timestamp_keeps_milliseconds() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap();
        let encoded = serde_json::to_string(&Timestamp::at(instant)).unwrap();
        assert_eq!(encoded, "\"2024-03-05T10:20:30.000Z\"");
    }

    #[test]
    fn sentinel_and_null_decode_as_zero() {
        let zero: Timestamp = serde_json::from_str(&format!("\"{}\"", ZERO_TIMESTAMP)).unwrap();
        assert!(zero.is_zero());
        let null: Timestamp = serde_json::from_str("null").unwrap();
        assert!(null.is_zero());
    }

    #[test]
    fn plain_dates_are_accepted() {
        let ts: Timestamp = serde_json::from_str("\"2021-06-01\"").unwrap();
        assert_eq!(ts.to_string(), "2021-06-01T00:00:00.000Z");
    }

    #[test]
    fn nested_tag_omits_missing_id() {
        let tag = NestedTag { id: None, name: "Edge".into(), slug: "edge".into() };
        assert_eq!(
            serde_json::to_value(&tag).unwrap(),
            serde_json::json!({"name": "Edge", "slug": "edge"})
        );
    }
}
