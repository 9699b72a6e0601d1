//! Content hash of data stored off-ledger.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::ser::Formatter;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use std::io;

use crate::error::DomainError;

/// Opaque content hash.
///
/// The registry never inspects the format. [`DataHash::of_json`] derives one
/// from a JSON payload using the canonical text the ingest pipeline hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataHash(String);

impl DataHash {
    /// Wrap an existing hash string. Any value is accepted, including empty.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Lowercase hex SHA-256 of `value` in the canonical text form.
    ///
    /// Canonical text has object keys sorted, `", "` and `": "` separators,
    /// and every non-ASCII character escaped as `\uXXXX` (UTF-16 units), so
    /// payloads differing only in key order or whitespace hash identically.
    /// Floats in exponent form are written without a `+` sign (`1e16`).
    pub fn of_json(value: &Value) -> Result<Self, DomainError> {
        let mut canonical = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut canonical, CanonicalFormatter);
        SortedKeys(value)
            .serialize(&mut serializer)
            .map_err(DomainError::serialization)?;
        Ok(Self::of_bytes(&canonical))
    }

    fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DataHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DataHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<DataHash> for String {
    fn from(hash: DataHash) -> String {
        hash.0
    }
}

/// Serializes a JSON value with object keys in code-point order, whatever
/// map ordering serde_json was built with.
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, &SortedKeys(value))?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(&SortedKeys(item))?;
                }
                out.end()
            }
            other => other.serialize(serializer),
        }
    }
}

struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}
