//! Serde support: a ConMap serializes as one flat map.
//!
//! The encoded form exposes no shard structure: field names are the keys in
//! their textual form, field values are the serialized values. Member order
//! is whatever the snapshot traversal produced and is not stable across
//! calls.

use crate::conmap::ConMap;
use crate::error::Error;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

impl<K, V> Serialize for ConMap<K, V>
where
    K: Serialize + Hash + Eq + Send + Sync + Clone,
    V: Serialize + Send + Sync,
{
    /// Serialize every entry as one flat map.
    ///
    /// Entries are copied out through the buffered snapshot path first, so no
    /// shard lock is held while the encoder runs.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries = self.iter_snapshot();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(&key, value.as_ref())?;
        }
        map.end()
    }
}

struct ConMapVisitor<K, V> {
    marker: PhantomData<fn() -> ConMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for ConMapVisitor<K, V>
where
    K: Deserialize<'de> + Hash + Eq + Send + Sync,
    V: Deserialize<'de> + Send + Sync,
{
    type Value = ConMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of keys to values")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let map = ConMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for ConMap<K, V>
where
    K: Deserialize<'de> + Hash + Eq + Send + Sync,
    V: Deserialize<'de> + Send + Sync,
{
    /// Deserialize into a freshly constructed map with default configuration,
    /// inserting every member.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ConMapVisitor {
            marker: PhantomData,
        })
    }
}

impl<K, V> ConMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    /// Encode the map as a JSON object string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// let map = ConMap::new();
    /// map.insert("a".to_string(), 1);
    ///
    /// let json = map.to_json().unwrap();
    /// let restored: ConMap<String, i32> = ConMap::from_json(&json).unwrap();
    /// assert_eq!(*restored.get(&"a".to_string()).unwrap(), 1);
    /// ```
    pub fn to_json(&self) -> Result<String, Error>
    where
        K: Serialize + Clone,
        V: Serialize,
    {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON object string into a freshly constructed map.
    ///
    /// Malformed or type-mismatched input is the one recoverable error this
    /// crate surfaces.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conmap::ConMap;
    ///
    /// assert!(ConMap::<String, i32>::from_json("not json").is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error>
    where
        K: DeserializeOwned,
        V: DeserializeOwned,
    {
        Ok(serde_json::from_str(json)?)
    }
}
