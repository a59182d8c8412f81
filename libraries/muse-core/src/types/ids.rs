/// ID types for Muse entities
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Opaque entity identifier.
///
/// The remote service assigns these and may send them as JSON strings or
/// integers; both decode into the same string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an ID from its string form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a client-side identifier for a record the server did not echo back.
    ///
    /// Values are millisecond timestamps, bumped so that two calls never return the
    /// same value, and prefixed so they never collide with server-assigned ids.
    pub fn generate_local() -> Self {
        static LAST: AtomicI64 = AtomicI64::new(0);

        let now = chrono::Utc::now().timestamp_millis();
        let mut prev = LAST.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match LAST.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return Self(format!("{LOCAL_PREFIX}{next}")),
                Err(actual) => prev = actual,
            }
        }
    }

    /// Whether this id was generated locally rather than assigned by the server
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_PREFIX)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id carries no value
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

const LOCAL_PREFIX: &str = "local-";

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = EntityId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer identifier")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityId, E> {
                Ok(EntityId::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<EntityId, E> {
                Ok(EntityId(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntityId, E> {
                Ok(EntityId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityId, E> {
                Ok(EntityId(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<EntityId, E> {
                Ok(EntityId::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<EntityId, E> {
                Ok(EntityId::default())
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
