//! User identifier - the numeric key assigned by the record store

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Store-assigned user id.
///
/// Zero means "unset": a record that has not been persisted yet, or an id
/// that was never supplied. Lookups short-circuit on an unset id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UserId(pub i64);

impl UserId {
    /// The unset id
    pub const UNSET: Self = Self(0);

    /// Create a new id from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the id is unset (zero)
    #[inline]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Check if the id is strictly positive
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Parse from string, surrounding whitespace allowed
    pub fn parse(s: &str) -> Result<Self, UserIdParseError> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| UserIdParseError::InvalidFormat(s.to_string()))
    }
}

/// Error when parsing a user id
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UserIdParseError {
    #[error("invalid user id: {0:?}")]
    InvalidFormat(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse(s)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

// Accepts both `7` and `"7"`
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct UserIdVisitor;

        impl Visitor<'_> for UserIdVisitor {
            type Value = UserId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or a numeric string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<UserId, E>
            where
                E: de::Error,
            {
                Ok(UserId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<UserId, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(UserId)
                    .map_err(|_| de::Error::custom("user id out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<UserId, E>
            where
                E: de::Error,
            {
                UserId::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(UserIdVisitor)
    }
}

/// A subject as handed to the policy resolver: either an id already typed,
/// or raw text (a header value, a session payload) still to be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Id(UserId),
    Text(String),
}

impl Subject {
    /// Resolve to a user id, parsing text if needed
    pub fn user_id(&self) -> Result<UserId, UserIdParseError> {
        match self {
            Self::Id(id) => Ok(*id),
            Self::Text(text) => UserId::parse(text),
        }
    }
}

impl From<UserId> for Subject {
    fn from(id: UserId) -> Self {
        Self::Id(id)
    }
}

impl From<i64> for Subject {
    fn from(id: i64) -> Self {
        Self::Id(UserId(id))
    }
}

impl From<&str> for Subject {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Subject {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}
