//! Core data types for the notes service.
//!
//! A note belongs to exactly one device. The device identifier is an opaque,
//! caller-supplied string and is the only credential the service knows about.
//!
//! Timestamps are naive UTC values rendered as ISO-8601 text without a zone
//! suffix, which is the format rows already in the table were written with.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a note.
///
/// Generated server-side as a UUID v4 string, but treated as opaque text
/// everywhere else: an id taken from a request path is never validated beyond
/// being looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a fresh, never-before-issued NoteId.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of the device that owns a note.
///
/// Always trimmed and non-empty when built through [`DeviceId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Trims surrounding whitespace and rejects empty input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Timestamp
// ============================================================================

/// Output format: `2024-05-01T09:30:00.123456`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A naive UTC instant with microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current UTC time, truncated to microseconds.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().naive_utc().trunc_subsecs(6))
    }

    /// The current UTC time, or one microsecond past `prev` if the clock has
    /// not moved beyond it.
    #[must_use]
    pub fn now_after(prev: Timestamp) -> Self {
        let now = Self::now();
        if now > prev {
            now
        } else {
            Self(prev.0 + chrono::Duration::microseconds(1))
        }
    }

    /// Wraps an existing naive UTC value.
    #[must_use]
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self(value.trunc_subsecs(6))
    }

    /// Returns the inner naive UTC value.
    #[must_use]
    pub const fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

/// Error parsing a stored timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParseError(String);

impl fmt::Display for TimestampParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ISO-8601 timestamp: {}", self.0)
    }
}

impl std::error::Error for TimestampParseError {}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    /// Accepts `YYYY-MM-DDTHH:MM:SS` with an optional fractional part.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NaiveDateTime>()
            .map(Self::from_naive)
            .map_err(|_| TimestampParseError(s.to_string()))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Note
// ============================================================================

/// A text note owned by a single device.
///
/// Field order is the wire order of the JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Primary key, assigned at creation and never reused.
    pub note_id: NoteId,

    /// Owner. Set at creation and never changed.
    pub device_id: DeviceId,

    /// Trimmed, non-empty title.
    pub title: String,

    /// Trimmed, non-empty body text.
    pub content: String,

    pub created_at: Timestamp,

    /// Refreshed on every successful update; never earlier than `created_at`.
    pub updated_at: Timestamp,
}

impl Note {
    /// Creates a note with a fresh id and `created_at == updated_at == now`.
    ///
    /// Callers are expected to have trimmed and validated `title` and `content`.
    #[must_use]
    pub fn new(device_id: DeviceId, title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            note_id: NoteId::generate(),
            device_id,
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `device_id` owns this note.
    #[must_use]
    pub fn is_owned_by(&self, device_id: &DeviceId) -> bool {
        &self.device_id == device_id
    }
}

// ============================================================================
// Tests
// ============================================================================
