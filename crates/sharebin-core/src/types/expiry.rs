//! Upload expiry policy.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long an uploaded object stays retrievable.
///
/// The policy is resolved to an absolute timestamp at upload time;
/// afterwards only the timestamp matters. Unrecognized wire values are
/// treated as [`ExpiryPolicy::Never`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Expires one hour after upload.
    OneHour,
    /// Expires one day after upload.
    OneDay,
    /// Expires seven days after upload.
    SevenDays,
    /// Expires thirty days after upload.
    ThirtyDays,
    /// Never expires.
    #[default]
    Never,
}

impl ExpiryPolicy {
    /// Parse the wire representation (`1h`, `1d`, `7d`, `30d`, `never`).
    pub fn parse(value: &str) -> Self {
        match value {
            "1h" => Self::OneHour,
            "1d" => Self::OneDay,
            "7d" => Self::SevenDays,
            "30d" => Self::ThirtyDays,
            _ => Self::Never,
        }
    }

    /// Resolve the policy to an absolute expiry relative to `now`.
    pub fn resolve_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::OneHour => Some(now + Duration::hours(1)),
            Self::OneDay => Some(now + Duration::days(1)),
            Self::SevenDays => Some(now + Duration::days(7)),
            Self::ThirtyDays => Some(now + Duration::days(30)),
            Self::Never => None,
        }
    }

    /// Resolve the policy to an absolute expiry relative to the current time.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        self.resolve_from(Utc::now())
    }
}
