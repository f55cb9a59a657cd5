//! Leaderboard record contract
//!
//! Wire types exchanged with the leaderboard service, plus the checks the
//! site applies before forwarding a submission. Ranking and storage live
//! elsewhere.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest accepted username (characters)
pub const MAX_USERNAME_LEN: usize = 20;

/// A submission, before the service assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLeaderboardRecord {
    pub username: String,
    /// Completion time in milliseconds
    pub timems: u64,
    /// ISO-8601 timestamp when achieved, e.g. `2025-10-09T08:53:20.000Z`
    pub date: String,
}

/// A stored record as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub id: u64,
    pub username: String,
    pub timems: u64,
    pub date: String,
}

impl NewLeaderboardRecord {
    /// Build and validate a submission. The username is trimmed.
    pub fn new(username: &str, timems: u64, date: &str) -> Result<Self> {
        let record = Self {
            username: username.trim().to_string(),
            timems,
            date: date.to_string(),
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::InvalidRecord("username is required".into()));
        }
        let len = self.username.chars().count();
        if len > MAX_USERNAME_LEN {
            return Err(Error::InvalidRecord(format!(
                "username too long ({len} > {MAX_USERNAME_LEN})"
            )));
        }
        if self.timems == 0 {
            return Err(Error::InvalidRecord("timems must be > 0".into()));
        }
        parse_date(&self.date)?;
        Ok(())
    }

    /// Attach the id assigned by the service
    pub fn into_record(self, id: u64) -> LeaderboardRecord {
        LeaderboardRecord {
            id,
            username: self.username,
            timems: self.timems,
            date: self.date,
        }
    }
}

impl LeaderboardRecord {
    /// Completion time as `m:ss.mmm`
    pub fn display_time(&self) -> String {
        format_time(self.timems)
    }

    pub fn achieved_at(&self) -> Result<DateTime<FixedOffset>> {
        parse_date(&self.date)
    }
}

fn parse_date(date: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(date)
        .map_err(|e| Error::InvalidRecord(format!("invalid date format {date:?}: {e}")))
}

/// Current UTC time as an ISO-8601 string with millisecond precision
#[cfg(target_arch = "wasm32")]
pub fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Current UTC time as an ISO-8601 string with millisecond precision
#[cfg(not(target_arch = "wasm32"))]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Format a duration in ms as `m:ss.mmm`
pub fn format_time(timems: u64) -> String {
    let minutes = timems / 60_000;
    let seconds = (timems / 1000) % 60;
    let millis = timems % 1000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "2025-10-09T08:53:20.000Z";

    #[test]
    fn test_valid_record() {
        let r = NewLeaderboardRecord::new("  ada  ", 12_345, DATE).unwrap();
        assert_eq!(r.username, "ada");
        let stored = r.into_record(7);
        assert_eq!(stored.id, 7);
        assert_eq!(stored.display_time(), "0:12.345");
    }

    #[test]
    fn test_rejects_bad_submissions() {
        assert!(NewLeaderboardRecord::new("   ", 100, DATE).is_err());
        assert!(NewLeaderboardRecord::new("ada", 0, DATE).is_err());
        assert!(NewLeaderboardRecord::new("ada", 100, "").is_err());
        assert!(NewLeaderboardRecord::new("ada", 100, "yesterday").is_err());
        assert!(NewLeaderboardRecord::new("ada", 100, "1760000000000").is_err());
        let err = NewLeaderboardRecord::new("ada", 100, "2025-13-40T00:00:00Z").unwrap_err();
        assert!(format!("{err}").contains("invalid date format"));

        let long = "x".repeat(MAX_USERNAME_LEN + 1);
        let err = NewLeaderboardRecord::new(&long, 100, DATE).unwrap_err();
        assert!(format!("{err}").contains("too long"));

        // Limit counts characters, not bytes
        let exact = "é".repeat(MAX_USERNAME_LEN);
        assert!(NewLeaderboardRecord::new(&exact, 100, DATE).is_ok());
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"id":3,"username":"bob","timems":61005,"date":"2025-10-09T08:53:20.000Z"}"#;
        let r: LeaderboardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.username, "bob");
        assert_eq!(r.display_time(), "1:01.005");
        assert_eq!(r.achieved_at().unwrap().timestamp_millis(), 1_760_000_000_000);

        let out = serde_json::to_value(NewLeaderboardRecord::new("bob", 5, DATE).unwrap()).unwrap();
        assert_eq!(out["timems"], 5);
        assert_eq!(out["date"], DATE);
        assert!(out.get("id").is_none());
    }

    #[test]
    fn test_now_is_valid_date() {
        let now = now_iso();
        assert!(now.ends_with('Z'));
        let r = NewLeaderboardRecord::new("ada", 100, &now).unwrap();
        assert_eq!(r.date, now);
    }

    #[test]
    fn test_offset_dates_accepted() {
        let r = NewLeaderboardRecord::new("ada", 100, "2025-10-09T10:53:20+02:00")
            .unwrap()
            .into_record(1);
        assert_eq!(r.achieved_at().unwrap().timestamp_millis(), 1_760_000_000_000);
    }
}
