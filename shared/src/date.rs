//! 时间类型模块
//!
//! 后端历史记录的 `timestamp` 字段有两种形态：
//! - 带时区偏移的 RFC 3339 字符串 (`2024-05-01T08:30:00Z`)
//! - 不带时区的 ISO 8601 字符串 (`2024-05-01T08:30:00.123456`)，由 `datetime.utcnow` 产生，按 UTC 解释
//!
//! `Timestamp` 统一这两种输入，并保证可排序。

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// 不带时区时允许的分隔格式（`T` 分隔由 `NaiveDateTime::from_str` 处理）
const NAIVE_SPACE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// UI 展示格式
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

// =========================================================
// Timestamp - 可传输、可排序的时间戳
// =========================================================

/// UTC 时间戳
///
/// 序列化为 RFC 3339 字符串，反序列化同时接受带时区与不带时区的格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

/// 时间戳解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {0}")]
pub struct TimestampParseError(String);

impl Timestamp {
    #[inline]
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// 人类可读的展示格式
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(at) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(at.with_timezone(&Utc)));
        }

        NaiveDateTime::from_str(s)
            .or_else(|_| NaiveDateTime::parse_from_str(s, NAIVE_SPACE_FORMAT))
            .map(|naive| Self(naive.and_utc()))
            .map_err(|_| TimestampParseError(s.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts: Timestamp = "2024-05-01T10:30:00+02:00".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-05-01T08:30:00+00:00");
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let naive: Timestamp = "2024-05-01T08:30:00.123456".parse().unwrap();
        let zulu: Timestamp = "2024-05-01T08:30:00.123456Z".parse().unwrap();
        assert_eq!(naive, zulu);

        let spaced: Timestamp = "2024-05-01 08:30:00".parse().unwrap();
        assert_eq!(spaced.display(), "2024-05-01 08:30");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("yesterday".parse::<Timestamp>().is_err());
        assert_eq!(
            "".parse::<Timestamp>().unwrap_err().to_string(),
            "invalid timestamp: "
        );
    }

    #[test]
    fn test_ordering_follows_time() {
        let earlier: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        let later: Timestamp = "2024-01-01T00:00:01Z".parse().unwrap();
        assert!(earlier < later);
        assert_eq!(later.as_millis() - earlier.as_millis(), 1000);
    }

    #[test]
    fn test_json_roundtrip_through_string() {
        let ts: Timestamp = serde_json::from_str("\"2024-05-01T08:30:00\"").unwrap();
        let encoded = serde_json::to_string(&ts).unwrap();
        assert_eq!(encoded, "\"2024-05-01T08:30:00+00:00\"");
    }
}
