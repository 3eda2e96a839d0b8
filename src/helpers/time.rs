use chrono::{DateTime, NaiveDateTime, Utc};

/// Time source injected into components that compare against token expiry.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        now_i64()
    }
}

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

/// Parse the provider's `expiryDate` field into unix seconds.
///
/// The gateway has been observed returning RFC 3339 timestamps,
/// `YYYY-MM-DD hh:mm:ss` (UTC) and raw epoch seconds; all three are accepted.
pub fn parse_expiry(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc().timestamp());
    }
    raw.parse::<i64>().ok()
}

#[cfg(test)]
mod test {
    use super::parse_expiry;

    #[test]
    fn accepts_rfc3339() {
        assert_eq!(parse_expiry("1970-01-01T01:00:00Z"), Some(3600));
        assert_eq!(parse_expiry("1970-01-01T01:00:00+01:00"), Some(0));
    }

    #[test]
    fn accepts_naive_datetime_as_utc() {
        assert_eq!(parse_expiry("1970-01-01 02:00:00"), Some(7200));
    }

    #[test]
    fn accepts_epoch_seconds() {
        assert_eq!(parse_expiry("1767225600"), Some(1767225600));
        assert_eq!(parse_expiry(" 60 "), Some(60));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_expiry("soon"), None);
        assert_eq!(parse_expiry(""), None);
    }
}
