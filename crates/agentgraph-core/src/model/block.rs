use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Block timestamp in seconds. Logical time for every entity field.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockTimestamp(pub u64);

impl BlockTimestamp {
    /// Wall-clock view of the timestamp, `None` if it does not fit chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl std::fmt::Display for BlockTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an event sits in the source log: block order, then log-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogPosition {
    pub block_number: u64,
    pub log_index: u64,
}

impl std::fmt::Display for LogPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.block_number, self.log_index)
    }
}

/// Block and transaction metadata shared by every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub block_timestamp: BlockTimestamp,
    pub block_number: u64,
    pub transaction_hash: String,
    pub log_index: u64,
}

impl EventEnvelope {
    pub fn position(&self) -> LogPosition {
        LogPosition {
            block_number: self.block_number,
            log_index: self.log_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_order_by_block_then_log_index() {
        let a = LogPosition {
            block_number: 7,
            log_index: 3,
        };
        let b = LogPosition {
            block_number: 8,
            log_index: 0,
        };
        let c = LogPosition {
            block_number: 8,
            log_index: 1,
        };
        assert!(a < b);
        assert!(b < c);
        assert_eq!(format!("{c}"), "8:1");
    }

    #[test]
    fn test_timestamp_to_datetime() {
        let ts = BlockTimestamp(1_700_000_000);
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert!(BlockTimestamp(u64::MAX).to_datetime().is_none());
    }
}
