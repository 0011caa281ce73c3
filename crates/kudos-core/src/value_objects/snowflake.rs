//! Snowflake ID - 64-bit unique identifier
//!
//! Structure:
//! - Bits 63-22: Timestamp (milliseconds since custom epoch)
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Sequence number (0-4095)
//!
//! External entities (users, contents, comments, topics, ...) arrive with ids
//! minted by the host platform; this crate only generates fresh ids for rows
//! it creates itself (`UserBadge`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// 64-bit Snowflake ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1704067200000;

    /// Create a new Snowflake from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Extract timestamp (milliseconds since Unix epoch)
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> 22) + Self::EPOCH
    }

    /// Convert timestamp to DateTime<Utc>
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        use chrono::{TimeZone, Utc};
        Utc.timestamp_millis_opt(self.timestamp())
            .single()
            .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

/// Thread-safe Snowflake generator
///
/// Packs the per-worker state (last timestamp + sequence) into a single atomic
/// so id generation never needs a lock.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    // Upper bits: last timestamp offset, lower 12 bits: sequence
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// Create a generator for the given worker id (0-1023)
    pub fn new(worker_id: u16) -> Self {
        Self {
            worker_id: worker_id & 0x3FF,
            state: AtomicI64::new(0),
        }
    }

    /// Generate a new unique Snowflake
    pub fn generate(&self) -> Snowflake {
        loop {
            let now = Self::current_millis() - Snowflake::EPOCH;
            let prev = self.state.load(Ordering::Acquire);
            let prev_ts = prev >> 12;
            let prev_seq = prev & 0xFFF;

            let (ts, seq) = if now > prev_ts {
                (now, 0)
            } else if prev_seq < 0xFFF {
                (prev_ts, prev_seq + 1)
            } else {
                // Sequence exhausted within this millisecond; spin to the next one
                std::hint::spin_loop();
                continue;
            };

            let next = (ts << 12) | seq;
            if self
                .state
                .compare_exchange(prev, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Snowflake::new((ts << 22) | (i64::from(self.worker_id) << 12) | seq);
            }
        }
    }

    fn current_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}
