//! Detection counters.
//!
//! Three logical counters live in the store:
//!
//! - `total_count` - lifetime detections, never expires
//! - `daily_ips_{YYYY-MM-DD}` - distinct caller digests seen that UTC day
//! - `daily_count_{YYYY-MM-DD}` - detections that UTC day, repeats included
//!
//! Daily keys are rewritten with a two day TTL, so a new day starts from an
//! empty bucket and old buckets disappear on their own. Absent or malformed
//! values read as zero / empty.
//!
//! Updates are read-modify-write without any locking: two concurrent reports
//! can read the same value and one increment is lost. The figures are
//! approximate usage statistics and this is accepted.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::identity;
use crate::stores::CounterStore;

/// Key of the lifetime detection counter.
pub const TOTAL_KEY: &str = "total_count";

/// TTL applied to every write of a daily key (2 days).
pub const DAILY_TTL_SECS: u64 = 2 * 24 * 60 * 60;

/// Key of the caller digest set for `day`.
pub fn daily_ips_key(day: NaiveDate) -> String {
    format!("daily_ips_{}", day.format("%Y-%m-%d"))
}

/// Key of the detection count for `day`.
pub fn daily_count_key(day: NaiveDate) -> String {
    format!("daily_count_{}", day.format("%Y-%m-%d"))
}

/// Snapshot returned by [`Counters::get_stats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub today_unique: u64,
    pub lifetime_total: u64,
    pub day: NaiveDate,
}

/// Accessor for the counter key families.
#[derive(Clone)]
pub struct Counters {
    store: Arc<dyn CounterStore>,
}

impl Counters {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Record one detection from `raw_identity` at `now`.
    ///
    /// The raw identity is hashed before anything touches the store.
    pub async fn record_detection(&self, raw_identity: &str, now: DateTime<Utc>) -> Result<()> {
        let digest = identity::digest(raw_identity);
        let day = now.date_naive();

        let total = increment(TOTAL_KEY, self.store.get(TOTAL_KEY).await?)?;
        self.store.put(TOTAL_KEY, &total.to_string(), None).await?;

        let ips_key = daily_ips_key(day);
        let mut callers = IdentitySet::parse(self.store.get(&ips_key).await?.as_deref());
        let new_caller = callers.insert(&digest);
        if new_caller {
            self.store
                .put(&ips_key, &callers.serialize(), Some(DAILY_TTL_SECS))
                .await?;
        }

        let count_key = daily_count_key(day);
        let today = increment(&count_key, self.store.get(&count_key).await?)?;
        self.store
            .put(&count_key, &today.to_string(), Some(DAILY_TTL_SECS))
            .await?;

        tracing::debug!(%digest, %day, new_caller, total, today, "detection recorded");

        Ok(())
    }

    /// Read today's distinct caller count and the lifetime total.
    pub async fn get_stats(&self, now: DateTime<Utc>) -> Result<Stats> {
        let day = now.date_naive();

        let lifetime_total = parse_count(self.store.get(TOTAL_KEY).await?);
        let callers = IdentitySet::parse(self.store.get(&daily_ips_key(day)).await?.as_deref());

        Ok(Stats {
            today_unique: callers.len() as u64,
            lifetime_total,
            day,
        })
    }
}

/// Decimal counter value; anything absent or unparsable counts as zero.
fn parse_count(raw: Option<String>) -> u64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Next value of the counter stored under `key`.
fn increment(key: &str, raw: Option<String>) -> Result<u64> {
    parse_count(raw)
        .checked_add(1)
        .with_context(|| format!("counter {key} is at its maximum value"))
}

/// Insertion-ordered set of caller digests, stored comma-joined.
#[derive(Debug, Default)]
struct IdentitySet {
    members: Vec<String>,
}

impl IdentitySet {
    fn parse(raw: Option<&str>) -> Self {
        let mut seen = HashSet::new();
        let members = raw
            .unwrap_or_default()
            .split(',')
            .filter(|d| !d.is_empty() && seen.insert(*d))
            .map(str::to_string)
            .collect();
        Self { members }
    }

    /// Add `digest`, returning false if it was already present.
    fn insert(&mut self, digest: &str) -> bool {
        if self.members.iter().any(|m| m == digest) {
            return false;
        }
        self.members.push(digest.to_string());
        true
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn serialize(&self) -> String {
        self.members.join(",")
    }
}
