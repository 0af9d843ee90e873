//! Counter stores.
//!
//! The key-value store is the only shared mutable state in the service. It is
//! injected as a `CounterStore` trait object so the Redis backend can be
//! swapped for the in-memory one in development and tests.
//!
//! ## Stores
//!
//! - **counter_store** - The `CounterStore` trait and its Redis implementation
//! - **memory** - HashMap-backed implementation with lazy TTL expiry
//!
//! ## Key Patterns
//!
//! ```text
//! total_count                 → lifetime detections (no expiry)
//! daily_ips_{YYYY-MM-DD}      → comma-joined caller digests (2 day TTL)
//! daily_count_{YYYY-MM-DD}    → detections that day (2 day TTL)
//! ```
//!
//! The layout is owned by `crate::counters`; stores only see opaque keys.

mod counter_store;
mod memory;

pub use counter_store::{CounterStore, RedisCounterStore};
pub use memory::MemoryCounterStore;

#[cfg(test)]
pub use counter_store::MockCounterStore;
