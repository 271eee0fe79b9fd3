//! Unique id generation for templates and scheduled blocks.
//!
//! Ids combine a millisecond timestamp with a process-wide counter so that
//! blocks created within the same millisecond still get distinct ids. They
//! stay stable across moves and across snapshot round-trips.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh scheduled-block id.
pub fn next_block_id() -> String {
    next_id("block")
}

/// Generate a fresh template id.
pub fn next_template_id() -> String {
    next_id("tpl")
}

fn next_id(prefix: &str) -> String {
    let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{:x}", prefix, Utc::now().timestamp_millis(), seq)
}
